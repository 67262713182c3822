//! openapi-delta: structural diff and breaking-change detection for OpenAPI 3.x

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use openapi_delta::{
    cli,
    config::{AppConfig, DiffConfig, DiffPaths},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openapi-delta")]
#[command(version)]
#[command(about = "Structural diff and breaking-change detection for OpenAPI 3.x", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Changes detected (with --fail-on-diff)
    2  Breaking changes detected (with --fail-on-breaking)
    3  Error occurred

EXAMPLES:
    # Full delta as YAML
    openapi-delta diff v1.yaml v2.yaml

    # CI gate on breaking changes
    openapi-delta diff v1.yaml v2.yaml -o summary --fail-on-breaking

    # Compare a versioned base against an unversioned revision
    openapi-delta diff v1.yaml v2.yaml --prefix /api/v1 --filter '^/pets'")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Base (original) document: file path or http(s) URL
    base: String,

    /// Revision (modified) document: file path or http(s) URL
    revision: String,

    /// Only report changes that break existing clients
    #[arg(long)]
    breaking_only: bool,

    /// Ignore description fields
    #[arg(long)]
    exclude_description: bool,

    /// Compare example and examples fields
    #[arg(long)]
    include_examples: bool,

    /// Prefix stripped from base paths before matching
    #[arg(long)]
    prefix: Option<String>,

    /// Only compare paths matching this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// Output format [default: yaml]
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Report title for html and summary output
    #[arg(long)]
    title: Option<String>,

    /// Only emit the summary
    #[arg(long)]
    summary_only: bool,

    /// Exit with code 1 if any change is found
    #[arg(long)]
    fail_on_diff: bool,

    /// Exit with code 2 if a breaking change is found
    #[arg(long)]
    fail_on_breaking: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two OpenAPI documents
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .openapi-delta.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .breaking_only(args.breaking_only)
                .exclude_description(args.exclude_description)
                .include_examples(args.include_examples)
                .prefix(args.prefix)
                .filter(args.filter)
                .output_file(args.output_file)
                .summary_only(args.summary_only)
                .no_color(cli.no_color)
                .fail_on_diff(args.fail_on_diff)
                .fail_on_breaking(args.fail_on_breaking)
                .quiet(cli.quiet)
                .build();

            let (mut app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            if let Some(format) = args.output {
                app_config.output.format = format;
            }
            if let Some(title) = args.title {
                app_config.output.title = Some(title);
            }

            let config = DiffConfig::new(
                DiffPaths {
                    base: args.base,
                    revision: args.revision,
                },
                app_config,
            );
            cli::run_diff(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "openapi-delta", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let (yaml, loaded_from) = cli::render_config(cli.config.as_deref())?;
                    match loaded_from {
                        Some(path) => eprintln!("# Loaded from: {}", path.display()),
                        None => eprintln!("# No config file found; showing defaults"),
                    }
                    print!("{yaml}");
                }
                ConfigAction::Path => {
                    let (dirs, active) = cli::config_search_paths(cli.config.as_deref());
                    eprintln!("Config file search paths (in order):");
                    for dir in dirs {
                        eprintln!("  {}", dir.display());
                    }
                    match active {
                        Some(path) => eprintln!("Active config file: {}", path.display()),
                        None => eprintln!("No config file found."),
                    }
                }
                ConfigAction::Init => {
                    cli::init_config(&openapi_delta::config::default_config_path())?;
                }
                ConfigAction::Schema { output } => {
                    if let Some(schema) = cli::write_config_schema(output.as_deref())? {
                        println!("{schema}");
                    }
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

//! Config command handlers.

use crate::config::{discover_config_file, generate_example_config, load_or_default};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Effective configuration as YAML, with the file it came from.
pub fn render_config(explicit: Option<&Path>) -> Result<(String, Option<PathBuf>)> {
    let (config, loaded_from) = load_or_default(explicit);
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    Ok((yaml, loaded_from))
}

/// Directories searched for a config file, in order, and the active file.
#[must_use]
pub fn config_search_paths(explicit: Option<&Path>) -> (Vec<PathBuf>, Option<PathBuf>) {
    let dirs = [
        std::env::current_dir().ok(),
        ::dirs::config_dir().map(|dir| dir.join("openapi-delta")),
        ::dirs::home_dir(),
    ];
    (
        dirs.into_iter().flatten().collect(),
        discover_config_file(explicit),
    )
}

/// Write an example config file to `target`. Refuses to overwrite.
pub fn init_config(target: &Path) -> Result<()> {
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(target, generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!("Created {}", target.display());
    Ok(())
}

/// Write the config JSON schema to a file, or return it for stdout.
pub fn write_config_schema(output: Option<&Path>) -> Result<Option<String>> {
    let schema =
        crate::config::generate_json_schema().context("failed to serialize config schema")?;
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Schema written to {}", path.display());
            Ok(None)
        }
        None => Ok(Some(schema)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let target = dir.path().join(".openapi-delta.yaml");
        init_config(&target).expect("init");
        assert!(init_config(&target).is_err());

        let (yaml, loaded_from) = render_config(Some(&target)).expect("render");
        assert_eq!(loaded_from, Some(target));
        assert!(yaml.contains("breaking_only: false"));
    }

    #[test]
    fn test_schema_to_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("schema.json");
        assert!(write_config_schema(Some(&path)).expect("write").is_none());
        assert!(std::fs::read_to_string(path).expect("read").contains("AppConfig"));
        assert!(write_config_schema(None).expect("schema").is_some());
    }
}

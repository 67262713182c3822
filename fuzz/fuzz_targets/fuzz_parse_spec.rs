#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the document loader.
///
/// Feeds arbitrary UTF-8 strings to `parse_spec_str`, which covers both the
/// JSON and YAML front ends and reference resolution.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = openapi_delta::parsers::parse_spec_str(s);
    }
});

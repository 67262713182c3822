#![no_main]
use libfuzzer_sys::fuzz_target;
use openapi_delta::diff::DiffEngine;

/// Any document that loads must compare equal to itself.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = openapi_delta::parsers::parse_spec_str(s) else {
        return;
    };
    if let Ok(result) = DiffEngine::new().diff(&doc, &doc) {
        assert!(!result.has_changes());
    }
});

//! Fuzz target for the data parser.
//!
//! The CSV/TSV/JSON parser must never panic on malformed input and the
//! rows it returns must analyze cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use tabula::{Parser, analyze};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let _ = parser.parse_json(data);
    for delimiter in [b',', b'\t', b';'] {
        if let Ok(rows) = parser.parse_delimited(data, delimiter) {
            let _ = analyze(rows, "fuzz");
        }
    }

    // Auto-detection goes through the file path.
    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let _ = parser.parse_file(temp_file.path());
        }
    }
});

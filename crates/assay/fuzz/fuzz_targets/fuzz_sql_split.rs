//! Fuzz target for SQL statement splitting.

#![no_main]

use assay::readiness::split_statements;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(script) = std::str::from_utf8(data) {
        for statement in split_statements(script) {
            assert!(!statement.trim().is_empty());
        }
    }
});

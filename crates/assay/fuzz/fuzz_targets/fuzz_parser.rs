//! Fuzz target for the delimited-text parser.
//!
//! Arbitrary bytes must never panic the parser, whatever delimiter
//! detection picks.

#![no_main]

use assay::input::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes(data) {
        // Every column is padded or truncated to the row count.
        for column in table.columns() {
            assert_eq!(column.len(), table.row_count());
        }
    }
});

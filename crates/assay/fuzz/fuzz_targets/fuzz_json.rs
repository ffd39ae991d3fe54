//! Fuzz target for JSON table loading.

#![no_main]

use assay::{InputFile, TableLoader};
use assay::input::FileLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let loader = FileLoader::new();
    let _ = loader.load(&InputFile::new("fuzz.json", data.to_vec()));
});

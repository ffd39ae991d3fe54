//! Example: run every analysis on a data file and print the JSON reports.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [baseline_path]
//!
//! With a baseline, the drift report compares it against the file.

use std::env;
use std::process::ExitCode;

use assay::Assay;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [baseline_path]");
        return ExitCode::FAILURE;
    }

    match run(&args[1], args.get(2).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(file: &str, baseline: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let assay = Assay::new();
    let separator = "=".repeat(80);

    println!("{}", separator);
    println!("Assay: {}", file);
    println!("{}", separator);

    section("Schema", &assay.scan_path(file)?)?;
    section("Profile", &assay.profile_path(file, None)?)?;
    section("Readiness", &assay.readiness_path(file)?)?;

    if let Some(baseline) = baseline {
        section("Drift", &assay.drift_paths(baseline, file)?)?;
    }

    Ok(())
}

fn section<T: serde::Serialize>(title: &str, report: &T) -> serde_json::Result<()> {
    println!();
    println!("--- {} ---", title);
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

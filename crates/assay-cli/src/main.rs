//! Assay CLI - dataset schema, drift, profiling and readiness checks.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use assay::AssayError;
use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;

/// Exit code for input the tool cannot work with.
const EXIT_CLIENT_FAULT: u8 = 2;
/// Exit code for everything else that went wrong.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    let result = Context::new(cli.delimiter, cli.output).and_then(|ctx| match cli.command {
        Commands::Scan { file, json } => commands::scan::run(&ctx, file, json),

        Commands::Drift {
            baseline,
            current,
            json,
        } => commands::drift::run(&ctx, baseline, current, json),

        Commands::Profile {
            file,
            baseline_schema,
            json,
        } => commands::profile::run(&ctx, file, baseline_schema, json),

        Commands::Readiness { file, json } => commands::readiness::run(&ctx, file, json),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(e.as_ref()))
        }
    }
}

fn exit_code(error: &(dyn std::error::Error + 'static)) -> u8 {
    match error.downcast_ref::<AssayError>() {
        Some(e) if e.is_client_fault() => EXIT_CLIENT_FAULT,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let client: Box<dyn std::error::Error> =
            Box::new(AssayError::UnsupportedFormat("docx".into()));
        assert_eq!(exit_code(client.as_ref()), EXIT_CLIENT_FAULT);

        let internal: Box<dyn std::error::Error> = Box::new(AssayError::Internal {
            file: "a.csv".into(),
            reason: "boom".into(),
        });
        assert_eq!(exit_code(internal.as_ref()), EXIT_FAILURE);

        let other: Box<dyn std::error::Error> = "plain".into();
        assert_eq!(exit_code(other.as_ref()), EXIT_FAILURE);
    }
}

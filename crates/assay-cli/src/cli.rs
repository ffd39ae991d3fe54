//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: schema, drift, profiling and readiness checks for tabular data
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Field delimiter for delimited text (auto-detected by default)
    #[arg(long, global = true, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Write the JSON report to this path
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize column types, null rates and frequent values
    Scan {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect schema and data drift between a baseline and a current file
    Drift {
        /// Baseline data file
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Current data file (same kind as the baseline)
        #[arg(value_name = "CURRENT")]
        current: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Profile every field and flag anomalies
    Profile {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file mapping column names to previously seen categories
        #[arg(long, value_name = "JSON")]
        baseline_schema: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score how ready a dataset is for downstream use
    Readiness {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "assay", "drift", "a.csv", "b.csv", "-vv", "--delimiter", ";", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.delimiter, Some(';'));
        assert!(matches!(cli.command, Commands::Drift { json: true, .. }));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["assay", "scan", "a.csv", "-q", "-v"]).is_err());
    }
}

//! CLI command implementations.

pub mod drift;
pub mod profile;
pub mod readiness;
pub mod scan;

use std::path::PathBuf;

use assay::input::ParserConfig;
use assay::{Assay, AssayConfig, AssayError};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Shared state for a command run: the configured engine and where the
/// report goes.
pub struct Context {
    pub assay: Assay,
    output: Option<PathBuf>,
}

impl Context {
    pub fn new(delimiter: Option<char>, output: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut parser = ParserConfig::default();
        if let Some(d) = delimiter {
            if !d.is_ascii() {
                return Err(AssayError::Config(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    d
                ))
                .into());
            }
            parser = parser.with_delimiter(d as u8);
        }

        Ok(Self {
            assay: Assay::with_config(AssayConfig::default().with_parser(parser)),
            output,
        })
    }

    /// Emit a report: to the output file if one was given, as JSON on
    /// stdout with `--json`, otherwise through the human-readable renderer.
    pub fn emit<T: Serialize>(&self, report: &T, json: bool, render: impl FnOnce(&T)) -> CommandResult {
        if let Some(path) = &self.output {
            debug!(path = %path.display(), "writing report");
            let text = serde_json::to_string_pretty(report)?;
            std::fs::write(path, text).map_err(|e| AssayError::Io {
                path: path.clone(),
                source: e,
            })?;
            if !json {
                render(report);
            }
            eprintln!(
                "{} {}",
                "Report written to".green(),
                path.display().to_string().white()
            );
            return Ok(());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            render(report);
        }
        Ok(())
    }
}

/// Heading for one table of a multi-table report.
pub(crate) fn table_heading(name: Option<&str>) {
    if let Some(name) = name {
        println!();
        println!("{} {}", "Table".cyan().bold(), name.white().bold());
    }
}

/// Color a 0-100 score by band.
pub(crate) fn colored_score(score: i64) -> colored::ColoredString {
    let text = score.to_string();
    if score >= 80 {
        text.green().bold()
    } else if score >= 50 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        assert!(Context::new(Some('§'), None).is_err());
        assert!(Context::new(Some(';'), None).is_ok());
    }

    #[test]
    fn test_emit_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let ctx = Context::new(None, Some(path.clone())).unwrap();

        let mut rendered = false;
        ctx.emit(&serde_json::json!({"ok": true}), true, |_| rendered = true)
            .unwrap();

        assert!(!rendered);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["ok"], serde_json::json!(true));
    }

    #[test]
    fn test_emit_reports_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let ctx = Context::new(None, Some(path)).unwrap();

        let err = ctx.emit(&1, true, |_| {}).unwrap_err();
        assert!(err.downcast_ref::<AssayError>().is_some());
    }
}

//! Drift command - compare a current data file against a baseline.

use std::path::PathBuf;

use assay::{DriftFinding, DriftFindings, DriftReport};
use colored::Colorize;

use super::{CommandResult, Context, table_heading};

/// Significance level used to highlight drifted columns.
const ALPHA: f64 = 0.05;

pub fn run(ctx: &Context, baseline: PathBuf, current: PathBuf, json: bool) -> CommandResult {
    let report = ctx.assay.drift_paths(&baseline, &current)?;

    ctx.emit(&report, json, |report| {
        println!(
            "{} {} {} {}",
            "Drift from".cyan().bold(),
            baseline.display().to_string().white(),
            "to".cyan().bold(),
            current.display().to_string().white()
        );
        render(report);
    })
}

fn render(report: &DriftReport) {
    let mut any = false;
    for (name, findings) in report.iter() {
        table_heading(name);
        render_findings(findings);
        any |= !findings.is_empty();
    }
    if !any {
        println!();
        println!("{}", "No columns to compare.".dimmed());
    }
}

fn render_findings(findings: &DriftFindings) {
    for (column, finding) in findings {
        match finding {
            DriftFinding::SchemaChange { schema_change } => {
                println!("  {:24} {} {}", column, "schema".yellow().bold(), schema_change);
            }
            DriftFinding::Distribution {
                drift_score,
                p_value,
                direction,
            } => {
                let label = if *p_value < ALPHA {
                    "drift ".red().bold()
                } else {
                    "stable".green()
                };
                println!(
                    "  {:24} {} score {:.4}  p {:.4}  {}",
                    column,
                    label,
                    drift_score,
                    p_value,
                    direction.dimmed()
                );
            }
            DriftFinding::TemporalRange {
                earliest_baseline,
                earliest_current,
                latest_baseline,
                latest_current,
            } => {
                println!(
                    "  {:24} {} {}..{} -> {}..{}",
                    column,
                    "dates ".blue(),
                    earliest_baseline,
                    latest_baseline,
                    earliest_current,
                    latest_current
                );
            }
            DriftFinding::Note { note } => {
                println!("  {:24} {} {}", column, "note  ".magenta(), note);
            }
        }
    }
}

//! Profile command - field statistics and anomalies.

use std::path::PathBuf;

use assay::profile::{FieldStatistics, baseline_schema_from_json};
use assay::{AssayError, ProfileReport, TableProfile};
use colored::Colorize;

use super::{CommandResult, Context, table_heading};

pub fn run(
    ctx: &Context,
    file: PathBuf,
    baseline_schema: Option<PathBuf>,
    json: bool,
) -> CommandResult {
    let baseline = match baseline_schema {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| AssayError::Io {
                path: path.clone(),
                source: e,
            })?;
            Some(baseline_schema_from_json(&text)?)
        }
        None => None,
    };

    let report = ctx.assay.profile_path(&file, baseline.as_ref())?;

    ctx.emit(&report, json, |report| {
        println!(
            "{} {}",
            "Profile of".cyan().bold(),
            file.display().to_string().white()
        );
        match report {
            ProfileReport::Single(profile) => render(profile),
            ProfileReport::Tables { tables } => {
                for (name, profile) in tables {
                    table_heading(Some(name));
                    render(profile);
                }
            }
        }
    })
}

fn render(profile: &TableProfile) {
    if profile.empty {
        println!("{}", "  Empty table.".dimmed());
        return;
    }

    println!();
    println!("{}", "Fields:".yellow().bold());
    for (name, stats) in &profile.field_statistics {
        match stats {
            FieldStatistics::Numeric {
                min,
                max,
                mean,
                std_dev,
                entropy,
            } => {
                let sd = std_dev.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "  {:24} min {}  max {}  mean {}  sd {}  entropy {}",
                    name, min, max, mean, sd, entropy
                );
            }
            FieldStatistics::Temporal {
                min,
                max,
                temporal_spread_days,
            } => match (min, max, temporal_spread_days) {
                (Some(min), Some(max), Some(days)) => {
                    println!("  {:24} {} .. {}  ({} days)", name, min, max, days)
                }
                _ => println!("  {:24} {}", name, "no parseable dates".dimmed()),
            },
            FieldStatistics::Categorical {
                unique_values,
                entropy,
            } => {
                println!(
                    "  {:24} unique {}  entropy {}",
                    name, unique_values, entropy
                );
            }
        }
    }

    let anomalies = &profile.anomalies;
    if anomalies.missing_values.is_empty()
        && anomalies.schema_drift.is_empty()
        && anomalies.outliers.is_empty()
    {
        println!();
        println!("{}", "No anomalies found.".green());
        return;
    }

    println!();
    println!("{}", "Anomalies:".yellow().bold());
    for (name, pct) in &anomalies.missing_values {
        println!("  {:24} {} {}%", name, "missing".yellow(), pct);
    }
    for (name, drift) in &anomalies.schema_drift {
        println!(
            "  {:24} {} {}",
            name,
            "new categories".magenta(),
            drift.new_categories.join(", ")
        );
    }
    for (name, values) in &anomalies.outliers {
        let shown: Vec<String> = values.iter().take(10).map(|v| v.to_string()).collect();
        let more = if values.len() > 10 {
            format!(" (+{} more)", values.len() - 10)
        } else {
            String::new()
        };
        println!(
            "  {:24} {} {}{}",
            name,
            "outliers".red(),
            shown.join(", "),
            more
        );
    }
}

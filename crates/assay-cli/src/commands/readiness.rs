//! Readiness command - composite quality score.

use std::path::PathBuf;

use assay::{ReadinessReport, ReadinessScore};
use colored::Colorize;

use super::{CommandResult, Context, colored_score};

pub fn run(ctx: &Context, file: PathBuf, json: bool) -> CommandResult {
    let report = ctx.assay.readiness_path(&file)?;
    ctx.emit(&report, json, render)
}

fn render(report: &ReadinessReport) {
    println!(
        "{} {}",
        "Readiness of".cyan().bold(),
        report.source_file.white()
    );
    println!("Rows analyzed: {}", report.total_rows_analyzed);
    println!();
    render_score(&report.readiness_score, "");

    if let Some(sheets) = &report.sheets {
        for (name, score) in sheets {
            println!();
            println!("{} {}", "Sheet".cyan().bold(), name.white().bold());
            render_score(score, "  ");
        }
    }
}

fn render_score(score: &ReadinessScore, indent: &str) {
    println!("{}Overall:       {}", indent, colored_score(score.overall));
    println!("{}  Completeness:  {}", indent, colored_score(score.completeness));
    println!("{}  Consistency:   {}", indent, colored_score(score.consistency));
    println!("{}  Schema health: {}", indent, colored_score(score.schema_health));
    if let Some(message) = &score.message {
        println!("{}{}", indent, message.dimmed());
    }
}

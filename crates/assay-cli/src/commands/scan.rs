//! Scan command - summarize the schema of a data file.

use std::path::PathBuf;

use assay::ScanReport;
use colored::Colorize;

use super::{CommandResult, Context, table_heading};

pub fn run(ctx: &Context, file: PathBuf, json: bool) -> CommandResult {
    let report = ctx.assay.scan_path(&file)?;
    ctx.emit(&report, json, render)
}

fn render(report: &ScanReport) {
    println!(
        "{} {}",
        "Schema of".cyan().bold(),
        report.file_name.white()
    );

    for (name, scan) in report.tables.iter() {
        table_heading(name);
        println!("{} {}", "Rows:".yellow(), scan.total_rows);
        println!();
        println!(
            "  {:24} {:8} {:>7} {:>9}  {}",
            "Field".bold(),
            "Type".bold(),
            "Null %".bold(),
            "Distinct".bold(),
            "Top values".bold()
        );
        for column in &scan.schema_summary {
            let nulls = if column.null_percentage == "0.0%" {
                column.null_percentage.normal()
            } else {
                column.null_percentage.yellow()
            };
            println!(
                "  {:24} {:8} {:>7} {:>9}  {}",
                column.field,
                column.data_type,
                nulls,
                column.distinct_count,
                column.top_values.dimmed()
            );
        }
    }
}

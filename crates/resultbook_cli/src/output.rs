//! Terminal rendering of results pages.

use crate::cli::OutputFormat;
use resultbook_core::{FieldErrors, ResultsPage, Stats};
use serde::Serialize;

/// Prints a serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_page(page: &ResultsPage, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Table => {
            println!("{}", render_page(page));
            Ok(())
        }
    }
}

pub fn print_stats(stats: &Stats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Table => {
            println!("{}", render_stats(stats));
            Ok(())
        }
    }
}

/// Per-field messages followed by the summary banner, for stderr.
pub fn render_field_errors(errors: &FieldErrors, banner: &str) -> String {
    let mut lines: Vec<String> = errors
        .iter()
        .map(|error| format!("  {}: {}", error.field, error.message))
        .collect();
    lines.push(banner.to_string());
    lines.join("\n")
}

pub fn render_page(page: &ResultsPage) -> String {
    if page.is_empty {
        return format!("No results yet.\n{}", render_stats(&page.stats));
    }

    let mut out = format!(
        "{:<16} {:<10} {:<24} {:<10} {:>5} {:<5}\n",
        "ID", "ROLL NO", "NAME", "DOB", "SCORE", "GRADE"
    );
    for row in &page.rows {
        out.push_str(&format!(
            "{:<16} {:<10} {:<24} {:<10} {:>5} {:<5}\n",
            row.id, row.roll_no, row.student_name, row.dob_display, row.score, row.grade
        ));
    }
    out.push_str(&render_stats(&page.stats));
    out
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "total={} average={:.2} highest={} lowest={}",
        stats.count, stats.average, stats.max, stats.min
    )
}

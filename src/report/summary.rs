//! Batch summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::convert::{stderr_excerpt, BatchReport, FileOutcome, FileStatus};

/// End-of-batch summary rendered as a table plus failure details
#[derive(Debug)]
pub struct BatchSummary<'a> {
    report: &'a BatchReport,
}

impl<'a> BatchSummary<'a> {
    pub fn new(report: &'a BatchReport) -> Self {
        Self { report }
    }

    /// Build the counts table
    pub fn table(&self) -> Table {
        let converted = self.report.converted();
        let failed = self.report.failed();
        let skipped = self.report.skipped();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("✅ Converted"),
            Cell::new(converted)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("❌ Failed"),
            Cell::new(failed).fg(if failed == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("⏭️  Skipped"),
            Cell::new(skipped).fg(if skipped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("📁 Total files"),
            Cell::new(self.report.outcomes.len()),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        if self.report.failed() > 0 {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILED FILES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            for outcome in self.report.failures() {
                if let Some(line) = failure_line(outcome) {
                    println!("      {} {}", style("•").dim(), line);
                }
                if let FileStatus::Failed { stderr, .. } = &outcome.status {
                    let excerpt = stderr_excerpt(stderr);
                    if !excerpt.is_empty() {
                        println!("          {}", style(excerpt).red());
                    }
                }
            }
        }
    }
}

/// `source -> output (exit N)` for a failed file, `None` otherwise
fn failure_line(outcome: &FileOutcome) -> Option<String> {
    let FileStatus::Failed { exit_code, .. } = &outcome.status else {
        return None;
    };
    let code = exit_code
        .map(|c| format!("exit {}", c))
        .unwrap_or_else(|| "not run".to_string());
    let target = outcome
        .output
        .as_ref()
        .map(|p| format!(" -> {}", p.display()))
        .unwrap_or_default();
    Some(format!("{}{} ({})", outcome.source.display(), target, code))
}

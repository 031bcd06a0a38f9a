//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::convert::ConversionJob;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static RULER: Emoji<'_, '_> = Emoji("📐 ", "");
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");
pub static GAUGE: Emoji<'_, '_> = Emoji("🎚️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("🎬").cyan(),
        style("ffwizard").cyan().bold()
    );
    println!(
        "    {}",
        style("Batch image conversion with FFmpeg").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the job summary card shown before confirmation.
/// Paths under `cwd` are shown relative to it.
pub fn print_job_card(job: &ConversionJob, cwd: &Path) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);
    let aspect = if job.keep_aspect_ratio() {
        "Preserved"
    } else {
        "Custom"
    };

    println!();
    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("📋 Conversion Summary").cyan().bold(),
        " ".repeat(box_width - 24)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:   {:<38}│",
        FOLDER,
        truncate_path(&input_label(job, cwd), 37)
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        truncate_path(&display_relative(job.output_directory(), cwd), 37)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Dimensions:   {:<33}│",
        RULER,
        style(job.dimensions_label()).yellow()
    );
    println!(
        "    │  {} Format:       {:<33}│",
        PICTURE,
        style(job.output_format().label()).yellow()
    );
    println!(
        "    │  {} Quality:      {:<33}│",
        GAUGE,
        style(format!("{}%", job.quality())).yellow()
    );
    println!(
        "    │  {} Aspect ratio: {:<33}│",
        RULER,
        style(aspect).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(title: &str) {
    println!();
    println!(
        "    {} {}",
        style("◆").cyan().bold(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        SPARKLES,
        style("Conversion complete!").green().bold()
    );
    println!();
}

// Helper functions

fn display_relative(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

/// Source path for the job card; directories get a trailing `/`
fn input_label(job: &ConversionJob, cwd: &Path) -> String {
    let mut label = display_relative(job.source_path(), cwd);
    if job.is_directory() && !label.ends_with('/') {
        label.push('/');
    }
    label
}

fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        path.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

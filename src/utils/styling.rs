//! Terminal styling utilities for the search output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::SearchMode;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static COMPASS: Emoji<'_, '_> = Emoji("🧭 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███╗   ██╗███╗   ██╗███████╗███████╗██╗
    ████╗  ██║████╗  ██║██╔════╝██╔════╝██║
    ██╔██╗ ██║██╔██╗ ██║███████╗█████╗  ██║
    ██║╚██╗██║██║╚██╗██║╚════██║██╔══╝  ██║
    ██║ ╚████║██║ ╚████║███████║███████╗███████╗
    ╚═╝  ╚═══╝╚═╝  ╚═══╝╚══════╝╚══════╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Nearest-neighbor feature subset selection").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, mode: SearchMode, parallel: bool, report: Option<&Path>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("Configuration").cyan().bold(),
        " ".repeat(box_width - 16)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(input, 38));
    println!(
        "    │  {} Mode:   {:<39}│",
        COMPASS,
        truncate_string(&mode.to_string(), 38)
    );
    println!(
        "    │  {} Candidates: {:<35}│",
        GEAR,
        if parallel { "parallel" } else { "sequential" }
    );
    if let Some(report) = report {
        println!("    │  {} Report: {:<39}│", SAVE, truncate_path(report, 38));
    }
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Feature search complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      {} {}", style(count).yellow().bold(), description);
    }
}

/// Format an accuracy percentage for display
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.1}%", accuracy)
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

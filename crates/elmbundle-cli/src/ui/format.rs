//! Formatting utilities for sizes, durations, and build summaries.

use console::Term;
use owo_colors::{OwoColorize, Style};
use std::time::Duration;

use super::paint;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use elmbundle_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use elmbundle_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the written files and their sizes to stderr.
///
/// `entries` are `(display name, size in bytes)` pairs; `duration` is the
/// time the whole build took.
pub fn print_build_summary(entries: &[(String, u64)], duration: Duration) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);

    eprintln!(
        "\n{}",
        "Build Summary".style(paint(Style::new().bold().underline()))
    );
    eprintln!("{}", "─".repeat(width));

    for (name, size) in entries {
        eprintln!(
            "  {} {} {}",
            "▸".style(paint(Style::new().blue())),
            name.style(paint(Style::new().bright_white().bold())),
            format_size(*size).style(paint(Style::new().dimmed()))
        );
    }

    eprintln!("{}", "─".repeat(width));

    let total_size: u64 = entries.iter().map(|(_, s)| s).sum();
    eprintln!(
        "  {} {} in {}",
        "Total:".style(paint(Style::new().bold())),
        format_size(total_size).style(paint(Style::new().green())),
        format_duration(duration).style(paint(Style::new().green()))
    );
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output and color utilities for consistent terminal formatting
//!
//! Provides timestamp rendering and shared color functions respecting the
//! NO_COLOR environment variable.

use colored::Colorize;

/// Renders seconds as `MM:SS`, zero-padded. Minutes are not capped at 59;
/// there is no hour rollover, so 3725 seconds formats as `62:05`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Check if colors should be used (respects NO_COLOR env var)
pub fn use_colors() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Colorize video id (cyan)
pub fn colorize_video_id(text: &str, use_color: bool) -> String {
    if use_color {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize timestamp (yellow)
pub fn colorize_timestamp(text: &str, use_color: bool) -> String {
    if use_color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize similarity score (green)
pub fn colorize_score(score: f32, use_color: bool) -> String {
    let rendered = format!("{:.3}", score);
    if use_color {
        rendered.green().to_string()
    } else {
        rendered
    }
}

/// Colorize chunk text (dimmed)
pub fn colorize_text(text: &str, use_color: bool) -> String {
    if use_color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

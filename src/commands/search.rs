// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vidgrep search` - corpus-wide or per-video semantic search

use anyhow::Result;

use crate::cli::OutputFormat;
use vidgrep::config::Config;
use vidgrep::index::SearchResult;
use vidgrep::output::{colorize_score, colorize_text, colorize_timestamp, colorize_video_id, use_colors};

/// Run the search command
pub fn run(
    query: &str,
    path: Option<&str>,
    top_k: Option<usize>,
    video: Option<&str>,
    quiet: bool,
    format: OutputFormat,
) -> Result<()> {
    let root = super::resolve_root(path)?;
    let config = Config::load_at(&root);
    let top_k = top_k.unwrap_or_else(|| config.search.top_k());

    let show_progress = !quiet && format == OutputFormat::Text;
    let mut engine = super::build_engine(&root, &config, show_progress)?;

    let results = match video {
        Some(video_id) => engine.search_by_video(video_id, query, top_k)?,
        None => engine.search(query, top_k)?,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => print_results(query, &results),
    }

    Ok(())
}

fn print_results(query: &str, results: &[SearchResult]) {
    if results.is_empty() {
        println!("No results found for '{}'.", query);
        return;
    }

    let use_color = use_colors();
    println!("Found {} result(s) for '{}':", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. {} [{}] score {}",
            i + 1,
            colorize_video_id(&result.video_id, use_color),
            colorize_timestamp(&result.timestamp_formatted, use_color),
            colorize_score(result.similarity_score, use_color),
        );
        println!("   {}", colorize_text(&truncate(&result.text, 120), use_color));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vidgrep list` - all videos known to the transcript directory

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use vidgrep::config::Config;
use vidgrep::output::{colorize_video_id, use_colors};

#[derive(Serialize)]
struct VideoLine {
    video_id: String,
    duration_formatted: String,
    chunk_count: usize,
}

/// Run the list command
pub fn run(path: Option<&str>, quiet: bool, format: OutputFormat) -> Result<()> {
    let root = super::resolve_root(path)?;
    let config = Config::load_at(&root);

    let show_progress = !quiet && format == OutputFormat::Text;
    let engine = super::build_engine(&root, &config, show_progress)?;

    let lines: Vec<VideoLine> = engine
        .get_all_videos()
        .into_iter()
        .filter_map(|video_id| {
            engine.get_video_summary(&video_id).map(|summary| VideoLine {
                video_id,
                duration_formatted: summary.duration_formatted,
                chunk_count: summary.chunk_count,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&lines)?);
        }
        OutputFormat::Text => {
            if lines.is_empty() {
                println!("No videos found.");
                return Ok(());
            }
            let use_color = use_colors();
            println!("Available videos ({}):", lines.len());
            for line in &lines {
                println!(
                    "  {} ({}, {} chunks)",
                    colorize_video_id(&line.video_id, use_color),
                    line.duration_formatted,
                    line.chunk_count,
                );
            }
        }
    }

    Ok(())
}

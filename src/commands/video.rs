// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vidgrep video` - summary and chunk listing for one video

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use vidgrep::config::Config;
use vidgrep::index::VideoSummary;
use vidgrep::output::{colorize_text, colorize_timestamp, colorize_video_id, format_timestamp, use_colors};

#[derive(Serialize)]
struct VideoReport<'a> {
    #[serde(flatten)]
    summary: &'a VideoSummary,
    chunks: Vec<ChunkLine>,
}

#[derive(Serialize)]
struct ChunkLine {
    timestamp_formatted: String,
    text: String,
}

/// Run the video command
pub fn run(video_id: &str, path: Option<&str>, quiet: bool, format: OutputFormat) -> Result<()> {
    let root = super::resolve_root(path)?;
    let config = Config::load_at(&root);

    let show_progress = !quiet && format == OutputFormat::Text;
    let engine = super::build_engine(&root, &config, show_progress)?;

    // An unknown video is a normal outcome, not an error.
    let Some(summary) = engine.get_video_summary(video_id) else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Text => println!("Video '{}' not found.", video_id),
        }
        return Ok(());
    };

    let chunks: Vec<ChunkLine> = engine
        .chunks_for_video(video_id)
        .into_iter()
        .map(|chunk| ChunkLine {
            timestamp_formatted: format_timestamp(chunk.start_time),
            text: chunk.text.clone(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let report = VideoReport {
                summary: &summary,
                chunks,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let use_color = use_colors();
            println!("Video: {}", colorize_video_id(video_id, use_color));
            println!("Duration: {}", summary.duration_formatted);
            println!("Chunks: {}", summary.chunk_count);
            for (i, chunk) in chunks.iter().enumerate() {
                println!(
                    "{}. [{}] {}",
                    i + 1,
                    colorize_timestamp(&chunk.timestamp_formatted, use_color),
                    colorize_text(&chunk.text, use_color),
                );
            }
        }
    }

    Ok(())
}

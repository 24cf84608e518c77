// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI command implementations
//!
//! Each subcommand rebuilds the in-memory index from the transcript
//! directory before answering; the index is never persisted.

pub mod list;
pub mod search;
pub mod video;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use vidgrep::config::Config;
use vidgrep::embedding::create_provider;
use vidgrep::index::VideoSearchEngine;
use vidgrep::transcript::{scan_transcripts, ChunkConfig, TranscriptChunker};

/// Resolves the transcript root from the `--path` flag or the current
/// directory.
pub fn resolve_root(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(PathBuf::from(p)),
        None => std::env::current_dir().context("Cannot determine current directory"),
    }
}

/// Scans the transcript root and builds a fully ingested engine.
///
/// `show_progress` drives an indicatif bar over the per-video embed step;
/// it is disabled for JSON output and `--quiet`.
pub fn build_engine(
    root: &PathBuf,
    config: &Config,
    show_progress: bool,
) -> Result<VideoSearchEngine> {
    let provider = create_provider(&config.embedding)?;
    let chunker = TranscriptChunker::new(ChunkConfig::new(config.chunking.chunk_duration())?);
    let mut engine = VideoSearchEngine::new(provider, chunker);

    let transcripts = scan_transcripts(root)?;
    let bar = if show_progress && !transcripts.is_empty() {
        let bar = ProgressBar::new(transcripts.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} embedding {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    for transcript in &transcripts {
        if let Some(bar) = &bar {
            bar.set_message(transcript.video_id.clone());
        }
        engine
            .ingest_segments(&transcript.video_id, &transcript.segments)
            .with_context(|| format!("Failed to ingest video '{}'", transcript.video_id))?;
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(engine)
}

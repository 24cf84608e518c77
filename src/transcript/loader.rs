// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript file loading.
//!
//! Transcripts live on disk as JSON, either a flat array of segments or a
//! Whisper-style object (`{"segments": [...]}`). The video id comes from an
//! explicit `video_id` field when present, otherwise from the file stem.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use super::Segment;

/// One video's segment stream, as loaded from disk.
#[derive(Debug, Clone)]
pub struct VideoTranscript {
    pub video_id: String,
    pub segments: Vec<Segment>,
}

/// Accepted on-disk transcript shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Object {
        segments: Vec<Segment>,
        #[serde(default)]
        video_id: Option<String>,
    },
    Flat(Vec<Segment>),
}

/// Loads a single transcript JSON file.
pub fn load_transcript(path: &Path) -> Result<VideoTranscript> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    let document: TranscriptDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse transcript JSON: {}", path.display()))?;

    let (segments, video_id) = match document {
        TranscriptDocument::Object { segments, video_id } => (segments, video_id),
        TranscriptDocument::Flat(segments) => (segments, None),
    };

    let video_id = match video_id {
        Some(id) => id,
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if video_id.is_empty() {
        bail!("Cannot determine video id for transcript: {}", path.display());
    }

    debug!(video_id = %video_id, segments = segments.len(), "loaded transcript");
    Ok(VideoTranscript { video_id, segments })
}

/// Scans a directory recursively for `.json` transcripts.
///
/// Results are sorted by path so ingest order, and therefore index tie-break
/// order, is deterministic.
pub fn scan_transcripts(root: &Path) -> Result<Vec<VideoTranscript>> {
    if !root.is_dir() {
        bail!("Transcript path is not a directory: {}", root.display());
    }

    let mut paths: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "json")
        })
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();

    paths.iter().map(|path| load_transcript(path)).collect()
}

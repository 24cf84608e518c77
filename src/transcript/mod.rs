// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript module - segment types, chunking, and transcript file loading
//!
//! A transcript arrives as an ordered stream of timestamped speech segments
//! (the shape Whisper-style transcribers emit). The chunker groups those
//! segments into ~30-second retrieval units; the loader reads segment
//! streams from JSON files on disk.

pub mod chunker;
pub mod loader;

use serde::{Deserialize, Serialize};

pub use chunker::{ChunkConfig, TranscriptChunker, DEFAULT_CHUNK_DURATION};
pub use loader::{load_transcript, scan_transcripts, VideoTranscript};

/// A timestamped unit of transcribed speech, as produced by an external
/// transcriber. Segments for one video arrive in non-decreasing `start`
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the segment, in seconds.
    pub start: f64,
    /// End of the segment, in seconds.
    pub end: f64,
    /// Transcribed text for this segment.
    pub text: String,
}

/// A contiguous span of transcript text, the unit of retrieval.
///
/// Created by the chunker with `embedding` unset, embedded once by the
/// embedding provider, then immutable. The similarity index takes ownership
/// on insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptChunk {
    /// Identifier of the source video.
    pub video_id: String,
    /// Start of the chunk, in seconds.
    pub start_time: f64,
    /// End of the chunk, in seconds.
    pub end_time: f64,
    /// Space-joined text of the contributing segments, in original order.
    pub text: String,
    /// Embedding vector, unit-normalized by the embedding provider.
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<f32>>,
}

impl TranscriptChunk {
    /// Creates an un-embedded chunk.
    pub fn new(video_id: impl Into<String>, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            start_time,
            end_time,
            text: text.into(),
            embedding: None,
        }
    }

    /// Consumes the chunk, attaching an embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

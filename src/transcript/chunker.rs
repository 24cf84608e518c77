// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript chunker.
//!
//! Groups an ordered sequence of timestamped segments into chunks of at most
//! `chunk_duration` seconds, measured from the chunk's first segment start to
//! the closing segment's end. The chunking is greedy and single-pass.

use anyhow::{bail, Result};

use super::{Segment, TranscriptChunk};
use crate::errors::ChunkError;

/// Default chunk duration in seconds.
pub const DEFAULT_CHUNK_DURATION: f64 = 30.0;

/// Configuration for the transcript chunker.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum chunk span in seconds.
    pub chunk_duration: f64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_duration: DEFAULT_CHUNK_DURATION,
        }
    }
}

impl ChunkConfig {
    /// Creates a new ChunkConfig with the given duration.
    pub fn new(chunk_duration: f64) -> Result<Self> {
        if !chunk_duration.is_finite() || chunk_duration <= 0.0 {
            bail!("chunk_duration ({}) must be a positive number of seconds", chunk_duration);
        }
        Ok(Self { chunk_duration })
    }
}

/// Groups transcript segments into fixed-duration chunks.
pub struct TranscriptChunker {
    config: ChunkConfig,
}

impl TranscriptChunker {
    /// Creates a new chunker with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Creates a chunker with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ChunkConfig::default())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Splits one video's segments into chunks.
    ///
    /// A chunk is flushed when the incoming segment's `end` would stretch the
    /// chunk past `chunk_duration`. The flushed chunk's `end_time` is the
    /// incoming segment's `start`, so consecutive chunks are contiguous with
    /// no gaps; only the final chunk uses the true last-segment end. A single
    /// segment longer than `chunk_duration` is never split.
    ///
    /// Empty input produces zero chunks. A segment with `end < start` is a
    /// contract violation.
    pub fn chunk_segments(
        &self,
        video_id: &str,
        segments: &[Segment],
    ) -> std::result::Result<Vec<TranscriptChunk>, ChunkError> {
        let Some(first) = segments.first() else {
            return Ok(Vec::new());
        };

        let mut chunks = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut current_start = first.start;

        for segment in segments {
            if segment.end < segment.start {
                return Err(ChunkError::SegmentEndsBeforeStart {
                    start: segment.start,
                    end: segment.end,
                });
            }

            let text = segment.text.trim();
            if segment.end - current_start > self.config.chunk_duration && !buffer.is_empty() {
                chunks.push(TranscriptChunk::new(
                    video_id,
                    current_start,
                    segment.start,
                    buffer.join(" "),
                ));
                buffer.clear();
                buffer.push(text);
                current_start = segment.start;
            } else {
                // The first segment always lands here since the buffer starts empty.
                buffer.push(text);
            }
        }

        if !buffer.is_empty() {
            let last_end = segments[segments.len() - 1].end;
            chunks.push(TranscriptChunk::new(
                video_id,
                current_start,
                last_end,
                buffer.join(" "),
            ));
        }

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.chunk_duration, 30.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(ChunkConfig::new(30.0).is_ok());
        assert!(ChunkConfig::new(0.0).is_err());
        assert!(ChunkConfig::new(-5.0).is_err());
        assert!(ChunkConfig::new(f64::NAN).is_err());
    }

    #[test]
    fn test_empty_input() {
        let chunker = TranscriptChunker::with_defaults();
        let chunks = chunker.chunk_segments("v", &[]).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_single_segment() {
        let chunker = TranscriptChunker::with_defaults();
        let chunks = chunker
            .chunk_segments("v", &[seg(0.0, 5.0, " hello world ")])
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].video_id, "v");
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(chunks[0].end_time, 5.0);
        assert_eq!(chunks[0].text, "hello world");
        assert!(chunks[0].embedding.is_none());
    }

    #[test]
    fn test_overlong_segment_is_never_split() {
        let chunker = TranscriptChunker::new(ChunkConfig::new(30.0).unwrap());
        let chunks = chunker
            .chunk_segments("v", &[seg(0.0, 95.0, "one very long ramble")])
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(chunks[0].end_time, 95.0);
    }

    #[test]
    fn test_flush_boundary_uses_next_segment_start() {
        let chunker = TranscriptChunker::new(ChunkConfig::new(30.0).unwrap());
        let segments = vec![
            seg(0.0, 10.0, "a"),
            seg(10.0, 20.0, "b"),
            seg(28.0, 35.0, "c"),
            seg(35.0, 40.0, "d"),
        ];

        let chunks = chunker.chunk_segments("v", &segments).unwrap();
        assert_eq!(chunks.len(), 2);

        // "c" closes past the 30s budget, so the first chunk flushes at c's
        // start, not at b's end.
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(chunks[0].end_time, 28.0);
        assert_eq!(chunks[0].text, "a b");

        assert_eq!(chunks[1].start_time, 28.0);
        assert_eq!(chunks[1].end_time, 40.0);
        assert_eq!(chunks[1].text, "c d");
    }

    #[test]
    fn test_chunks_are_contiguous() {
        let chunker = TranscriptChunker::new(ChunkConfig::new(20.0).unwrap());
        let segments: Vec<Segment> = (0..10)
            .map(|i| seg(i as f64 * 7.0, i as f64 * 7.0 + 7.0, "w"))
            .collect();

        let chunks = chunker.chunk_segments("v", &segments).unwrap();
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }

    #[test]
    fn test_text_fidelity() {
        let chunker = TranscriptChunker::new(ChunkConfig::new(15.0).unwrap());
        let segments = vec![
            seg(0.0, 8.0, " alpha "),
            seg(8.0, 16.0, "beta"),
            seg(16.0, 24.0, "gamma "),
            seg(24.0, 32.0, " delta"),
        ];

        let chunks = chunker.chunk_segments("v", &segments).unwrap();
        let joined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined, "alpha beta gamma delta");
    }

    #[test]
    fn test_malformed_segment_is_rejected() {
        let chunker = TranscriptChunker::with_defaults();
        let err = chunker
            .chunk_segments("v", &[seg(10.0, 4.0, "backwards")])
            .unwrap_err();
        assert_eq!(
            err,
            ChunkError::SegmentEndsBeforeStart {
                start: 10.0,
                end: 4.0
            }
        );
    }
}

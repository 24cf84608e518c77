// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory similarity index over transcript chunks.
//!
//! The index owns an ordered list of chunk records and a parallel vector
//! store, kept in lockstep; positions never leave this module. Queries are
//! exact brute-force scans scored by plain dot product, which is cosine
//! similarity under the precondition that the embedding provider emits
//! unit-norm vectors. The index performs no normalization of its own.
//!
//! The corpus dimension is fixed by the first embedded chunk ever inserted;
//! every later vector must match it.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::errors::IndexError;
use crate::output::format_timestamp;
use crate::transcript::TranscriptChunk;

/// A chunk matched by a query, with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a TranscriptChunk,
    pub score: f32,
}

/// Summary information for one video in the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    /// Largest chunk `end_time` for the video, in seconds.
    pub total_duration: f64,
    pub chunk_count: usize,
    /// `total_duration` rendered as `MM:SS`.
    pub duration_formatted: String,
}

/// In-memory store of embedded transcript chunks, queryable by inner
/// product.
#[derive(Debug, Default)]
pub struct SimilarityIndex {
    chunks: Vec<TranscriptChunk>,
    vectors: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

impl SimilarityIndex {
    /// Creates an empty index. The dimension is fixed by the first insert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The corpus vector dimension, once fixed.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Appends embedded chunks to the index. Chunks without an embedding are
    /// skipped. Returns the number of chunks actually indexed.
    ///
    /// The whole batch is validated before anything is appended, so a
    /// dimension mismatch anywhere in the batch leaves the index untouched.
    /// Inserting the same chunk twice yields two entries; there is no
    /// de-duplication.
    pub fn insert(&mut self, chunks: Vec<TranscriptChunk>) -> Result<usize, IndexError> {
        let mut expected = self.dimension;
        for chunk in &chunks {
            if let Some(vector) = &chunk.embedding {
                match expected {
                    Some(dim) if vector.len() != dim => {
                        return Err(IndexError::DimensionMismatch {
                            expected: dim,
                            actual: vector.len(),
                        });
                    }
                    Some(_) => {}
                    None => expected = Some(vector.len()),
                }
            }
        }

        let before = self.chunks.len();
        for chunk in chunks {
            let Some(vector) = chunk.embedding.clone() else {
                continue;
            };
            self.vectors.push(vector);
            self.chunks.push(chunk);
        }
        self.dimension = expected;

        let inserted = self.chunks.len() - before;
        debug!(inserted, total = self.chunks.len(), "indexed chunks");
        Ok(inserted)
    }

    /// Returns up to `k` chunks ranked by descending dot product with
    /// `query_vector`. Ties are broken by insertion order, earlier first.
    /// An empty index yields an empty result, never an error.
    pub fn query(&self, query_vector: &[f32], k: usize) -> Result<Vec<ScoredChunk<'_>>, IndexError> {
        self.rank(query_vector, k, |_| true)
    }

    /// Like [`query`](Self::query), restricted to one video.
    ///
    /// Scores are computed directly over the filtered view; the relative
    /// order of the video's chunks is preserved, so the ranking matches
    /// running an unscoped query and filtering. A video with no chunks
    /// yields an empty result.
    pub fn query_scoped(
        &self,
        video_id: &str,
        query_vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredChunk<'_>>, IndexError> {
        if !self.chunks.iter().any(|chunk| chunk.video_id == video_id) {
            return Ok(Vec::new());
        }
        self.rank(query_vector, k, |chunk| chunk.video_id == video_id)
    }

    fn rank<'a, F>(
        &'a self,
        query_vector: &[f32],
        k: usize,
        keep: F,
    ) -> Result<Vec<ScoredChunk<'a>>, IndexError>
    where
        F: Fn(&TranscriptChunk) -> bool,
    {
        let Some(dimension) = self.dimension else {
            return Ok(Vec::new());
        };
        if query_vector.len() != dimension {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: query_vector.len(),
            });
        }

        let mut scored: Vec<ScoredChunk<'a>> = self
            .chunks
            .iter()
            .zip(self.vectors.iter())
            .filter(|&(chunk, _)| keep(chunk))
            .map(|(chunk, vector)| ScoredChunk {
                chunk,
                score: dot(query_vector, vector),
            })
            .collect();

        // Stable sort: equal scores keep insertion order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// Summary for one video, or `None` if the index has no chunks for it.
    pub fn summary(&self, video_id: &str) -> Option<VideoSummary> {
        let mut total_duration = f64::NEG_INFINITY;
        let mut chunk_count = 0;
        for chunk in self.chunks.iter().filter(|c| c.video_id == video_id) {
            total_duration = total_duration.max(chunk.end_time);
            chunk_count += 1;
        }
        if chunk_count == 0 {
            return None;
        }

        Some(VideoSummary {
            video_id: video_id.to_string(),
            total_duration,
            chunk_count,
            duration_formatted: format_timestamp(total_duration),
        })
    }

    /// All video ids present in the index. Order is not significant.
    pub fn video_ids(&self) -> HashSet<String> {
        self.chunks
            .iter()
            .map(|chunk| chunk.video_id.clone())
            .collect()
    }

    /// All chunks for one video, in insertion order.
    pub fn chunks_for_video(&self, video_id: &str) -> Vec<&TranscriptChunk> {
        self.chunks
            .iter()
            .filter(|chunk| chunk.video_id == video_id)
            .collect()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

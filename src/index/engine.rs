// SPDX-License-Identifier: MIT OR Apache-2.0

//! Video search engine facade.
//!
//! Owns the embedding provider, the chunker, and the similarity index, and
//! exposes the text-level operations the CLI consumes: ingest a segment
//! stream, search the whole corpus or one video, summarize videos.
//!
//! Everything here is synchronous and single-threaded; the corpus is built
//! once per invocation and then queried.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::store::{ScoredChunk, SimilarityIndex, VideoSummary};
use crate::embedding::EmbeddingProvider;
use crate::output::format_timestamp;
use crate::transcript::{Segment, TranscriptChunk, TranscriptChunker};

/// One search hit, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub video_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub similarity_score: f32,
    /// `start_time` rendered as `MM:SS`.
    pub timestamp_formatted: String,
}

impl SearchResult {
    fn from_scored(scored: ScoredChunk<'_>) -> Self {
        Self {
            video_id: scored.chunk.video_id.clone(),
            start_time: scored.chunk.start_time,
            end_time: scored.chunk.end_time,
            text: scored.chunk.text.clone(),
            similarity_score: scored.score,
            timestamp_formatted: format_timestamp(scored.chunk.start_time),
        }
    }
}

/// Transcript search engine over an in-memory similarity index.
pub struct VideoSearchEngine {
    provider: Box<dyn EmbeddingProvider>,
    chunker: TranscriptChunker,
    index: SimilarityIndex,
}

impl VideoSearchEngine {
    /// Creates an engine with an empty index.
    pub fn new(provider: Box<dyn EmbeddingProvider>, chunker: TranscriptChunker) -> Self {
        Self {
            provider,
            chunker,
            index: SimilarityIndex::new(),
        }
    }

    /// Read-only access to the underlying index.
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Embeds any chunk still missing a vector, then indexes the batch.
    /// Returns the number of chunks indexed.
    pub fn add_chunks(&mut self, mut chunks: Vec<TranscriptChunk>) -> Result<usize> {
        let pending: Vec<String> = chunks
            .iter()
            .filter(|chunk| chunk.embedding.is_none())
            .map(|chunk| chunk.text.clone())
            .collect();

        if !pending.is_empty() {
            let mut vectors = self
                .provider
                .embed_texts(&pending)
                .context("Failed to embed chunk texts")?
                .into_iter();
            for chunk in chunks.iter_mut().filter(|chunk| chunk.embedding.is_none()) {
                chunk.embedding = vectors.next();
            }
        }

        Ok(self.index.insert(chunks)?)
    }

    /// Full pipeline for one video: chunk the segment stream, embed, index.
    /// Returns the number of chunks indexed.
    pub fn ingest_segments(&mut self, video_id: &str, segments: &[Segment]) -> Result<usize> {
        let chunks = self.chunker.chunk_segments(video_id, segments)?;
        let indexed = self.add_chunks(chunks)?;
        info!(video_id, indexed, "ingested transcript");
        Ok(indexed)
    }

    /// Searches the whole corpus for the chunks most similar to `query`.
    pub fn search(&mut self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }
        let query_vector = self
            .provider
            .embed_one(query)
            .context("Failed to embed query")?;
        let scored = self.index.query(&query_vector, top_k)?;
        Ok(scored.into_iter().map(SearchResult::from_scored).collect())
    }

    /// Searches within a single video. Unknown videos yield no results.
    pub fn search_by_video(
        &mut self,
        video_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        if self.index.chunks_for_video(video_id).is_empty() {
            return Ok(Vec::new());
        }
        let query_vector = self
            .provider
            .embed_one(query)
            .context("Failed to embed query")?;
        let scored = self.index.query_scoped(video_id, &query_vector, top_k)?;
        Ok(scored.into_iter().map(SearchResult::from_scored).collect())
    }

    /// Summary for one video, or `None` if the engine has never seen it.
    pub fn get_video_summary(&self, video_id: &str) -> Option<VideoSummary> {
        self.index.summary(video_id)
    }

    /// All known video ids, sorted for stable output.
    pub fn get_all_videos(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.index.video_ids().into_iter().collect();
        ids.sort();
        ids
    }

    /// All chunks for one video, in insertion order.
    pub fn chunks_for_video(&self, video_id: &str) -> Vec<&TranscriptChunk> {
        self.index.chunks_for_video(video_id)
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index module - in-memory similarity index and the search engine facade
//!
//! The index stores embedded transcript chunks and answers exact top-k
//! nearest-neighbor queries by inner product. The engine wires the index to
//! an embedding provider and exposes the text-level search surface.

pub mod engine;
pub mod store;

pub use engine::{SearchResult, VideoSearchEngine};
pub use store::{ScoredChunk, SimilarityIndex, VideoSummary};

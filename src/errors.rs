// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed errors for the vidgrep core.
//!
//! Only contract violations are errors here. Asking about a video the index
//! has never seen, or querying an empty index, are normal outcomes and are
//! reported as `None` / empty result sets by the callers.

use thiserror::Error;

/// Errors from the similarity index.
#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    /// A vector's length disagrees with the corpus-fixed dimension.
    ///
    /// Not recoverable locally; the embedding pipeline is producing vectors
    /// of the wrong size.
    #[error("embedding dimension mismatch: index stores {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors from transcript chunking.
#[derive(Debug, Error, PartialEq)]
pub enum ChunkError {
    /// A segment claims to end before it starts.
    #[error("segment starting at {start:.2}s ends at {end:.2}s, before it starts")]
    SegmentEndsBeforeStart { start: f64, end: f64 },
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding module - turns chunk text into vectors for the similarity index
//!
//! Providers are explicitly passed capability objects, so the search engine
//! can be exercised with a deterministic fake in tests. Every provider is
//! expected to emit unit-norm vectors; the index scores by plain dot product
//! and performs no normalization of its own.

pub mod provider;

pub use provider::{
    create_provider, l2_normalize, CommandProvider, DummyProvider, EmbeddingProvider,
    FastEmbedder, DEFAULT_EMBEDDING_DIM,
};

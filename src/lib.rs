// SPDX-License-Identifier: MIT OR Apache-2.0

//! vidgrep - Semantic search over spoken-video transcripts
//!
//! Shared modules for the vidgrep CLI tool.

pub mod config;
pub mod embedding;
pub mod errors;
pub mod index;
pub mod output;
pub mod transcript;

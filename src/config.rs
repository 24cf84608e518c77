// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for vidgrep
//!
//! Loads configuration from .vidgreprc.toml in the transcript root or
//! ~/.config/vidgrep/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::embedding::DEFAULT_EMBEDDING_DIM;
use crate::transcript::DEFAULT_CHUNK_DURATION;

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = ".vidgreprc.toml";

const DEFAULT_TOP_K: usize = 5;
const DEFAULT_BATCH_SIZE: usize = 256;
const DEFAULT_MAX_CHARS: usize = 2000;

/// Embedding provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    /// fastembed running all-MiniLM-L6-v2 in-process
    #[default]
    Builtin,
    /// External command fed a JSON payload on stdin
    Command,
    /// Zero vectors, for tests and plumbing checks
    Dummy,
}

/// Search configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default number of results per query
    pub top_k: Option<usize>,
}

impl SearchConfig {
    /// Get the default result count (defaults to 5)
    pub fn top_k(&self) -> usize {
        self.top_k.unwrap_or(DEFAULT_TOP_K)
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider type (builtin, command, dummy)
    pub provider: Option<EmbeddingProviderType>,
    /// Model identifier for the embedding provider
    pub model: Option<String>,
    /// Command to execute for the command provider
    pub command: Option<String>,
    /// Number of texts embedded per provider call
    pub batch_size: Option<usize>,
    /// Maximum characters of chunk text sent to the provider
    pub max_chars: Option<usize>,
    /// Vector dimension for the dummy provider
    pub dimension: Option<usize>,
}

impl EmbeddingConfig {
    /// Get provider type (defaults to Builtin)
    pub fn provider(&self) -> EmbeddingProviderType {
        self.provider.unwrap_or_default()
    }

    /// Get model identifier (defaults to "minilm")
    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| "minilm".to_string())
    }

    /// Get the external embedding command, if configured
    pub fn command(&self) -> Option<String> {
        self.command.clone()
    }

    /// Get batch size (defaults to 256)
    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    /// Get max characters per embedded text (defaults to 2000)
    pub fn max_chars(&self) -> usize {
        self.max_chars.unwrap_or(DEFAULT_MAX_CHARS)
    }

    /// Get dummy provider dimension (defaults to 384)
    pub fn dimension(&self) -> usize {
        self.dimension.unwrap_or(DEFAULT_EMBEDDING_DIM)
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk span in seconds
    pub chunk_duration: Option<f64>,
}

impl ChunkingConfig {
    /// Get chunk duration (defaults to 30.0 seconds)
    pub fn chunk_duration(&self) -> f64 {
        self.chunk_duration.unwrap_or(DEFAULT_CHUNK_DURATION)
    }
}

/// Top-level vidgrep configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Loads configuration for a transcript root, falling back to the
    /// user-level config file and then defaults. Parse errors are logged
    /// and treated as "no config".
    pub fn load_at(root: &Path) -> Self {
        let mut candidates = vec![root.join(CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("vidgrep").join("config.toml"));
        }

        for path in candidates {
            match Self::load_from(&path) {
                Ok(Some(config)) => return config,
                Ok(None) => continue,
                Err(err) => {
                    warn!("Ignoring config {}: {err:#}", path.display());
                }
            }
        }

        Self::default()
    }

    fn load_from(path: &PathBuf) -> anyhow::Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(Some(config))
    }
}

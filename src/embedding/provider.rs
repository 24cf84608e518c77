// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider interface and implementations.
//!
//! The builtin provider runs all-MiniLM-L6-v2 through fastembed on the CPU.
//! The command provider shells out to an arbitrary external embedder, which
//! keeps vidgrep usable where the onnx runtime is unavailable.

use anyhow::{bail, Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use serde_json::Value;
use std::borrow::Cow;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::{EmbeddingConfig, EmbeddingProviderType};

/// Embedding dimension of all-MiniLM-L6-v2, the default model.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

const DEFAULT_MODEL_ID: &str = "minilm";

/// Trait for embedding providers.
///
/// Contract: for a fixed model, results are deterministic and every vector
/// has the same length for the life of the process. Vectors must be
/// unit-norm; the similarity index relies on this for cosine scoring.
pub trait EmbeddingProvider: Send {
    /// Returns the model identifier.
    fn model_id(&self) -> &str;

    /// Returns the batch size used by the provider.
    fn batch_size(&self) -> usize;

    /// Generates embeddings for the given texts, one vector per text.
    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Generates an embedding for a single text.
    fn embed_one(&mut self, text: &str) -> Result<Vec<f32>> {
        let mut result = self.embed_texts(&[text.to_string()])?;
        result
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No embedding returned"))
    }
}

/// Builds the provider selected by the embedding configuration.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider() {
        EmbeddingProviderType::Builtin => Ok(Box::new(FastEmbedder::new(config)?)),
        EmbeddingProviderType::Command => {
            let command = config
                .command()
                .context("embedding.command must be set for the command provider")?;
            Ok(Box::new(CommandProvider::new(
                command,
                config.model(),
                config.batch_size(),
            )))
        }
        EmbeddingProviderType::Dummy => Ok(Box::new(DummyProvider::new(config.dimension()))),
    }
}

/// FastEmbed provider using sentence-transformers/all-MiniLM-L6-v2.
pub struct FastEmbedder {
    embedder: TextEmbedding,
    model_id: String,
    batch_size: usize,
    max_chars: usize,
}

impl FastEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model_id = config.model();
        let model = parse_model(&model_id)?;
        let embedder = TextEmbedding::try_new(InitOptions::new(model))
            .context("Failed to initialize fastembed model")?;

        Ok(Self {
            embedder,
            model_id,
            batch_size: config.batch_size(),
            max_chars: config.max_chars(),
        })
    }
}

impl EmbeddingProvider for FastEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let prepared: Vec<Cow<'_, str>> = texts
            .iter()
            .map(|text| truncate_to_chars(text, self.max_chars))
            .collect();
        let mut embeddings = self.embedder.embed(&prepared, Some(self.batch_size))?;

        for embedding in embeddings.iter_mut() {
            l2_normalize(embedding);
        }

        Ok(embeddings)
    }
}

/// Command provider that pipes a JSON payload through an external process.
///
/// Input on stdin: `{"model": ..., "texts": [...]}`. Output on stdout:
/// either a JSON array of vectors or an object with an `embeddings` or
/// `vectors` field.
pub struct CommandProvider {
    command: String,
    model: String,
    batch_size: usize,
}

impl CommandProvider {
    pub fn new(command: String, model: String, batch_size: usize) -> Self {
        Self {
            command,
            model,
            batch_size,
        }
    }

    fn run_command(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let payload = serde_json::json!({
            "model": self.model,
            "texts": texts,
        });

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn embedding command: {}", self.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.to_string().as_bytes())
                .context("Failed to write embedding payload to stdin")?;
        }

        let output = child
            .wait_with_output()
            .context("Failed to read embedding command output")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Embedding command failed (status {}): {}",
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed: Value = serde_json::from_str(stdout.trim())
            .context("Failed to parse embedding command output as JSON")?;

        let rows = match &parsed {
            Value::Array(_) => &parsed,
            Value::Object(obj) => obj
                .get("embeddings")
                .or_else(|| obj.get("vectors"))
                .ok_or_else(|| anyhow::anyhow!("Embedding output missing 'embeddings' field"))?,
            _ => bail!("Embedding output must be a JSON array or object"),
        };

        let mut vectors = rows
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Embedding output must be a JSON array"))?
            .iter()
            .map(parse_vector)
            .collect::<Result<Vec<Vec<f32>>>>()?;

        for vector in vectors.iter_mut() {
            l2_normalize(vector);
        }

        Ok(vectors)
    }
}

impl EmbeddingProvider for CommandProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size.max(1)) {
            vectors.extend(self.run_command(batch)?);
        }
        Ok(vectors)
    }
}

/// Dummy provider that returns zero vectors (for tests and CLI plumbing).
pub struct DummyProvider {
    model: String,
    dimension: usize,
}

impl DummyProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            model: "dummy".to_string(),
            dimension,
        }
    }
}

impl EmbeddingProvider for DummyProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn batch_size(&self) -> usize {
        64
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.0; self.dimension]).collect())
    }
}

/// Scales a vector to unit L2 norm. Zero vectors are left as-is.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
}

fn parse_vector(row: &Value) -> Result<Vec<f32>> {
    row.as_array()
        .ok_or_else(|| anyhow::anyhow!("Embedding row must be an array"))?
        .iter()
        .map(|value| {
            value
                .as_f64()
                .map(|v| v as f32)
                .ok_or_else(|| anyhow::anyhow!("Embedding value must be a number"))
        })
        .collect()
}

fn parse_model(model_id: &str) -> Result<EmbeddingModel> {
    match model_id.trim().to_lowercase().as_str() {
        "" | "minilm" | "all-minilm-l6-v2" | "sentence-transformers/all-minilm-l6-v2" => {
            Ok(EmbeddingModel::AllMiniLML6V2)
        }
        other => bail!(
            "Unsupported embedding model '{}'. Supported value: {}",
            other,
            DEFAULT_MODEL_ID
        ),
    }
}

fn truncate_to_chars(input: &str, max_chars: usize) -> Cow<'_, str> {
    if max_chars == 0 {
        return Cow::Borrowed("");
    }

    let mut count = 0;
    for (idx, _) in input.char_indices() {
        if count == max_chars {
            return Cow::Owned(input[..idx].to_string());
        }
        count += 1;
    }

    Cow::Borrowed(input)
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// vidgrep - Semantic search over spoken-video transcripts
///
/// Ingests timestamped transcript JSON files, chunks them into ~30-second
/// spans, and finds the moments most similar to a free-text query.
#[derive(Parser, Debug)]
#[command(name = "vidgrep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search transcripts for moments similar to a query
    #[command(alias = "s")]
    Search {
        /// Search query (natural language)
        query: String,

        /// Transcript directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Maximum number of results
        #[arg(short = 'k', long = "top-k")]
        top_k: Option<usize>,

        /// Restrict the search to one video id
        #[arg(long)]
        video: Option<String>,

        /// Suppress the ingest progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show summary and chunk listing for one video
    Video {
        /// Video id (transcript file stem unless overridden in the file)
        video_id: String,

        /// Transcript directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Suppress the ingest progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List all videos found in the transcript directory
    List {
        /// Transcript directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Suppress the ingest progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

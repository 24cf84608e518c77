// SPDX-License-Identifier: MIT OR Apache-2.0

//! vidgrep - Semantic search over spoken-video transcripts
//!
//! Chunks timestamped transcripts into ~30-second spans, embeds them, and
//! answers similarity queries from an in-memory index.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing with VIDGREP_LOG env var (e.g., VIDGREP_LOG=debug vidgrep search "query")
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VIDGREP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();

    match cli.command {
        Commands::Search {
            query,
            path,
            top_k,
            video,
            quiet,
        } => {
            commands::search::run(
                &query,
                path.as_deref(),
                top_k,
                video.as_deref(),
                quiet,
                format,
            )?;
        }
        Commands::Video {
            video_id,
            path,
            quiet,
        } => {
            commands::video::run(&video_id, path.as_deref(), quiet, format)?;
        }
        Commands::List { path, quiet } => {
            commands::list::run(path.as_deref(), quiet, format)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vidgrep", &mut std::io::stdout());
        }
    }

    Ok(())
}

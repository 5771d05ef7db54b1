//! Command-line interface wiring for genderlex.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod recommend;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Gendered-word recommendations and document analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Recommend(args) => recommend::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API and landing page.
    Serve(serve::Args),
    /// Print words similar to WORD as JSON.
    Recommend(recommend::Args),
    /// Highlight gendered words in a document and print the result as JSON.
    Analyze(analyze::Args),
}

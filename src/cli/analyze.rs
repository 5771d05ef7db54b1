//! CLI entry-point for analysing a document.

use std::{io::Read, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, lexicon::Lexicon, nlp};

/// Args for the `analyze` command. Reads stdin when neither TEXT nor `--file` is given.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Document text.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the document from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => nlp::read_text(&path)?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read document from stdin")?;
            buf
        }
    };
    let lexicon = Lexicon::load(&settings)?;
    let analysis = lexicon.analyze(&text)?;
    info!(flagged = analysis.gendered_words.len(), "analyzed document");
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

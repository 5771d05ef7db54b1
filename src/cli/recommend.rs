//! CLI entry-point for one-off recommendations.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::types::RecommendResponse,
    config::Settings,
    data::LexiconFilter,
    lexicon::{Lexicon, RecommendQuery},
};

/// Args for the `recommend` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Word or phrase; spaces and underscores both separate phrase parts.
    pub word: String,
    /// Number of recommendations.
    #[arg(long)]
    pub topn: Option<usize>,
    /// Gender categories to keep, e.g. `female,strongly_female`.
    #[arg(long, value_delimiter = ',')]
    pub gender: Vec<String>,
    /// Part-of-speech tags to keep, e.g. `NOUN,ADJ`.
    #[arg(long, value_delimiter = ',')]
    pub pos: Vec<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let query = RecommendQuery {
        filter: LexiconFilter::from_parts(&args.gender, &args.pos)?,
        word: args.word,
        topn: args.topn,
    };
    let lexicon = Lexicon::load(&settings)?;
    let recommendations = lexicon.recommend(&query)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&RecommendResponse { recommendations })?
    );
    Ok(())
}

//! Gendered-word recommendations and document analysis over a word-embedding model.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod lexicon;
pub mod logging;
pub mod nlp;
#[cfg(feature = "askama")]
pub mod ui;

pub use config::Settings;
pub use error::LexiconError;
pub use lexicon::{Analysis, GenderedWord, Lexicon, RecommendQuery, Recommendation};

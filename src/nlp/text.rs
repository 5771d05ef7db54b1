//! Tokenization, stop-word removal and stemming of raw documents.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;
use stop_words::LANGUAGE;

use super::phrases::Phraser;

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"page [0-9]+ of [0-9]+").expect("valid regex"));
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://|www\.|t\.co|ftp://)[^\s]*").expect("valid regex")
});
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("valid regex")
});
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w{2,}\b").expect("valid regex"));

/// A surface token (possibly a joined bigram) paired with its stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedToken {
    pub stem: String,
    pub word: String,
}

/// Stem a word or `_`/space separated phrase part by part.
pub fn stem_phrase(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| STEMMER.stem(part).into_owned())
        .collect::<Vec<_>>()
        .join("_")
}

/// Read a document from disk, joining its lines with a space.
pub fn read_text(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read document {}", path.display()))?;
    Ok(raw.lines().collect::<Vec<_>>().join(" "))
}

/// Document pipeline: clean, tokenize, join bigrams, drop stop words, stem.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    stop_words: HashSet<String>,
    phraser: Phraser,
}

impl TextProcessor {
    pub fn new(phraser: Phraser) -> Self {
        let stop_words = stop_words::get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_string().to_lowercase())
            .collect();
        Self {
            stop_words,
            phraser,
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Lower-cased tokens of three or more word characters, noise removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = text.replace('\n', " ").to_lowercase();
        let text = PAGE_MARKER.replace_all(&text, "");
        let text = URL.replace_all(&text, "");
        let text = EMAIL.replace_all(&text, "");
        TOKEN
            .find_iter(text.trim())
            .map(|m| m.as_str())
            .filter(|token| !token.starts_with(|c: char| c.is_ascii_digit()))
            .map(str::to_string)
            .collect()
    }

    pub fn process(&self, text: &str) -> Vec<ProcessedToken> {
        self.phraser
            .apply(self.tokenize(text))
            .into_iter()
            .filter(|token| !self.is_stop_word(token))
            .map(|word| ProcessedToken {
                stem: stem_phrase(&word),
                word,
            })
            .collect()
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(Phraser::default())
    }
}

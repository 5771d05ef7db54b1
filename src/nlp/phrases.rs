//! Bigram phraser collapsing statistically associated token pairs.

use std::{collections::HashSet, io::Read, path::Path};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct PhraseRow {
    phrase: String,
    #[serde(default)]
    score: Option<f32>,
}

/// Known `(first, second)` pairs joined as `first_second`.
#[derive(Debug, Clone, Default)]
pub struct Phraser {
    pairs: HashSet<(String, String)>,
}

impl Phraser {
    /// Load a `phrase,score` CSV table. A missing file gives an empty phraser.
    pub fn from_path(path: &Path, threshold: f32) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "bigram phrase table missing; phrases will not be joined");
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path)
            .with_context(|| format!("open phrase table {}", path.display()))?;
        let phraser = Self::from_reader(file, threshold)
            .with_context(|| format!("parse phrase table {}", path.display()))?;
        info!(path = %path.display(), phrases = phraser.len(), "loaded bigram phrases");
        Ok(phraser)
    }

    pub fn from_reader<R: Read>(reader: R, threshold: f32) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut pairs = HashSet::new();
        for result in reader.deserialize::<PhraseRow>() {
            let row = result?;
            if row.score.is_some_and(|score| score <= threshold) {
                continue;
            }
            if let Some(pair) = split_phrase(&row.phrase) {
                pairs.insert(pair);
            }
        }
        Ok(Self { pairs })
    }

    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pairs = phrases
            .into_iter()
            .filter_map(|p| split_phrase(p.as_ref()))
            .collect();
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Join known pairs left to right; a token is consumed by at most one phrase.
    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        if self.pairs.is_empty() || tokens.len() < 2 {
            return tokens;
        }
        let mut out = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();
        while let Some(current) = iter.next() {
            let joined = match iter.peek() {
                Some(next) if self.pairs.contains(&(current.clone(), next.clone())) => {
                    Some(format!("{current}_{next}"))
                }
                _ => None,
            };
            match joined {
                Some(phrase) => {
                    iter.next();
                    out.push(phrase);
                }
                None => out.push(current),
            }
        }
        out
    }
}

fn split_phrase(phrase: &str) -> Option<(String, String)> {
    let phrase = phrase.trim().to_lowercase().replace(' ', "_");
    let (first, second) = phrase.split_once('_')?;
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first.to_string(), second.to_string()))
}

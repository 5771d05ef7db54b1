//! Recommendation and document-analysis engine over the model and the stem table.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::Settings,
    data::{self, LexiconFilter, StemEntry, StemStore},
    error::LexiconError,
    nlp::{self, EmbeddingModel, Phraser, ProcessedToken, TextProcessor},
};

/// A recommendation request after parameter parsing.
#[derive(Debug, Clone, Default)]
pub struct RecommendQuery {
    pub word: String,
    pub topn: Option<usize>,
    pub filter: LexiconFilter,
}

/// A surface word of a recommended stem, underscores rendered as spaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordVariant {
    pub word: String,
    pub pos: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub stem: String,
    pub similarity: f32,
    pub words: Vec<WordVariant>,
}

/// A document token whose stem carries a non-neutral category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderedWord {
    pub stem: String,
    pub word: String,
    pub pos: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub highlighted_text: String,
    pub gendered_words: Vec<GenderedWord>,
}

/// Shared read-only artefacts answering both endpoints.
pub struct Lexicon {
    store: Arc<dyn StemStore>,
    model: EmbeddingModel,
    processor: TextProcessor,
    candidate_pool: usize,
    default_topn: usize,
    max_topn: usize,
}

impl Lexicon {
    /// Load every artefact named by `settings`.
    pub fn load(settings: &Settings) -> Result<Self> {
        let store = data::open_store(&settings.stem_map)?;
        let model = EmbeddingModel::from_path(&settings.embedding_model)?;
        let phraser = Phraser::from_path(&settings.bigram_phrases, settings.phrase_threshold)?;
        let lexicon = Self::new(store, model, TextProcessor::new(phraser), settings);
        info!(
            vocabulary = lexicon.model.len(),
            entries = lexicon.store.len()?,
            "lexicon ready"
        );
        Ok(lexicon)
    }

    pub fn new(
        store: Arc<dyn StemStore>,
        model: EmbeddingModel,
        processor: TextProcessor,
        settings: &Settings,
    ) -> Self {
        Self {
            store,
            model,
            processor,
            candidate_pool: settings.candidate_pool.max(1),
            default_topn: settings.default_topn.max(1),
            max_topn: settings.max_topn.max(1),
        }
    }

    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    pub fn store(&self) -> &dyn StemStore {
        self.store.as_ref()
    }

    /// Nearest stems to `query.word`, optionally restricted by gender and pos.
    pub fn recommend(&self, query: &RecommendQuery) -> Result<Vec<Recommendation>> {
        let topn = self.resolve_topn(query.topn)?;
        let stem = nlp::stem_phrase(&query.word);
        if stem.is_empty() {
            return Err(LexiconError::invalid("word must not be empty").into());
        }
        debug!(%stem, topn, filter = ?query.filter, "recommend");

        if query.filter.is_empty() {
            return self
                .model
                .most_similar(&stem, topn)?
                .into_iter()
                .map(|(neighbour, score)| self.recommendation(neighbour, score))
                .collect();
        }

        let pool = self.candidate_pool.max(topn);
        let allowed = self.store.stems_matching(&query.filter)?;
        let mut out = Vec::with_capacity(topn);
        for (neighbour, score) in self.model.most_similar(&stem, pool)? {
            if !allowed.contains(&neighbour) {
                continue;
            }
            out.push(self.recommendation(neighbour, score)?);
            if out.len() == topn {
                break;
            }
        }
        Ok(out)
    }

    /// Clean, tokenize, phrase and stem a document.
    pub fn process_text(&self, text: &str) -> Vec<ProcessedToken> {
        self.processor.process(text)
    }

    /// Tokens whose stem is categorised as anything but `neutral`.
    pub fn gendered_words(&self, tokens: &[ProcessedToken]) -> Result<Vec<GenderedWord>> {
        let mut out = Vec::new();
        for token in tokens {
            let Some(category) = self.store.category_for_stem(&token.stem)? else {
                continue;
            };
            if category.is_empty() || category == "neutral" {
                continue;
            }
            out.push(GenderedWord {
                stem: token.stem.clone(),
                word: token.word.clone(),
                pos: self.store.pos_for_word(&token.word)?,
                category,
            });
        }
        Ok(out)
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let tokens = self.process_text(text);
        let gendered_words = self.gendered_words(&tokens)?;
        let highlighted_text = nlp::highlight_gendered_words(text, &gendered_words)?;
        debug!(
            tokens = tokens.len(),
            flagged = gendered_words.len(),
            "analyzed document"
        );
        Ok(Analysis {
            highlighted_text,
            gendered_words,
        })
    }

    fn resolve_topn(&self, requested: Option<usize>) -> Result<usize, LexiconError> {
        match requested {
            None => Ok(self.default_topn.min(self.max_topn)),
            Some(0) => Err(LexiconError::invalid("topn must be at least 1")),
            Some(n) => Ok(n.min(self.max_topn)),
        }
    }

    fn recommendation(&self, stem: String, score: f32) -> Result<Recommendation> {
        let words = self
            .store
            .entries_for_stem(&stem)?
            .into_iter()
            .map(WordVariant::from)
            .collect();
        Ok(Recommendation {
            stem,
            similarity: (score * 1000.0).round() / 1000.0,
            words,
        })
    }
}

impl From<StemEntry> for WordVariant {
    fn from(entry: StemEntry) -> Self {
        WordVariant {
            word: entry.word.replace('_', " "),
            pos: entry.pos.replace('_', " "),
            category: entry.category.replace('_', " "),
        }
    }
}

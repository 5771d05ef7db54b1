//! Domain errors callers need to tell apart from plain I/O failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("word '{word}' not in vocabulary{}", suggestion_hint(.suggestion))]
    UnknownWord {
        word: String,
        suggestion: Option<String>,
    },
    #[error("{0}")]
    InvalidInput(String),
}

impl LexiconError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(word) => format!(" (did you mean '{word}'?)"),
        None => String::new(),
    }
}

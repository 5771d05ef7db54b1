//! Runtime configuration utilities for genderlex.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for the read-only model artefacts.
    pub data_dir: PathBuf,
    /// Word-vector model (`.vec` text or `.bin` word2vec binary).
    pub embedding_model: PathBuf,
    /// Stem lookup table (CSV, or SQLite when built with `sqlite`).
    pub stem_map: PathBuf,
    /// Bigram phrase table; optional at runtime.
    pub bigram_phrases: PathBuf,
    /// Phrases scoring at or below this are ignored.
    pub phrase_threshold: f32,
    /// Documents reachable through the `path` field of `/analyze_document`.
    pub documents_dir: PathBuf,
    /// Neighbours scanned before gender/pos filtering.
    pub candidate_pool: usize,
    /// Recommendations returned when the request names no `topn`.
    pub default_topn: usize,
    /// Upper bound on requested `topn`.
    pub max_topn: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let mut settings = Self::with_data_dir(data_dir);

        if let Ok(path) = env::var("EMBEDDING_MODEL") {
            settings.embedding_model = PathBuf::from(path);
        }
        if let Ok(path) = env::var("STEM_MAP") {
            settings.stem_map = PathBuf::from(path);
        }
        if let Ok(path) = env::var("BIGRAM_PHRASES") {
            settings.bigram_phrases = PathBuf::from(path);
        }
        if let Ok(path) = env::var("DOCUMENTS_DIR") {
            settings.documents_dir = PathBuf::from(path);
        }
        settings.phrase_threshold = parse_var("PHRASE_THRESHOLD", settings.phrase_threshold);
        settings.candidate_pool = parse_var("CANDIDATE_POOL", settings.candidate_pool);
        settings.default_topn = parse_var("DEFAULT_TOPN", settings.default_topn);
        settings.max_topn = parse_var("MAX_TOPN", settings.max_topn);

        if settings.max_topn == 0 {
            anyhow::bail!("MAX_TOPN must be at least 1");
        }
        Ok(settings)
    }

    /// Default layout rooted at `data_dir`, without consulting the environment.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            embedding_model: data_dir.join("language_model.vec"),
            stem_map: data_dir.join("stem_map.csv"),
            bigram_phrases: data_dir.join("bigram_phrases.csv"),
            phrase_threshold: 0.0,
            documents_dir: data_dir.join("documents"),
            candidate_pool: 1000,
            default_topn: 10,
            max_topn: 100,
            data_dir,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

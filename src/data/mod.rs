//! Read-only stem lookup table: stem -> surface words, pos tags and gender category.

pub mod stem_map;
#[cfg(feature = "sqlite")]
pub mod store;

use std::{collections::HashSet, fmt, path::Path, str::FromStr, sync::Arc};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// One row of the lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StemEntry {
    pub stem: String,
    pub word: String,
    pub pos: String,
    pub category: String,
}

/// Gender categories assigned offline to each stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderCategory {
    StronglyMale,
    Male,
    Neutral,
    Female,
    StronglyFemale,
}

impl GenderCategory {
    pub const ALL: [GenderCategory; 5] = [
        Self::StronglyMale,
        Self::Male,
        Self::Neutral,
        Self::Female,
        Self::StronglyFemale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StronglyMale => "strongly_male",
            Self::Male => "male",
            Self::Neutral => "neutral",
            Self::Female => "female",
            Self::StronglyFemale => "strongly_female",
        }
    }
}

impl fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderCategory {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| LexiconError::invalid(format!("unknown gender category '{}'", s.trim())))
    }
}

/// Restriction applied to candidate stems. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconFilter {
    pub genders: Vec<GenderCategory>,
    /// Upper-cased pos tags, matched as substrings of the row's pos field.
    pub pos: Vec<String>,
}

impl LexiconFilter {
    /// Build a filter from raw request values.
    ///
    /// Naming all five categories is the same as naming none. `any` clears the
    /// pos restriction; compound tags such as `noun_verb` split into `NOUN`, `VERB`.
    pub fn from_parts<G, P>(genders: G, pos: P) -> Result<Self, LexiconError>
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut parsed: Vec<GenderCategory> = Vec::new();
        for raw in genders {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            let category = raw.parse()?;
            if !parsed.contains(&category) {
                parsed.push(category);
            }
        }
        if parsed.len() == GenderCategory::ALL.len() {
            parsed.clear();
        }

        let mut tags: Vec<String> = Vec::new();
        for raw in pos {
            for part in raw.as_ref().split('_') {
                let tag = part.trim().to_ascii_uppercase();
                if tag.is_empty() {
                    continue;
                }
                if tag == "ANY" {
                    return Ok(Self {
                        genders: parsed,
                        pos: Vec::new(),
                    });
                }
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        Ok(Self {
            genders: parsed,
            pos: tags,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.genders.is_empty() && self.pos.is_empty()
    }

    /// Whether a single table row satisfies the filter.
    pub fn matches(&self, entry: &StemEntry) -> bool {
        let gender_ok = self.genders.is_empty()
            || self
                .genders
                .iter()
                .any(|g| g.as_str() == entry.category.as_str());
        let pos_ok = self.pos.is_empty() || {
            let upper = entry.pos.to_ascii_uppercase();
            self.pos.iter().any(|tag| upper.contains(tag.as_str()))
        };
        gender_ok && pos_ok
    }
}

/// Read-only queries against the lookup table.
pub trait StemStore: Send + Sync {
    /// Every row for `stem`, in table order.
    fn entries_for_stem(&self, stem: &str) -> Result<Vec<StemEntry>>;
    /// Stems with at least one row satisfying `filter`.
    fn stems_matching(&self, filter: &LexiconFilter) -> Result<HashSet<String>>;
    /// Category of the first row for `stem`.
    fn category_for_stem(&self, stem: &str) -> Result<Option<String>>;
    /// Pos of the first row whose surface word is `word`.
    fn pos_for_word(&self, word: &str) -> Result<Option<String>>;
    fn len(&self) -> Result<usize>;
}

/// Open the lookup table, choosing the backend from the file extension.
pub fn open_store(path: &Path) -> Result<Arc<dyn StemStore>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("db" | "sqlite" | "sqlite3") => open_sqlite(path),
        _ => Ok(Arc::new(stem_map::CsvStemMap::from_path(path)?) as Arc<dyn StemStore>),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &Path) -> Result<Arc<dyn StemStore>> {
    Ok(Arc::new(store::SqliteStemMap::open(path)?) as Arc<dyn StemStore>)
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(path: &Path) -> Result<Arc<dyn StemStore>> {
    anyhow::bail!(
        "{} looks like a SQLite database; rebuild with `--features sqlite`",
        path.display()
    )
}

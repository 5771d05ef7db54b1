//! CSV-backed stem lookup table held in memory.

use std::{
    collections::{HashMap, HashSet},
    io::Read,
    path::Path,
};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use tracing::info;

use super::{LexiconFilter, StemEntry, StemStore};

/// Stem table loaded from a `stem,word,pos,category` CSV file.
#[derive(Debug, Default)]
pub struct CsvStemMap {
    by_stem: IndexMap<String, Vec<StemEntry>>,
    pos_by_word: HashMap<String, String>,
    rows: usize,
}

impl CsvStemMap {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open stem map {}", path.display()))?;
        let map = Self::from_reader(file)
            .with_context(|| format!("parse stem map {}", path.display()))?;
        info!(path = %path.display(), rows = map.rows, stems = map.by_stem.len(), "loaded stem map");
        Ok(map)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();
        for result in reader.deserialize::<StemEntry>() {
            entries.push(result?);
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = StemEntry>,
    {
        let mut map = Self::default();
        for entry in entries {
            map.pos_by_word
                .entry(entry.word.clone())
                .or_insert_with(|| entry.pos.clone());
            map.by_stem
                .entry(entry.stem.clone())
                .or_default()
                .push(entry);
            map.rows += 1;
        }
        map
    }
}

impl StemStore for CsvStemMap {
    fn entries_for_stem(&self, stem: &str) -> Result<Vec<StemEntry>> {
        Ok(self.by_stem.get(stem).cloned().unwrap_or_default())
    }

    fn stems_matching(&self, filter: &LexiconFilter) -> Result<HashSet<String>> {
        Ok(self
            .by_stem
            .iter()
            .filter(|(_, rows)| rows.iter().any(|row| filter.matches(row)))
            .map(|(stem, _)| stem.clone())
            .collect())
    }

    fn category_for_stem(&self, stem: &str) -> Result<Option<String>> {
        Ok(self
            .by_stem
            .get(stem)
            .and_then(|rows| rows.first())
            .map(|row| row.category.clone()))
    }

    fn pos_for_word(&self, word: &str) -> Result<Option<String>> {
        Ok(self.pos_by_word.get(word).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.rows)
    }
}

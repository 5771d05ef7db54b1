#![cfg(feature = "sqlite")]

//! SQLite-backed stem lookup table (`stem_map` table).

use std::{collections::HashSet, path::Path, sync::Mutex};

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension};
use tracing::info;

use super::{LexiconFilter, StemEntry, StemStore};

/// Read-only connection to a database holding `stem_map(stem, word, pos, category)`.
pub struct SqliteStemMap {
    conn: Mutex<Connection>,
}

impl SqliteStemMap {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("open stem map database {}", path.display()))?;
        let map = Self::from_connection(conn);
        info!(path = %path.display(), rows = map.len()?, "opened stem map database");
        Ok(map)
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("stem map connection poisoned"))?;
        Ok(f(&conn)?)
    }
}

impl StemStore for SqliteStemMap {
    fn entries_for_stem(&self, stem: &str) -> Result<Vec<StemEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT stem, word, COALESCE(pos, ''), COALESCE(category, '')
                 FROM stem_map WHERE stem = ?1 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![stem], |row| {
                Ok(StemEntry {
                    stem: row.get(0)?,
                    word: row.get(1)?,
                    pos: row.get(2)?,
                    category: row.get(3)?,
                })
            })?;
            rows.collect()
        })
    }

    fn stems_matching(&self, filter: &LexiconFilter) -> Result<HashSet<String>> {
        let mut clauses = Vec::new();
        let mut values: Vec<String> = Vec::new();
        if !filter.genders.is_empty() {
            let marks = vec!["?"; filter.genders.len()].join(", ");
            clauses.push(format!("category IN ({marks})"));
            values.extend(filter.genders.iter().map(|g| g.as_str().to_string()));
        }
        if !filter.pos.is_empty() {
            let likes = vec!["UPPER(pos) LIKE ?"; filter.pos.len()].join(" OR ");
            clauses.push(format!("({likes})"));
            values.extend(filter.pos.iter().map(|tag| format!("%{tag}%")));
        }
        let sql = if clauses.is_empty() {
            "SELECT DISTINCT stem FROM stem_map".to_string()
        } else {
            format!(
                "SELECT DISTINCT stem FROM stem_map WHERE {}",
                clauses.join(" AND ")
            )
        };
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values.iter()), |row| row.get(0))?;
            rows.collect()
        })
    }

    fn category_for_stem(&self, stem: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COALESCE(category, '') FROM stem_map WHERE stem = ?1 ORDER BY rowid LIMIT 1",
                params![stem],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn pos_for_word(&self, word: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COALESCE(pos, '') FROM stem_map WHERE word = ?1 ORDER BY rowid LIMIT 1",
                params![word],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM stem_map", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .and_then(|n| Ok(usize::try_from(n)?))
    }
}

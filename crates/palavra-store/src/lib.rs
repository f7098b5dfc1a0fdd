//! Durable word → (translation, status) mapping on SQLite.
//!
//! Every mutating call is a single autocommitted statement, so a returned `Ok`
//! means the change is on disk (`synchronous = FULL`).

use std::path::{Path, PathBuf};

use palavra_types::{ProgressSummary, Status, WordRecord};
use rusqlite::{Connection, OptionalExtension, params};

mod error;
mod migrations;

pub use error::{Result, StoreError};


pub struct VocabStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl VocabStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        if let Err(err) =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        {
            tracing::warn!("Failed to enable WAL mode: {err}");
        }
        conn.pragma_update(None, "synchronous", "FULL")?;

        let store = Self::init(conn, Some(path.to_path_buf()))?;
        tracing::info!("Vocabulary store opened at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn, path })
    }

    /// File backing this store, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, word: &str) -> Result<Option<WordRecord>> {
        let row = self
            .conn
            .prepare_cached("SELECT word, translation, status FROM words WHERE word = ?1")?
            .query_row(params![word], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .optional()?;

        row.map(|(word, translation, status)| {
            Ok(WordRecord {
                word,
                translation,
                status: parse_status(&status)?,
            })
        })
        .transpose()
    }

    /// True when `word` is stored with a non-blank translation
    pub fn has_translation(&self, word: &str) -> Result<bool> {
        let resolved: bool = self
            .conn
            .prepare_cached(
                "SELECT EXISTS(
                     SELECT 1 FROM words
                     WHERE word = ?1 AND translation IS NOT NULL AND trim(translation) <> ''
                 )",
            )?
            .query_row(params![word], |row| row.get(0))?;
        Ok(resolved)
    }

    /// Insert `word`, or refresh its translation if already stored.
    ///
    /// `status: None` keeps whatever status the word has (`new` on insert);
    /// `Some` overwrites it.
    pub fn upsert(&self, word: &str, translation: &str, status: Option<Status>) -> Result<()> {
        let status = status.map(|s| s.as_str());
        self.conn
            .prepare_cached(
                "INSERT INTO words (word, translation, status)
                 VALUES (?1, ?2, COALESCE(?3, 'new'))
                 ON CONFLICT(word) DO UPDATE SET
                     translation = excluded.translation,
                     status = COALESCE(?3, words.status)",
            )?
            .execute(params![word, translation, status])?;
        tracing::debug!("Upserted '{}' -> '{}'", word, translation);
        Ok(())
    }

    /// Update only the status. A word that was never stored is left alone and
    /// `Ok(false)` is returned.
    pub fn set_status(&self, word: &str, status: Status) -> Result<bool> {
        let changed = self
            .conn
            .prepare_cached("UPDATE words SET status = ?2 WHERE word = ?1")?
            .execute(params![word, status.as_str()])?;

        if changed == 0 {
            tracing::warn!("Ignoring status {} for unknown word '{}'", status, word);
            return Ok(false);
        }

        tracing::debug!("Status of '{}' set to {}", word, status);
        Ok(true)
    }

    /// Word counts per status, computed from the table on every call
    pub fn progress_summary(&self) -> Result<ProgressSummary> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT status, COUNT(*) FROM words GROUP BY status")?;
        let mut rows = stmt.query([])?;

        let mut summary = ProgressSummary::default();
        while let Some(row) = rows.next()? {
            let status: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            let count = u64::try_from(count).unwrap_or_default();
            *summary.count_mut(parse_status(&status)?) += count;
            summary.total += count;
        }

        Ok(summary)
    }
}

fn parse_status(value: &str) -> Result<Status> {
    value
        .parse()
        .map_err(|_| StoreError::InvalidStatus(value.to_string()))
}

use std::path::PathBuf;

/// Any failure to read or write the vocabulary database
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid status '{0}' stored in database")]
    InvalidStatus(String),

    #[error("unknown migration target version: {0}")]
    UnknownMigration(i32),

    #[error("database version ({found}) is newer than supported schema ({supported})")]
    SchemaTooNew { found: i32, supported: i32 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

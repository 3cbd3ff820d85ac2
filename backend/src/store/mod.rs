//! SQLite persistence for templates and generated documents.
//!
//! Every operation opens its own connection to the database file and issues
//! whole-entity statements; nothing is cached in-process. Template ids are not
//! foreign keys on `contracts`, so deleting a template leaves its documents intact.

mod documents;
mod templates;

use rusqlite::types::Type;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    category    TEXT NOT NULL,
    content     TEXT NOT NULL,
    fields_json TEXT,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS contracts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid           TEXT NOT NULL UNIQUE,
    template_id    INTEGER NOT NULL,
    title          TEXT NOT NULL,
    filled_content TEXT NOT NULL,
    signature_data TEXT,
    pdf_filename   TEXT NOT NULL,
    variables_json TEXT,
    created_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_templates_category_title ON templates (category, title);
CREATE INDEX IF NOT EXISTS idx_contracts_created_at ON contracts (created_at);
";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("cannot encode column value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle to the database file. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the tables if they do not exist yet.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}

/// Decodes an optional JSON text column inside a row mapper.
fn json_column<T: serde::de::DeserializeOwned>(
    idx: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<T>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

//! Local persistence for probes.
//!
//! All probes live in one SQLite database under the storage root:
//!
//! ```text
//! <root>/probes.sqlite
//! ```
//!
//! One row per probe, holding its mutable state (position, heading) and
//! the immutable plateau bounds it was launched with.

mod probe;

use std::{fs, io, path::PathBuf};

use jiff::Timestamp;
use rusqlite::Connection;
use uuid::Uuid;

use crate::model::Heading;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("probe not found: {0}")]
    ProbeNotFound(Uuid),

    #[error("probe already exists: {0}")]
    ProbeAlreadyExists(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt probe record: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// The persisted shape of a probe, one row of the `probe` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    pub id: Uuid,
    pub x: i64,
    pub y: i64,
    pub heading: Heading,
    pub plateau_max_x: i64,
    pub plateau_max_y: i64,
    pub launched_at: Timestamp,
}

/// Local SQLite-backed storage for probes.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens storage rooted at the given directory.
    ///
    /// The directory and database are created if they don't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join("probes.sqlite"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS probe (
                 id TEXT PRIMARY KEY,
                 x INTEGER NOT NULL,
                 y INTEGER NOT NULL,
                 heading TEXT NOT NULL,
                 plateau_max_x INTEGER NOT NULL,
                 plateau_max_y INTEGER NOT NULL,
                 launched_at TEXT NOT NULL
             )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Returns the default storage root: `~/.trek/probes/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".trek").join("probes"))
    }
}

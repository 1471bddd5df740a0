//! Resume database: connection setup for `SqlStorage` and its schema.
//!
//! The schema is three tables. `resume(uuid, full_name)` holds the
//! aggregate root, `contact(resume_uuid, type, value)` holds one row per
//! contact, and `section(resume_uuid, type, content)` holds one row per
//! section. Child rows use `(resume_uuid, type)` as their primary key and
//! cascade on delete.
//!
//! # Invariants
//! - The applied schema version lives in `PRAGMA user_version`.
//! - A connection handed out by [`open_db`] and friends is fully migrated.
//! - A file written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_url};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Opening, configuring or migrating the resume database failed.
    Sqlite(rusqlite::Error),
    /// The file carries a resume schema newer than this build knows.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable identifier used in structured log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "resume_db_sqlite",
            Self::SchemaTooNew { .. } => "resume_db_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "resume database: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "resume database uses schema v{found}, this build supports up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

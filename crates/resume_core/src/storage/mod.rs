//! Storage contract and backend implementations.
//!
//! # Responsibility
//! - Define the uuid-keyed CRUD contract every backend implements.
//! - Define the shared error taxonomy and the enumeration order.
//!
//! # Invariants
//! - `save` on a stored uuid fails with `AlreadyExists` and changes nothing.
//! - `update`/`delete`/`get` on an absent uuid fail with `NotFound` and
//!   change nothing.
//! - `get_all_sorted` orders by `(full_name, uuid)` ascending, byte-wise,
//!   identically for every backend.

use crate::db::DbError;
use crate::model::resume::{Resume, ResumeValidationError};
use crate::serialization::SerializationError;
use log::{debug, error};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod file;
pub mod memory;
pub mod sql;
pub mod template;

pub use file::FileStorage;
pub use memory::{ListStorage, MapStorage};
pub use sql::SqlStorage;
pub use template::{StorageBackend, TemplateStorage};

pub type StorageResult<T> = Result<T, StorageError>;

/// Error surfaced by every storage operation.
#[derive(Debug)]
pub enum StorageError {
    /// `save` target uuid is already stored.
    AlreadyExists(String),
    /// `update`/`delete`/`get` target uuid is absent.
    NotFound(String),
    /// Document rejected before touching the backend: empty uuid or
    /// fullName, a section stored under the wrong kind, an empty
    /// organization name or experience title, or `finishDate < startDate`.
    Validation(ResumeValidationError),
    Serialization(SerializationError),
    Io {
        context: String,
        source: std::io::Error,
    },
    Db(DbError),
    /// Stored state that cannot be mapped back to a document.
    InvalidData(String),
    MissingRequiredTable(&'static str),
    LockPoisoned,
}

impl StorageError {
    /// True for infrastructure failures, false for business outcomes.
    ///
    /// Serialization failures count as storage failures.
    pub fn is_storage_failure(&self) -> bool {
        !matches!(
            self,
            Self::AlreadyExists(_) | Self::NotFound(_) | Self::Validation(_)
        )
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_failed",
            Self::Serialization(_) => "serialization_failed",
            Self::Io { .. } => "io_failed",
            Self::Db(err) => err.code(),
            Self::InvalidData(_) => "invalid_data",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::LockPoisoned => "lock_poisoned",
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(uuid) => write!(f, "resume {uuid} already exists"),
            Self::NotFound(uuid) => write!(f, "resume {uuid} not found"),
            Self::Validation(err) => write!(f, "invalid resume: {err}"),
            Self::Serialization(err) => write!(f, "{err}"),
            Self::Io { context, source } => write!(f, "{context}: {source}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored resume data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::LockPoisoned => write!(f, "storage lock poisoned by a panicked writer"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::AlreadyExists(_)
            | Self::NotFound(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::LockPoisoned => None,
        }
    }
}

impl From<ResumeValidationError> for StorageError {
    fn from(value: ResumeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SerializationError> for StorageError {
    fn from(value: SerializationError) -> Self {
        Self::Serialization(value)
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Uuid-keyed document store.
///
/// Implementations are shared between request threads, so every method
/// takes `&self`.
pub trait Storage: Send + Sync {
    fn save(&self, resume: &Resume) -> StorageResult<()>;
    fn update(&self, resume: &Resume) -> StorageResult<()>;
    fn delete(&self, uuid: &str) -> StorageResult<()>;
    fn get(&self, uuid: &str) -> StorageResult<Resume>;
    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>>;
    fn size(&self) -> StorageResult<usize>;
    fn clear(&self) -> StorageResult<()>;
}

/// Total order used by `get_all_sorted`: full name, then uuid.
pub fn compare_by_name_then_uuid(left: &Resume, right: &Resume) -> Ordering {
    left.full_name()
        .cmp(right.full_name())
        .then_with(|| left.uuid().cmp(right.uuid()))
}

/// Emits one `event=<op>` line for a finished storage operation.
///
/// Only uuids and counts are logged, never document contents.
pub(crate) fn log_outcome<T>(
    op: &str,
    backend: &str,
    uuid: Option<&str>,
    started_at: Instant,
    result: &StorageResult<T>,
) {
    let uuid = uuid.unwrap_or("-");
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => debug!(
            "event={op} module=storage backend={backend} status=ok uuid={uuid} duration_ms={duration_ms}"
        ),
        Err(err) if !err.is_storage_failure() => debug!(
            "event={op} module=storage backend={backend} status=rejected uuid={uuid} duration_ms={duration_ms} error_code={}",
            err.code()
        ),
        Err(err) => error!(
            "event={op} module=storage backend={backend} status=error uuid={uuid} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}

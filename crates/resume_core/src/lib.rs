//! Storage subsystem for resume documents.
//! This crate is the single source of truth for document invariants and the
//! uuid-keyed CRUD contract shared by every backend.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod serialization;
pub mod storage;
pub mod util;

pub use config::{open_storage, StorageConfig, StorageKind};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::experience::Experience;
pub use model::resume::{ContactType, Link, Resume, ResumeValidationError, SectionType};
pub use model::section::{Organization, Section, SectionKind};
pub use serialization::{
    DataStreamStrategy, JsonStreamStrategy, SerializationError, SerializationStrategy,
    StrategyKind,
};
pub use storage::{
    compare_by_name_then_uuid, FileStorage, ListStorage, MapStorage, SqlStorage, Storage,
    StorageBackend, StorageError, StorageResult, TemplateStorage,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

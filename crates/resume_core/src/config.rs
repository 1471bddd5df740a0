//! Resolved storage configuration and backend factory.
//!
//! # Responsibility
//! - Carry the values an outer layer resolved (directory, database URL,
//!   credentials, encoding) into backend construction.
//! - Map a configuration value to a ready `Storage`.
//!
//! # Invariants
//! - Core never reads configuration files or environment variables.

use crate::serialization::StrategyKind;
use crate::storage::{
    FileStorage, ListStorage, MapStorage, SqlStorage, Storage, StorageResult, TemplateStorage,
};
use log::info;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend `open_storage` builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    List,
    File,
    #[default]
    Sql,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::List => "list",
            Self::File => "file",
            Self::Sql => "sql",
        }
    }
}

impl Display for StorageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "map" => Ok(Self::Memory),
            "list" => Ok(Self::List),
            "file" | "path" => Ok(Self::File),
            "sql" | "sqlite" => Ok(Self::Sql),
            other => Err(format!(
                "unsupported storage kind `{other}`; expected memory|list|file|sql"
            )),
        }
    }
}

/// Storage settings resolved once at process start.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub kind: StorageKind,
    /// Root directory for the file backend.
    pub storage_dir: PathBuf,
    /// SQLite path or `:memory:`, optionally `sqlite:`/`file:` prefixed.
    pub database_url: String,
    /// Accepted for parity with server databases; SQLite ignores it.
    pub user: Option<String>,
    /// Accepted for parity with server databases; SQLite ignores it.
    pub password: Option<String>,
    pub strategy: StrategyKind,
}

impl StorageConfig {
    pub fn sql(database_url: impl Into<String>) -> Self {
        Self {
            kind: StorageKind::Sql,
            storage_dir: PathBuf::from("storage"),
            database_url: database_url.into(),
            user: None,
            password: None,
            strategy: StrategyKind::default(),
        }
    }

    pub fn file(storage_dir: impl Into<PathBuf>, strategy: StrategyKind) -> Self {
        Self {
            kind: StorageKind::File,
            storage_dir: storage_dir.into(),
            strategy,
            ..Self::sql(":memory:")
        }
    }
}

// Manual impl keeps the password out of debug output.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("kind", &self.kind)
            .field("storage_dir", &self.storage_dir)
            .field("database_url", &self.database_url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Builds the backend described by `config`.
///
/// # Errors
/// - Propagates directory creation failures for the file backend.
/// - Propagates open/migration failures for the SQL backend.
pub fn open_storage(config: &StorageConfig) -> StorageResult<Box<dyn Storage>> {
    info!(
        "event=storage_open module=config status=start kind={} strategy={}",
        config.kind, config.strategy
    );
    let storage: Box<dyn Storage> = match config.kind {
        StorageKind::Memory => Box::new(TemplateStorage::new(MapStorage::new())),
        StorageKind::List => Box::new(TemplateStorage::new(ListStorage::new())),
        StorageKind::File => Box::new(TemplateStorage::new(FileStorage::new(
            &config.storage_dir,
            config.strategy.strategy(),
        )?)),
        StorageKind::Sql => Box::new(SqlStorage::open(&config.database_url)?),
    };
    info!(
        "event=storage_open module=config status=ok kind={}",
        config.kind
    );
    Ok(storage)
}

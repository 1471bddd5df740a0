//! Pluggable whole-document encodings.
//!
//! # Responsibility
//! - Define the `SerializationStrategy` contract used by stream-backed storages.
//! - Let callers pick an encoding by configuration (`StrategyKind`).
//!
//! # Invariants
//! - `read(write(r)) == r` for every valid `Resume`.
//! - Decoders validate the result and never silently default unknown
//!   discriminators.

use crate::model::resume::{Resume, ResumeValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};
use std::str::FromStr;

pub mod data;
pub mod json;
pub mod section;

pub use data::DataStreamStrategy;
pub use json::JsonStreamStrategy;

pub type SerializationResult<T> = Result<T, SerializationError>;

/// Failure to encode or decode a document.
#[derive(Debug)]
pub enum SerializationError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Structurally readable payload with an invalid value in it.
    InvalidData(String),
    Validation(ResumeValidationError),
}

impl Display for SerializationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "stream error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid encoded data: {message}"),
            Self::Validation(err) => write!(f, "decoded resume is invalid: {err}"),
        }
    }
}

impl Error for SerializationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ResumeValidationError> for SerializationError {
    fn from(value: ResumeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Converts a resume to and from a byte stream.
pub trait SerializationStrategy: Send + Sync {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> SerializationResult<()>;
    fn read(&self, input: &mut dyn Read) -> SerializationResult<Resume>;

    /// Convenience wrapper collecting [`SerializationStrategy::write`] into a buffer.
    fn to_bytes(&self, resume: &Resume) -> SerializationResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(resume, &mut buffer)?;
        Ok(buffer)
    }

    fn from_bytes(&self, mut bytes: &[u8]) -> SerializationResult<Resume> {
        self.read(&mut bytes)
    }
}

/// Configuration-level selector for a concrete strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    #[default]
    Json,
    Data,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Data => "data",
        }
    }

    /// Instantiates the strategy this selector names.
    pub fn strategy(self) -> Box<dyn SerializationStrategy> {
        match self {
            Self::Json => Box::new(JsonStreamStrategy),
            Self::Data => Box::new(DataStreamStrategy),
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "data" | "binary" => Ok(Self::Data),
            other => Err(format!(
                "unsupported serialization strategy `{other}`; expected json|data"
            )),
        }
    }
}

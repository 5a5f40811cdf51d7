//! Structured error types for fwscope
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Only whole-file problems live here; a malformed line or record is skipped
//! where it is found and never becomes an error value.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Clock frequency must be non-zero")]
    ZeroClock,

    #[error("{0} capacity must be non-zero")]
    ZeroCapacity(&'static str),

    #[error("Log tag must not be empty")]
    EmptyLogTag,

    #[error("Invalid log tag {tag:?}: {error}")]
    InvalidLogTag { tag: String, error: String },

    #[error("Duplicate module category: {0}")]
    DuplicateCategory(String),

    #[error("Module category name must not be empty")]
    EmptyCategoryName,

    #[error("Catch-all category \"{0}\" must not declare patterns")]
    PatternsOnCatchAll(String),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

//! Error types for migration runs.
//!
//! Conversion itself never fails: a call that no grammar recognizes is left in
//! place. Errors only arise at the file-system and configuration edges, and
//! per-file failures are collected (see [`collection`]) so one unreadable
//! template does not stop the rest of the run.

pub mod collection;

pub use collection::{FileFailure, MigrationResults, OperationType};

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for collective-migrate operations
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Reading a template failed
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a converted template failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the template directory failed
    #[error("Cannot scan {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl MigrateError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Which step of the run produced this error.
    pub fn operation(&self) -> OperationType {
        match self {
            Self::Read { .. } => OperationType::FileRead,
            Self::Write { .. } => OperationType::FileWrite,
            Self::Walk { .. } => OperationType::DirectoryAccess,
            Self::Config { .. } => OperationType::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;

//! # Store Error Types
//!
//! Errors raised while loading configuration or moving snapshots between
//! memory and disk.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / toml                       CoreError (engine)             │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │               StoreError (this module)                                  │
//! │                      │                                                  │
//! │          ┌───────────┴────────────┐                                     │
//! │          ▼                        ▼                                     │
//! │   snapshot_save/load        autosave / cold start                       │
//! │   returned to caller        logged, session keeps running               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use grocer_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Snapshot Errors
    // =========================================================================
    /// Neither the caller nor the configuration named a snapshot file.
    #[error("No snapshot path configured")]
    NoSnapshotPath,

    /// Reading or writing the snapshot file failed.
    #[error("Snapshot I/O failed for {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error outside snapshot handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// The engine rejected the operation or the snapshot contents.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn snapshot_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::SnapshotIo {
            path: path.into(),
            source,
        }
    }

    /// True when the snapshot file exists but could not be decoded.
    pub fn is_malformed_snapshot(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::MalformedSnapshot(_)))
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::InvalidConfig(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

//! CLI error type

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::import::ImportError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Import failed: {0}")]
    ImportError(#[from] ImportError),

    #[error("Export failed: {0}")]
    ExportError(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),

    #[error("{0} operator model(s) failed to load")]
    ToolkitFailures(usize),
}

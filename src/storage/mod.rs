//! Storage backend abstraction
//!
//! Toolkit loading and model saving go through [`StorageBackend`], so they
//! can run against anything that looks like a directory tree.
//! [`filesystem::FileSystemStorageBackend`] is the native implementation.

use async_trait::async_trait;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Paths are `/`-separated and relative to the backend's root.
#[async_trait(?Send)]
pub trait StorageBackend: Send + Sync {
    /// Read a file from storage
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file, creating parent directories as needed
    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Names of the files in a directory, sorted
    async fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Names of the subdirectories of a directory, sorted
    async fn list_dirs(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    async fn dir_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Create a directory and its parents
    async fn create_dir(&self, path: &str) -> Result<(), StorageError>;
}

#[cfg(feature = "native-fs")]
pub mod filesystem;

/// Joins `/`-separated storage path segments, skipping empty ones
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&["", "spl.adapter", "FileSink/", "FileSink.xml"]), "spl.adapter/FileSink/FileSink.xml");
        assert_eq!(join_path(&["/"]), "");
    }
}

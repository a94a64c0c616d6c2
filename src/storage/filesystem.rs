//! File system storage backend
//!
//! All paths are confined to the base directory: paths with `..` are
//! rejected, and resolved paths must stay below the base.

use super::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// File system storage backend
#[derive(Debug, Clone)]
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

/// Kind of directory entry to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
}

impl FileSystemStorageBackend {
    /// Create a backend rooted at `base_path`
    ///
    /// ```rust
    /// use spl_operator_model::storage::filesystem::FileSystemStorageBackend;
    ///
    /// let backend = FileSystemStorageBackend::new("/opt/toolkits/com.acme.ops");
    /// assert!(backend.base_path().ends_with("com.acme.ops"));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(StorageError::PermissionDenied(format!(
                "Path must stay inside the storage root: {path}"
            )));
        }

        let full = self.base_path.join(relative);
        // Symlinks may still point outside; check whatever already exists.
        let existing = if full.exists() {
            Some(full.as_path())
        } else {
            full.parent().filter(|p| p.exists())
        };
        if let Some(existing) = existing {
            let canonical = existing
                .canonicalize()
                .map_err(|e| StorageError::IoError(format!("Failed to resolve path {path}: {e}")))?;
            let base = self
                .base_path
                .canonicalize()
                .unwrap_or_else(|_| self.base_path.clone());
            if !canonical.starts_with(&base) {
                return Err(StorageError::PermissionDenied(format!(
                    "Path escapes the storage root: {path}"
                )));
            }
        }
        Ok(full)
    }

    async fn list_entries(&self, dir: &str, kind: EntryKind) -> Result<Vec<String>, StorageError> {
        let full_path = self.resolve_path(dir)?;
        let mut read_dir = fs::read_dir(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::DirectoryNotFound(dir.to_string()),
            _ => StorageError::IoError(format!("Failed to read directory {dir}: {e}")),
        })?;

        let mut names = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to read directory entry: {e}")))?
        {
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };
            let matches = match kind {
                EntryKind::File => file_type.is_file(),
                EntryKind::Dir => file_type.is_dir(),
            };
            if matches && let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn exists(&self, path: &str, kind: EntryKind) -> Result<bool, StorageError> {
        let full_path = self.resolve_path(path)?;
        match fs::metadata(&full_path).await {
            Ok(metadata) => Ok(match kind {
                EntryKind::File => metadata.is_file(),
                EntryKind::Dir => metadata.is_dir(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(format!("Failed to stat {path}: {e}"))),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for FileSystemStorageBackend {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve_path(path)?;
        fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound(path.to_string()),
            _ => StorageError::IoError(format!("Failed to read file {path}: {e}")),
        })
    }

    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::IoError(format!("Failed to create directory for {path}: {e}"))
            })?;
        }
        fs::write(&full_path, content)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to write file {path}: {e}")))
    }

    async fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        self.list_entries(dir, EntryKind::File).await
    }

    async fn list_dirs(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        self.list_entries(dir, EntryKind::Dir).await
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        self.exists(path, EntryKind::File).await
    }

    async fn dir_exists(&self, path: &str) -> Result<bool, StorageError> {
        self.exists(path, EntryKind::Dir).await
    }

    async fn create_dir(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;
        fs::create_dir_all(&full_path)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to create directory {path}: {e}")))
    }
}

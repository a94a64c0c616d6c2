//! Toolkit loading
//!
//! Scans a toolkit for operator models. A model that cannot be read or
//! parsed is recorded as a failure and the scan goes on.

use serde::Serialize;
use tracing::{info, warn};

use super::operator_model_path;
use crate::import::{ImportError, OperatorModelImporter};
use crate::models::OperatorModelDocument;
use crate::storage::{StorageBackend, StorageError, join_path};

/// Why a single operator model could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid UTF-8 in {path}: {message}")]
    Encoding { path: String, message: String },
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// An operator model found in a toolkit
#[derive(Debug, Clone, Serialize)]
pub struct LoadedOperator {
    pub namespace: String,
    pub name: String,
    /// Storage path of the model file
    pub path: String,
    pub document: OperatorModelDocument,
}

impl LoadedOperator {
    /// `namespace::Name`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }
}

/// A model file that was found but could not be loaded
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub path: String,
    pub error: String,
}

/// Result of scanning a toolkit
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolkitLoadResult {
    pub operators: Vec<LoadedOperator>,
    pub failures: Vec<LoadFailure>,
}

/// Loads operator models from a toolkit directory
pub struct ToolkitLoader<B: StorageBackend> {
    storage: B,
    importer: OperatorModelImporter,
}

impl<B: StorageBackend> ToolkitLoader<B> {
    pub fn new(storage: B) -> Self {
        Self {
            storage,
            importer: OperatorModelImporter::new(),
        }
    }

    /// Scan `<toolkit>/<namespace>/<Operator>/<Operator>.xml`
    ///
    /// Only a missing or unreadable toolkit directory fails the scan.
    pub async fn load_toolkit(&self, toolkit_path: &str) -> Result<ToolkitLoadResult, StorageError> {
        let mut result = ToolkitLoadResult::default();

        for namespace in self.storage.list_dirs(toolkit_path).await? {
            if namespace.starts_with('.') {
                continue;
            }
            let namespace_dir = join_path(&[toolkit_path, &namespace]);
            let operators = match self.storage.list_dirs(&namespace_dir).await {
                Ok(dirs) => dirs,
                Err(e) => {
                    warn!("Failed to list namespace directory {}: {}", namespace_dir, e);
                    continue;
                }
            };

            for operator in operators {
                let path = operator_model_path(toolkit_path, &namespace, &operator);
                match self.storage.file_exists(&path).await {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        warn!("Failed to check for operator model {}: {}", path, e);
                        result.failures.push(LoadFailure {
                            path,
                            error: e.to_string(),
                        });
                        continue;
                    }
                }
                match self.load_operator(&path).await {
                    Ok(document) => result.operators.push(LoadedOperator {
                        namespace: namespace.clone(),
                        name: operator,
                        path,
                        document,
                    }),
                    Err(e) => {
                        warn!("Failed to load operator model from {}: {}", path, e);
                        result.failures.push(LoadFailure {
                            path,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            "Loaded {} operator models ({} failed) from toolkit {}",
            result.operators.len(),
            result.failures.len(),
            toolkit_path
        );
        Ok(result)
    }

    /// Load a single operator model file
    pub async fn load_operator(&self, path: &str) -> Result<OperatorModelDocument, LoadError> {
        let content = self.storage.read_file(path).await?;
        let xml = String::from_utf8(content).map_err(|e| LoadError::Encoding {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.importer.import(&xml)?)
    }
}

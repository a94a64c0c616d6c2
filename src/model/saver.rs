//! Operator model saving

use tracing::info;

use super::operator_model_path;
use crate::config::WriterConfig;
use crate::export::{ExportError, OperatorModelExporter};
use crate::models::OperatorModelDocument;
use crate::storage::{StorageBackend, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Writes operator models into a toolkit layout
pub struct ModelSaver<B: StorageBackend> {
    storage: B,
    exporter: OperatorModelExporter,
}

impl<B: StorageBackend> ModelSaver<B> {
    pub fn new(storage: B) -> Self {
        Self::with_config(storage, WriterConfig::default())
    }

    pub fn with_config(storage: B, config: WriterConfig) -> Self {
        Self {
            storage,
            exporter: OperatorModelExporter::with_config(config),
        }
    }

    /// Save to `<toolkit>/<namespace>/<Operator>/<Operator>.xml` and return that path
    pub async fn save_operator(
        &self,
        toolkit_path: &str,
        namespace: &str,
        operator: &str,
        document: &OperatorModelDocument,
    ) -> Result<String, SaveError> {
        let path = operator_model_path(toolkit_path, namespace, operator);
        self.save_to(&path, document).await?;
        Ok(path)
    }

    /// Save to an explicit storage path
    pub async fn save_to(&self, path: &str, document: &OperatorModelDocument) -> Result<(), SaveError> {
        let exported = self.exporter.export(document)?;
        self.storage.write_file(path, exported.content.as_bytes()).await?;
        info!("Saved {} operator model to {}", document.model.element_name(), path);
        Ok(())
    }
}

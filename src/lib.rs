//! SPL Operator Model SDK - object model for IBM Streams operator model documents
//!
//! Provides:
//! - The operator model data types and the schema registry describing them
//! - A factory creating model objects by class and enum values by literal
//! - XML import/export of `operatorModel` documents
//! - Validation and summaries of operator models
//! - Toolkit loading and saving (via storage backends)

pub mod config;
pub mod export;
pub mod factory;
pub mod import;
pub mod model;
pub mod models;
pub mod schema;
pub mod storage;
pub mod summary;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use storage::{StorageBackend, StorageError};
#[cfg(feature = "native-fs")]
pub use storage::filesystem::FileSystemStorageBackend;

pub use config::{ConfigError, ModelConfig, ValidationConfig, WriterConfig};
pub use export::{ExportError, ExportResult, OperatorModelExporter};
pub use factory::{EnumValue, FactoryError, ModelObject, OperatorFactory};
pub use import::{ImportError, OperatorModelImporter};
pub use model::{LoadError, ModelSaver, SaveError, ToolkitLoadResult, ToolkitLoader};
pub use schema::{ClassId, EnumId, Schema, schema};
pub use summary::{OperatorSummary, Threading};
pub use validation::{OperatorModelValidator, Severity, ValidationIssue, ValidationResult};

// Re-export models
pub use models::enums::*;
pub use models::{JavaOpModel, OpModel, OperatorLanguage, OperatorModel, OperatorModelDocument};

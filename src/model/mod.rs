//! Toolkit loading and saving
//!
//! A toolkit keeps each primitive operator's model at
//! `<namespace>/<Operator>/<Operator>.xml`. These types read and write that
//! layout through a [`StorageBackend`](crate::storage::StorageBackend).

pub mod loader;
pub mod saver;

pub use loader::{LoadError, LoadFailure, LoadedOperator, ToolkitLoadResult, ToolkitLoader};
pub use saver::{ModelSaver, SaveError};

use crate::storage::join_path;

/// Storage path of an operator model inside a toolkit
pub fn operator_model_path(toolkit_path: &str, namespace: &str, operator: &str) -> String {
    join_path(&[toolkit_path, namespace, operator, &format!("{operator}.xml")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_model_path() {
        assert_eq!(
            operator_model_path("toolkits/acme", "com.acme.io", "Reader"),
            "toolkits/acme/com.acme.io/Reader/Reader.xml"
        );
        assert_eq!(operator_model_path("", "ns", "Op"), "ns/Op/Op.xml");
    }
}

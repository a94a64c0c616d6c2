//! Types from the SPL common namespace
//! (`http://www.ibm.com/xmlns/prod/streams/spl/common`)

use serde::{Deserialize, Serialize};

/// Free-text description with optional documentation links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_uri: Option<String>,
}

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            doc_href: None,
            sample_uri: None,
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::new(text)
    }
}

/// A native library the operator links against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub description: Description,
    pub managed_library: ManagedLibrary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedLibrary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lib: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lib_path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_path: Vec<String>,
    /// Command that prints the library settings when run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// A jar or class directory a Java operator depends on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaOpLibrary {
    pub description: Description,
    pub managed_library: JavaOpManagedLibrary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaOpManagedLibrary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lib_path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

//! CLI command implementations

pub mod format;
pub mod schema;
pub mod summary;
pub mod toolkit;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::CliError;

/// Load input content from file or stdin (`-`)
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Display name of an input: the file name, or `<stdin>`
pub(crate) fn input_name(input: &str) -> String {
    if input == "-" {
        return "<stdin>".to_string();
    }
    Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(input)
        .to_string()
}

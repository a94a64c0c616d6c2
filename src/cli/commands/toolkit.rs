//! Toolkit command implementation

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, render};
use crate::config::ValidationConfig;
use crate::model::{LoadFailure, ToolkitLoader};
use crate::models::OperatorLanguage;
use crate::storage::filesystem::FileSystemStorageBackend;
use crate::validation::OperatorModelValidator;

/// Arguments for the `toolkit` command
pub struct ToolkitArgs {
    /// Toolkit root directory
    pub dir: PathBuf,
    /// Also validate every loaded model
    pub validate: bool,
    pub format: OutputFormat,
    pub config: ValidationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OperatorEntry {
    name: String,
    language: OperatorLanguage,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ToolkitReport {
    toolkit: String,
    operators: Vec<OperatorEntry>,
    failures: Vec<LoadFailure>,
}

impl fmt::Display for ToolkitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Toolkit {}: {} operator(s)", self.toolkit, self.operators.len())?;
        for op in &self.operators {
            let language = match op.language {
                OperatorLanguage::Cpp => "C++",
                OperatorLanguage::Java => "Java",
            };
            write!(f, "  {} ({language})", op.name)?;
            if let (Some(errors), Some(warnings)) = (op.errors, op.warnings) {
                write!(f, ": {errors} error(s), {warnings} warning(s)")?;
            }
            writeln!(f)?;
        }
        for failure in &self.failures {
            writeln!(f, "  ✗ {}: {}", failure.path, failure.error)?;
        }
        Ok(())
    }
}

/// Handle the toolkit command
///
/// Fails when a model could not be loaded, or with `--validate` when a model
/// has errors.
pub async fn handle_toolkit(args: &ToolkitArgs) -> Result<(), CliError> {
    let loader = ToolkitLoader::new(FileSystemStorageBackend::new(&args.dir));
    let loaded = loader.load_toolkit("").await?;
    let validator = OperatorModelValidator::with_config(args.config.clone());

    let mut invalid = 0;
    let operators = loaded
        .operators
        .iter()
        .map(|op| {
            let (errors, warnings) = if args.validate {
                let result = validator.validate(&op.document.model);
                if !result.is_valid() {
                    invalid += 1;
                }
                (Some(result.errors().count()), Some(result.warnings().count()))
            } else {
                (None, None)
            };
            OperatorEntry {
                name: op.qualified_name(),
                language: op.document.model.language(),
                path: op.path.clone(),
                errors,
                warnings,
            }
        })
        .collect();

    let report = ToolkitReport {
        toolkit: args.dir.display().to_string(),
        operators,
        failures: loaded.failures,
    };
    print!("{}", render(&report, args.format)?);
    info!("Scanned toolkit {}", report.toolkit);

    if !report.failures.is_empty() {
        return Err(CliError::ToolkitFailures(report.failures.len()));
    }
    if invalid > 0 {
        return Err(CliError::ValidationFailed(invalid));
    }
    Ok(())
}

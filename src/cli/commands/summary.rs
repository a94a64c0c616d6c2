//! Summary command implementation

use std::path::Path;

use super::load_input;
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, render};
use crate::import::OperatorModelImporter;
use crate::summary::OperatorSummary;

/// Arguments for the `summary` command
pub struct SummaryArgs {
    /// Operator model file, or `-` for stdin
    pub input: String,
    /// Operator kind; defaults to the file stem
    pub name: Option<String>,
    pub format: OutputFormat,
}

/// Handle the summary command
pub fn handle_summary(args: &SummaryArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let document = OperatorModelImporter::new().import(&content)?;

    let kind = match &args.name {
        Some(name) => name.clone(),
        None => operator_kind(&args.input)?,
    };
    let summary = OperatorSummary::from_model(kind, &document.model);
    print!("{}", render(&summary, args.format)?);
    Ok(())
}

/// `Beacon` for `.../Beacon/Beacon.xml`
fn operator_kind(input: &str) -> Result<String, CliError> {
    if input == "-" {
        return Err(CliError::InvalidArgument(
            "--name is required when reading from stdin".to_string(),
        ));
    }
    Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidArgument(format!("Cannot derive an operator name from {input}")))
}

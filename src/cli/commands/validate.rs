//! Validate command implementation

use tracing::info;

use super::{input_name, load_input};
use crate::cli::error::CliError;
use crate::cli::output::format_validation_result;
use crate::config::ValidationConfig;
use crate::import::OperatorModelImporter;
use crate::validation::OperatorModelValidator;

/// Arguments for the `validate` command
pub struct ValidateArgs {
    /// Operator model file, or `-` for stdin
    pub input: String,
    pub config: ValidationConfig,
}

/// Handle the validate command
///
/// Prints every issue and fails when the model is not valid.
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let importer = OperatorModelImporter::new();
    let document = importer.import(&content)?;

    let validator = OperatorModelValidator::with_config(args.config.clone());
    let result = validator.validate(&document.model);
    info!(
        "Validated {}: {} issue(s)",
        args.input,
        result.issues.len()
    );

    print!("{}", format_validation_result(&input_name(&args.input), &result));

    if result.is_valid() {
        Ok(())
    } else if args.config.treat_warnings_as_errors {
        Err(CliError::ValidationFailed(result.issues.len()))
    } else {
        Err(CliError::ValidationFailed(result.errors().count()))
    }
}

//! Format command implementation

use std::path::PathBuf;

use tracing::info;

use super::load_input;
use crate::cli::error::CliError;
use crate::config::WriterConfig;
use crate::export::OperatorModelExporter;
use crate::import::OperatorModelImporter;

/// Arguments for the `format` command
pub struct FormatArgs {
    /// Operator model file, or `-` for stdin
    pub input: String,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    pub writer: WriterConfig,
}

/// Handle the format command
///
/// Reads the document and writes it back in canonical form.
pub fn handle_format(args: &FormatArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let document = OperatorModelImporter::new().import(&content)?;
    let exported = OperatorModelExporter::with_config(args.writer.clone()).export(&document)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, exported.content.as_bytes())
                .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
            info!("Formatted {} into {}", args.input, path.display());
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", exported.content),
    }
    Ok(())
}

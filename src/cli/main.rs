//! spl-opmodel: inspect, validate and normalize SPL operator models

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spl_operator_model::cli::commands::format::{FormatArgs, handle_format};
use spl_operator_model::cli::commands::schema::handle_schema;
use spl_operator_model::cli::commands::summary::{SummaryArgs, handle_summary};
use spl_operator_model::cli::commands::toolkit::{ToolkitArgs, handle_toolkit};
use spl_operator_model::cli::commands::validate::{ValidateArgs, handle_validate};
use spl_operator_model::cli::output::OutputFormat;
use spl_operator_model::config::ModelConfig;

#[derive(Parser)]
#[command(name = "spl-opmodel", version, about = "SPL operator model tool")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import and validate an operator model
    Validate {
        /// Model file, or - for stdin
        input: String,
    },
    /// Print the properties of an operator
    Summary {
        /// Model file, or - for stdin
        input: String,
        /// Operator name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Rewrite an operator model in canonical form
    Format {
        /// Model file, or - for stdin
        input: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dump the schema registry as JSON
    Schema {
        /// Class or XML type name
        #[arg(long)]
        class: Option<String>,
    },
    /// Load every operator model in a toolkit
    Toolkit {
        /// Toolkit root directory
        dir: PathBuf,
        /// Validate each model
        #[arg(long)]
        validate: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ModelConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ModelConfig::default(),
    };

    match cli.command {
        Commands::Validate { input } => handle_validate(&ValidateArgs {
            input,
            config: config.validation,
        })?,
        Commands::Summary {
            input,
            name,
            format,
        } => handle_summary(&SummaryArgs {
            input,
            name,
            format,
        })?,
        Commands::Format { input, output } => handle_format(&FormatArgs {
            input,
            output,
            writer: config.writer,
        })?,
        Commands::Schema { class } => handle_schema(class.as_deref())?,
        Commands::Toolkit {
            dir,
            validate,
            format,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(handle_toolkit(&ToolkitArgs {
                dir,
                validate,
                format,
                config: config.validation,
            }))?
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

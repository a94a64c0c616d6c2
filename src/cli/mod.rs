//! CLI module for the spl-opmodel binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;

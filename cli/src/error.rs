#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),

    /// Some files could not be processed; each was already logged.
    #[from(ignore)]
    #[display("{} file(s) failed to process", _0)]
    Failed(usize),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

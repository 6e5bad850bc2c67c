//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Reading or writing a target file failed.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The file is not valid Go source.
    /// Ignored for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

//! # Error Types
//!
//! ## Overview
//!
//! This module contains the errors returned while editing a filter's input, completing paths, and
//! committing selections.

/// Errors returned by filter operations and by the collaborators they call.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum FilterError {
    /// Failure during Input/Output.
    #[error("Input/Output Error: {0}")]
    IOError(#[from] std::io::Error),

    /// Failure due to a malformed glob pattern.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Failure due to a bad regular expression.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Failure while walking a directory tree.
    #[error("Failed to list files: {0}")]
    Walk(#[from] ignore::Error),

    /// Failure while reading or writing the system clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// The collaborator failed to open the selected item.
    #[error("Failed to open {0}: {1}")]
    Open(String, String),

    /// This filter doesn't support the requested action.
    #[error("Unsupported action: {0}")]
    Unsupported(&'static str),

    /// Generic failure.
    #[error("Error: {0}")]
    Failure(String),
}

/// Common result type for filter operations.
pub type FilterResult<V> = Result<V, FilterError>;

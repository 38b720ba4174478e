//! Crate-level error type

use crate::config::UsageError;
use crate::scanner::InputError;
use thiserror::Error;

/// Anything that stops a run before the tree is printed
#[derive(Debug, Error)]
pub enum MstError {
    /// Bad command line or unreadable input file
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Malformed edge file
    #[error(transparent)]
    Input(#[from] InputError),

    /// Writing the result failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, MstError>;

//! Error types for Shoreline operations.
//!
//! [`ShorelineError`] is the top-level error returned by the fallible parts of
//! the library: persistence, feedback submission, export and configuration.
//! The navigator itself never fails; see [`crate::navigator`].

use std::io;

use thiserror::Error;

use shoreline_core::observation::OptionsError;

use crate::{feedback::FeedbackError, storage::StorageError};

/// The main error type for Shoreline operations.
#[derive(Debug, Error)]
pub enum ShorelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Feedback rejected: {0}")]
    Feedback(#[from] FeedbackError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<OptionsError> for ShorelineError {
    fn from(err: OptionsError) -> Self {
        Self::Config(err.to_string())
    }
}

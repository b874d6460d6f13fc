//! Error adapter for converting ShorelineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's report formatting used in the CLI. Each variant gets a stable
//! diagnostic code and, where the visitor can fix the input, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use shoreline::{ShorelineError, feedback::FeedbackError, storage::StorageError};

/// Adapter rendering a [`ShorelineError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a ShorelineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ShorelineError::Io(_) => "shoreline::io",
            ShorelineError::Storage(_) => "shoreline::storage",
            ShorelineError::Feedback(_) => "shoreline::feedback",
            ShorelineError::Export(_) => "shoreline::export",
            ShorelineError::Config(_) => "shoreline::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ShorelineError::Feedback(FeedbackError::MissingField(_)) => {
                "name, email and message must all be filled in"
            }
            ShorelineError::Feedback(FeedbackError::InvalidEmail(_)) => {
                "use an address of the form name@example.com"
            }
            ShorelineError::Storage(StorageError::Io { .. }) => {
                "check that --data-dir points to a writable directory"
            }
            ShorelineError::Export(_) => "pass a file path to --output",
            ShorelineError::Config(_) => "see the [navigation], [viewport] and [storage] tables",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

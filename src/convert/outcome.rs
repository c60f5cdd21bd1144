//! The uniform result type returned by every conversion operation.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Error;

/// Result of a conversion operation.
///
/// Invariants, enforced by the constructors: a successful outcome always
/// carries an output path and no error message; a failed outcome always
/// carries an error message and no output path.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    /// Whether the conversion completed
    pub success: bool,

    /// Path of the produced file, set on success
    pub output_path: Option<PathBuf>,

    /// Failure description, set on failure
    pub error_message: Option<String>,

    /// Human-readable progress messages, in order
    pub messages: Vec<String>,

    /// Format-specific units processed (blocks, sheets, tables, paragraphs)
    pub items_processed: usize,
}

impl ConversionOutcome {
    /// Create a successful outcome.
    pub fn success(output_path: impl Into<PathBuf>, items_processed: usize) -> Self {
        Self {
            success: true,
            output_path: Some(output_path.into()),
            error_message: None,
            messages: Vec::new(),
            items_processed,
        }
    }

    /// Create a failed outcome from an error.
    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            output_path: None,
            error_message: Some(error.to_string()),
            messages: Vec::new(),
            items_processed: 0,
        }
    }

    /// Append a progress message and return self.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

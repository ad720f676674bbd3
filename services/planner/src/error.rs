//! services/planner/src/error.rs
//!
//! Defines the primary error type for the planner service and CLI.

use crate::config::ConfigError;
use lesson_pro_core::{FormFieldError, LessonError};

/// The primary error type for the `planner` service.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error surfaced by one of the planner's operations.
    #[error("{0}")]
    Lesson(#[from] LessonError),

    /// A bad `--set field=value` argument.
    #[error("Form error: {0}")]
    Form(#[from] FormFieldError),

    /// A form file that is not valid lesson form JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., reading a resource file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

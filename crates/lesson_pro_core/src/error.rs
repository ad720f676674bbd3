//! crates/lesson_pro_core/src/error.rs
//!
//! Error taxonomy of the planner core.

use crate::ports::PortError;

/// A model response that does not match the plan row contract.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("response was empty")]
    EmptyResponse,
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON array of plan rows, found {found}")]
    NotAnArray { found: &'static str },
    #[error("row {index} is not an object")]
    RowNotAnObject { index: usize },
    #[error("row {index} is missing the '{field}' field")]
    MissingField { index: usize, field: &'static str },
    #[error("row {index} has a non-string value in '{field}'")]
    NonStringField { index: usize, field: &'static str },
    #[error("row {index} has an empty '{field}' field")]
    EmptyField { index: usize, field: &'static str },
}

/// Failure of a single generation attempt.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The service could not be reached or refused the request. Safe to retry.
    #[error("Could not reach the lesson plan service: {0}")]
    Transport(String),
    /// The service answered with something that is not a valid plan.
    #[error("The lesson plan service returned an invalid plan: {0}")]
    Schema(#[from] SchemaError),
    #[error("A lesson plan is already being generated")]
    InFlight,
}

impl From<PortError> for GenerationError {
    fn from(e: PortError) -> Self {
        GenerationError::Transport(e.to_string())
    }
}

/// The umbrella error surfaced by the planner's operations.
#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("You have reached your limit of {limit} free lesson plans. Please upgrade your account to continue.")]
    QuotaExceeded { limit: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot save an empty lesson plan.")]
    EmptyPlan,

    #[error("An account with email '{0}' already exists")]
    DuplicateAccount(String),

    /// The generation was abandoned before it finished; nothing was recorded.
    #[error("The generation was cancelled")]
    Abandoned,

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

/// A convenience type alias for `Result<T, LessonError>`.
pub type LessonResult<T> = Result<T, LessonError>;

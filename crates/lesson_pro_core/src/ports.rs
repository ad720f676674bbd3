//! crates/lesson_pro_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the planner's core logic.
//! These traits form the boundary of the hexagonal architecture, so the core
//! never touches a concrete storage medium or network client directly.

use async_trait::async_trait;

use crate::prompt::PlanPrompt;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The service answered, but with a non-success status.
    #[error("Request rejected by the service: {0}")]
    Rejected(String),
    /// The service could not be reached in time.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string-only, synchronous key-value medium (browser local storage, a
/// directory of files, a map in memory).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}

#[async_trait]
pub trait PlanGenerationService: Send + Sync {
    /// Sends one prompt to the text-generation service and returns the raw
    /// model output, unvalidated.
    async fn request(&self, prompt: &PlanPrompt) -> PortResult<String>;
}

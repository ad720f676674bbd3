//! crates/lesson_pro_core/src/generator.rs
//!
//! The plan generation client: prompt construction, one request through the
//! `PlanGenerationService` port, and validation of the response.
//!
//! Only one generation may be in flight per `PlanGenerator`:
//!
//! ```text
//! Idle      -> Pending
//! Pending   -> Succeeded | Failed
//! Succeeded -> Pending
//! Failed    -> Pending
//! Pending   -> Idle       (the in-flight future was dropped)
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::decode::decode_plan_rows;
use crate::domain::{LessonFormData, LessonProgressionPlanRow, ResourceFile};
use crate::error::GenerationError;
use crate::ports::PlanGenerationService;
use crate::prompt::{build_prompt, PlanPrompt};

/// Where the generator is in its single-flight cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Pending,
    Succeeded { rows: usize },
    Failed { message: String },
}

pub struct PlanGenerator {
    service: Arc<dyn PlanGenerationService>,
    state: Mutex<GenerationState>,
    timeout: Option<Duration>,
}

impl PlanGenerator {
    pub fn new(service: Arc<dyn PlanGenerationService>) -> Self {
        Self {
            service,
            state: Mutex::new(GenerationState::Idle),
            timeout: None,
        }
    }

    /// A request that takes longer than `timeout` fails as a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> GenerationState {
        lock_state(&self.state).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == GenerationState::Pending
    }

    /// Generates a lesson plan for `form`.
    ///
    /// Rejected with [`GenerationError::InFlight`] while another call is pending.
    /// Has no side effects beyond the generator's own state.
    pub async fn generate(
        &self,
        form: &LessonFormData,
        resource: Option<&ResourceFile>,
    ) -> Result<Vec<LessonProgressionPlanRow>, GenerationError> {
        let mut guard = PendingGuard::acquire(&self.state)?;

        let prompt = build_prompt(form, resource);
        info!(topic = %form.topic, tone = %form.tone, with_resource = resource.is_some(), "Requesting lesson plan");
        let started = Instant::now();

        let result = self.request_and_decode(&prompt).await;

        match &result {
            Ok(rows) => {
                info!(rows = rows.len(), elapsed = ?started.elapsed(), "Lesson plan generated");
                guard.finish(GenerationState::Succeeded { rows: rows.len() });
            }
            Err(e) => {
                warn!(error = %e, elapsed = ?started.elapsed(), "Lesson plan generation failed");
                guard.finish(GenerationState::Failed {
                    message: e.to_string(),
                });
            }
        }
        result
    }

    async fn request_and_decode(
        &self,
        prompt: &PlanPrompt,
    ) -> Result<Vec<LessonProgressionPlanRow>, GenerationError> {
        let raw = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.request(prompt))
                .await
                .map_err(|_| {
                    GenerationError::Transport(format!("request timed out after {limit:?}"))
                })??,
            None => self.service.request(prompt).await?,
        };
        Ok(decode_plan_rows(&raw)?)
    }
}

fn lock_state(state: &Mutex<GenerationState>) -> MutexGuard<'_, GenerationState> {
    // A poisoned lock still holds a valid state value.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the `Pending` slot for one call. Dropping it without `finish`
/// (the caller abandoned the future) resets the state to `Idle`.
struct PendingGuard<'a> {
    state: &'a Mutex<GenerationState>,
    finished: bool,
}

impl<'a> PendingGuard<'a> {
    fn acquire(state: &'a Mutex<GenerationState>) -> Result<Self, GenerationError> {
        let mut current = lock_state(state);
        if *current == GenerationState::Pending {
            return Err(GenerationError::InFlight);
        }
        *current = GenerationState::Pending;
        Ok(Self {
            state,
            finished: false,
        })
    }

    fn finish(&mut self, outcome: GenerationState) {
        *lock_state(self.state) = outcome;
        self.finished = true;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock_state(self.state) = GenerationState::Idle;
        }
    }
}

//! crates/lesson_pro_core/src/planner.rs
//!
//! The generate workflow: quota check, one generation request, then the
//! account's counter. Also hands out the account and saved-plan managers so
//! callers share one set of stores.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::accounts::AccountManager;
use crate::domain::{LessonFormData, LessonProgressionPlanRow, ResourceFile};
use crate::error::{GenerationError, LessonError, LessonResult};
use crate::generator::PlanGenerator;
use crate::ports::{KeyValueStore, PlanGenerationService};
use crate::quota::{can_generate, FREE_GENERATION_LIMIT};
use crate::saved_plans::SavedPlanManager;
use crate::store::PersistenceStore;

pub struct LessonPlanner {
    generator: PlanGenerator,
    accounts: AccountManager,
    plans: SavedPlanManager,
    // Held from the quota check until the generation is recorded.
    in_flight: Mutex<()>,
}

impl LessonPlanner {
    pub fn new(kv: Arc<dyn KeyValueStore>, service: Arc<dyn PlanGenerationService>) -> Self {
        Self::with_generator(kv, PlanGenerator::new(service))
    }

    pub fn with_generator(kv: Arc<dyn KeyValueStore>, generator: PlanGenerator) -> Self {
        let store = PersistenceStore::new(kv);
        Self {
            generator,
            accounts: AccountManager::new(store.clone()),
            plans: SavedPlanManager::new(store),
            in_flight: Mutex::new(()),
        }
    }

    pub fn accounts(&self) -> &AccountManager {
        &self.accounts
    }

    pub fn plans(&self) -> &SavedPlanManager {
        &self.plans
    }

    pub fn generator(&self) -> &PlanGenerator {
        &self.generator
    }

    /// Generates a plan for the current user.
    ///
    /// The quota is checked before any request is made, and a session whose
    /// account directory cannot be read is refused rather than treated as
    /// anonymous. The signed-in user's counter is bumped only after a
    /// successful generation. A second call while one is running fails with
    /// [`GenerationError::InFlight`]. If `cancel` fires first the request is
    /// dropped and nothing is recorded.
    pub async fn generate(
        &self,
        form: &LessonFormData,
        resource: Option<&ResourceFile>,
        cancel: &CancellationToken,
    ) -> LessonResult<Vec<LessonProgressionPlanRow>> {
        let _slot = self
            .in_flight
            .try_lock()
            .map_err(|_| GenerationError::InFlight)?;

        let user = self.accounts.signed_in_user()?;
        if !can_generate(user.as_ref()) {
            info!("Generation blocked by quota");
            return Err(LessonError::QuotaExceeded {
                limit: FREE_GENERATION_LIMIT,
            });
        }

        let rows = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.generator.generate(form, resource) => Some(result?),
        };
        let rows = match rows {
            Some(rows) if !cancel.is_cancelled() => rows,
            _ => {
                info!("Generation abandoned");
                return Err(LessonError::Abandoned);
            }
        };

        if let Some(user) = user {
            // A failed counter write is logged; the plan is still returned.
            match self.accounts.record_generation(&user.email) {
                Ok(count) => info!(email = %user.email, count, "Generation recorded"),
                Err(LessonError::NotFound(_)) => {
                    warn!(email = %user.email, "Account disappeared before the generation could be recorded")
                }
                Err(e) => {
                    warn!(email = %user.email, error = %e, "Failed to record generation")
                }
            }
        }

        Ok(rows)
    }
}

//! crates/lesson_pro_core/src/saved_plans.rs
//!
//! Saved lesson plans, most recent first.

use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::domain::{LessonFormData, LessonProgressionPlanRow, SavedPlan};
use crate::error::{LessonError, LessonResult};
use crate::store::PersistenceStore;

const UNTITLED_PLAN: &str = "Untitled Plan";

pub struct SavedPlanManager {
    store: PersistenceStore,
    /// The last id handed out by this manager.
    last_id: Mutex<i64>,
}

impl SavedPlanManager {
    pub fn new(store: PersistenceStore) -> Self {
        Self {
            store,
            last_id: Mutex::new(0),
        }
    }

    /// Saves a snapshot of the form and rows at the front of the list.
    pub fn save(
        &self,
        form: &LessonFormData,
        rows: &[LessonProgressionPlanRow],
    ) -> LessonResult<SavedPlan> {
        if rows.is_empty() {
            return Err(LessonError::EmptyPlan);
        }

        let mut last_id = self.last_id.lock().unwrap_or_else(|p| p.into_inner());
        let mut plans = self.store.saved_plans()?;

        let now = Utc::now();
        // Millisecond timestamps collide on rapid saves; bump past anything
        // already issued or stored.
        let newest_stored = plans.iter().map(|p| p.id).max().unwrap_or(0);
        let id = now
            .timestamp_millis()
            .max(*last_id + 1)
            .max(newest_stored + 1);

        let title = match form.topic.trim() {
            "" => UNTITLED_PLAN.to_string(),
            _ => form.topic.clone(),
        };

        let plan = SavedPlan {
            id,
            title,
            saved_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            form_data: form.clone(),
            plan_data: rows.to_vec(),
        };

        plans.insert(0, plan.clone());
        self.store.put_saved_plans(&plans)?;
        *last_id = id;

        info!(id, title = %plan.title, "Saved lesson plan");
        Ok(plan)
    }

    pub fn list(&self) -> LessonResult<Vec<SavedPlan>> {
        Ok(self.store.saved_plans()?)
    }

    pub fn load_by_id(&self, id: i64) -> LessonResult<Option<SavedPlan>> {
        Ok(self.store.saved_plans()?.into_iter().find(|p| p.id == id))
    }

    /// Removes the plan with `id`. An unknown id is a no-op.
    pub fn delete_by_id(&self, id: i64) -> LessonResult<()> {
        let _guard = self.last_id.lock().unwrap_or_else(|p| p.into_inner());
        let mut plans = self.store.saved_plans()?;
        let Some(pos) = plans.iter().position(|p| p.id == id) else {
            debug!(id, "No saved plan to delete");
            return Ok(());
        };
        plans.remove(pos);
        self.store.put_saved_plans(&plans)?;
        info!(id, "Deleted saved plan");
        Ok(())
    }
}

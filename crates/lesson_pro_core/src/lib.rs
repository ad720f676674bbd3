pub mod accounts;
pub mod decode;
pub mod domain;
pub mod error;
pub mod generator;
pub mod planner;
pub mod ports;
pub mod prompt;
pub mod quota;
pub mod saved_plans;
pub mod store;

pub use accounts::AccountManager;
pub use domain::{
    FormField, FormFieldError, LessonFormData, LessonProgressionPlanRow, ResourceFile, SavedPlan,
    Tone, UserRecord,
};
pub use error::{GenerationError, LessonError, LessonResult, SchemaError};
pub use generator::{GenerationState, PlanGenerator};
pub use planner::LessonPlanner;
pub use ports::{KeyValueStore, PlanGenerationService, PortError, PortResult};
pub use prompt::{build_prompt, InlineImage, PlanPrompt};
pub use quota::{can_generate, remaining_generations, FREE_GENERATION_LIMIT};
pub use saved_plans::SavedPlanManager;
pub use store::{InMemoryStore, PersistenceStore};

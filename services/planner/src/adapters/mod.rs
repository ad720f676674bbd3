pub mod file_store;
pub mod plan_llm;

pub use file_store::FileKeyValueStore;
pub use plan_llm::OpenAiPlanAdapter;

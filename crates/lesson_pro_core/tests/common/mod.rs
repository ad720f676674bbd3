//! Shared fakes for the lesson_pro_core integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use lesson_pro_core::{
    InMemoryStore, LessonFormData, PersistenceStore, PlanGenerationService, PlanPrompt,
    PortError, PortResult, UserRecord,
};

/// A `PlanGenerationService` that replays scripted responses.
///
/// When built with a gate, every request waits for `gate.notify_one()`
/// before answering.
pub struct FakePlanService {
    responses: Mutex<VecDeque<PortResult<String>>>,
    prompts: Mutex<Vec<PlanPrompt>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakePlanService {
    pub fn new(responses: Vec<PortResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(gate: Arc<Notify>, responses: Vec<PortResult<String>>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(responses)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<PlanPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanGenerationService for FakePlanService {
    async fn request(&self, prompt: &PlanPrompt) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Unexpected("no scripted response".to_string())))
    }
}

pub const FIVE_E_STAGES: [&str; 5] = ["Engage", "Explore", "Explain", "Elaborate", "Evaluate"];

/// A well-formed five-row 5E response.
pub fn five_e_response() -> String {
    let rows: Vec<serde_json::Value> = FIVE_E_STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            serde_json::json!({
                "stage": stage,
                "duration": format!("{} minutes", 5 + i),
                "teacherRole": format!("Teacher leads the {stage} stage"),
                "learnerActivity": format!("Learners take part in {stage}"),
                "assessmentCriteria": format!("Learners can complete the {stage} task"),
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}

pub fn photosynthesis_form() -> LessonFormData {
    LessonFormData {
        topic: "Photosynthesis".to_string(),
        ..LessonFormData::default()
    }
}

pub fn memory_store() -> (Arc<InMemoryStore>, PersistenceStore) {
    let kv = Arc::new(InMemoryStore::new());
    (kv.clone(), PersistenceStore::new(kv))
}

pub fn seed_user(store: &PersistenceStore, email: &str, generation_count: u32) {
    let mut users = store.users().unwrap();
    users.push(UserRecord {
        name: "Mr. A. Banda".to_string(),
        email: email.to_string(),
        generation_count,
    });
    store.put_users(&users).unwrap();
}

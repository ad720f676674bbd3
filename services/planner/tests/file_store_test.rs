//! Integration tests for the directory-backed key-value store.

use std::sync::Arc;

use lesson_pro_core::{
    AccountManager, KeyValueStore, LessonProgressionPlanRow, PersistenceStore, SavedPlanManager,
};
use planner_lib::adapters::FileKeyValueStore;
use planner_lib::commands::build_form;

fn row(stage: &str) -> LessonProgressionPlanRow {
    LessonProgressionPlanRow {
        stage: stage.to_string(),
        duration: "8 minutes".to_string(),
        teacher_role: "Guides".to_string(),
        learner_activity: "Discuss".to_string(),
        assessment_criteria: "Can explain".to_string(),
    }
}

#[test]
fn missing_key_reads_as_none_and_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::new(dir.path().join("nested"));

    assert_eq!(store.get("lesson_pro_session").unwrap(), None);
    store.remove("lesson_pro_session").unwrap();
}

#[test]
fn values_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    FileKeyValueStore::new(dir.path())
        .set("lesson_pro_session", "banda@example.com")
        .unwrap();

    let reopened = FileKeyValueStore::new(dir.path());
    assert_eq!(
        reopened.get("lesson_pro_session").unwrap().as_deref(),
        Some("banda@example.com")
    );
    assert!(!dir.path().join("lesson_pro_session.tmp").exists());
}

#[test]
fn keys_cannot_escape_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::new(dir.path());

    assert!(store.set("../outside", "x").is_err());
    assert!(store.get("").is_err());
}

#[test]
fn accounts_and_plans_persist_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let open = || PersistenceStore::new(Arc::new(FileKeyValueStore::new(dir.path())));

    let first_run = open();
    let accounts = AccountManager::new(first_run.clone());
    accounts.register("Mr. A. Banda", "banda@example.com").unwrap();
    accounts.start_session("banda@example.com").unwrap();
    accounts.record_generation("banda@example.com").unwrap();
    let form = build_form(None, &["topic=Osmosis".to_string()], None).unwrap();
    let saved = SavedPlanManager::new(first_run)
        .save(&form, &[row("Engage"), row("Explore")])
        .unwrap();

    let second_run = open();
    let user = AccountManager::new(second_run.clone())
        .current_user()
        .expect("session should persist");
    assert_eq!(user.generation_count, 1);

    let loaded = SavedPlanManager::new(second_run)
        .load_by_id(saved.id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.title, "Osmosis");
    assert_eq!(loaded.plan_data.len(), 2);
}

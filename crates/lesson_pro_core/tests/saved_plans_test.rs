//! Integration tests for saved lesson plans.

mod common;

use chrono::DateTime;

use lesson_pro_core::{
    decode::decode_plan_rows, LessonError, LessonFormData, LessonProgressionPlanRow,
    SavedPlanManager,
};

use common::{five_e_response, memory_store, photosynthesis_form};

fn rows() -> Vec<LessonProgressionPlanRow> {
    decode_plan_rows(&five_e_response()).unwrap()
}

#[test]
fn saving_an_empty_plan_fails_and_changes_nothing() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store.clone());
    plans.save(&photosynthesis_form(), &rows()).unwrap();
    let before = store.saved_plans().unwrap();

    let err = plans.save(&photosynthesis_form(), &[]).unwrap_err();

    assert!(matches!(err, LessonError::EmptyPlan));
    assert_eq!(store.saved_plans().unwrap(), before);
}

#[test]
fn rapid_saves_get_distinct_ids_most_recent_first() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store);

    let first = plans.save(&photosynthesis_form(), &rows()).unwrap();
    let second = plans.save(&photosynthesis_form(), &rows()).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(plans.load_by_id(first.id).unwrap().unwrap(), first);
    assert_eq!(plans.load_by_id(second.id).unwrap().unwrap(), second);

    let ids: Vec<i64> = plans.list().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn ids_stay_unique_across_manager_instances() {
    let (_, store) = memory_store();
    let first = SavedPlanManager::new(store.clone())
        .save(&photosynthesis_form(), &rows())
        .unwrap();
    let second = SavedPlanManager::new(store)
        .save(&photosynthesis_form(), &rows())
        .unwrap();

    assert!(second.id > first.id);
}

#[test]
fn title_falls_back_when_topic_is_blank() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store);
    let form = LessonFormData {
        topic: "   ".to_string(),
        ..LessonFormData::default()
    };

    let saved = plans.save(&form, &rows()).unwrap();
    assert_eq!(saved.title, "Untitled Plan");
}

#[test]
fn saved_at_is_an_iso_timestamp() {
    let (_, store) = memory_store();
    let saved = SavedPlanManager::new(store)
        .save(&photosynthesis_form(), &rows())
        .unwrap();

    assert!(saved.saved_at.ends_with('Z'));
    assert!(DateTime::parse_from_rfc3339(&saved.saved_at).is_ok());
}

#[test]
fn load_by_id_requires_an_exact_match() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store);
    let saved = plans.save(&photosynthesis_form(), &rows()).unwrap();

    assert!(plans.load_by_id(saved.id + 1).unwrap().is_none());
}

#[test]
fn deleting_an_unknown_id_is_a_no_op() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store);
    let saved = plans.save(&photosynthesis_form(), &rows()).unwrap();

    plans.delete_by_id(saved.id + 1000).unwrap();

    assert_eq!(plans.list().unwrap(), vec![saved]);
}

#[test]
fn delete_removes_only_the_matching_plan() {
    let (_, store) = memory_store();
    let plans = SavedPlanManager::new(store);
    let first = plans.save(&photosynthesis_form(), &rows()).unwrap();
    let second = plans.save(&photosynthesis_form(), &rows()).unwrap();

    plans.delete_by_id(first.id).unwrap();

    assert_eq!(plans.list().unwrap(), vec![second]);
    assert!(plans.load_by_id(first.id).unwrap().is_none());
}

//! crates/lesson_pro_core/src/store.rs
//!
//! Typed access to the three records kept in the key-value medium: the
//! session pointer, the user directory and the saved plans. Every read goes
//! back to the medium; nothing is cached here.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{SavedPlan, UserRecord};
use crate::ports::{KeyValueStore, PortError, PortResult};

pub const SESSION_KEY: &str = "lesson_pro_session";
pub const USERS_KEY: &str = "lesson_pro_users";
pub const SAVED_PLANS_KEY: &str = "saved_lesson_plans";

#[derive(Clone)]
pub struct PersistenceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl PersistenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    // --- Session pointer ---

    pub fn session_email(&self) -> PortResult<Option<String>> {
        self.kv.get(SESSION_KEY)
    }

    pub fn set_session_email(&self, email: &str) -> PortResult<()> {
        self.kv.set(SESSION_KEY, email)
    }

    pub fn clear_session(&self) -> PortResult<()> {
        self.kv.remove(SESSION_KEY)
    }

    // --- User directory ---

    pub fn users(&self) -> PortResult<Vec<UserRecord>> {
        self.read_list(USERS_KEY)
    }

    pub fn put_users(&self, users: &[UserRecord]) -> PortResult<()> {
        self.write_list(USERS_KEY, users)
    }

    // --- Saved plans ---

    pub fn saved_plans(&self) -> PortResult<Vec<SavedPlan>> {
        self.read_list(SAVED_PLANS_KEY)
    }

    pub fn put_saved_plans(&self, plans: &[SavedPlan]) -> PortResult<()> {
        self.write_list(SAVED_PLANS_KEY, plans)
    }

    /// An absent key reads as an empty list.
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> PortResult<Vec<T>> {
        match self.kv.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                PortError::Unexpected(format!("Stored record '{}' is corrupt: {}", key, e))
            }),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> PortResult<()> {
        let raw = serde_json::to_string(items)
            .map_err(|e| PortError::Unexpected(format!("Failed to encode '{}': {}", key, e)))?;
        self.kv.set(key, &raw)
    }
}

/// A `KeyValueStore` held in memory. Used by tests and short-lived tools.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PortError::Unexpected("In-memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PortError::Unexpected("In-memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PortError::Unexpected("In-memory store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Arc<InMemoryStore>, PersistenceStore) {
        let kv = Arc::new(InMemoryStore::new());
        (kv.clone(), PersistenceStore::new(kv))
    }

    #[test]
    fn missing_lists_read_as_empty() {
        let (_, store) = store();
        assert!(store.users().unwrap().is_empty());
        assert!(store.saved_plans().unwrap().is_empty());
        assert_eq!(store.session_email().unwrap(), None);
    }

    #[test]
    fn users_are_written_as_camel_case_json() {
        let (kv, store) = store();
        store
            .put_users(&[UserRecord {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                generation_count: 1,
            }])
            .unwrap();

        let raw = kv.get(USERS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"name":"Ada","email":"ada@example.com","generationCount":1}]"#
        );
    }

    #[test]
    fn corrupt_record_is_reported() {
        let (kv, store) = store();
        kv.set(SAVED_PLANS_KEY, "{not json").unwrap();
        assert!(matches!(store.saved_plans(), Err(PortError::Unexpected(_))));
    }

    #[test]
    fn clearing_the_session_leaves_the_directory() {
        let (_, store) = store();
        store.put_users(&[]).unwrap();
        store.set_session_email("ada@example.com").unwrap();
        store.clear_session().unwrap();

        assert_eq!(store.session_email().unwrap(), None);
        assert!(store.users().is_ok());
    }
}

//! crates/lesson_pro_core/src/accounts.rs
//!
//! The local account directory and the session pointer.
//! This is a simulated login: there are no passwords and nothing is verified.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::domain::UserRecord;
use crate::error::{LessonError, LessonResult};
use crate::store::PersistenceStore;

pub struct AccountManager {
    store: PersistenceStore,
    // Serializes read-modify-write cycles on the directory.
    write_lock: Mutex<()>,
}

impl AccountManager {
    pub fn new(store: PersistenceStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Adds an account with a zero generation count.
    pub fn register(&self, name: &str, email: &str) -> LessonResult<UserRecord> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut users = self.store.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(LessonError::DuplicateAccount(email.to_string()));
        }

        let user = UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            generation_count: 0,
        };
        users.push(user.clone());
        self.store.put_users(&users)?;
        info!(email, "Registered account");
        Ok(user)
    }

    pub fn users(&self) -> LessonResult<Vec<UserRecord>> {
        Ok(self.store.users()?)
    }

    /// Points the session at `email`. Unknown emails are ignored.
    ///
    /// Returns the signed-in user so the caller can prefill the teacher name.
    pub fn start_session(&self, email: &str) -> LessonResult<Option<UserRecord>> {
        let user = self.store.users()?.into_iter().find(|u| u.email == email);
        match &user {
            Some(_) => {
                self.store.set_session_email(email)?;
                info!(email, "Session started");
            }
            None => debug!(email, "No account for email, session unchanged"),
        }
        Ok(user)
    }

    /// Clears the session pointer. The directory and its counters are kept.
    pub fn end_session(&self) -> LessonResult<()> {
        self.store.clear_session()?;
        info!("Session ended");
        Ok(())
    }

    /// Increments the user's generation count and persists the whole
    /// directory. Returns the new count.
    pub fn record_generation(&self, email: &str) -> LessonResult<u32> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut users = self.store.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| LessonError::NotFound(format!("account {}", email)))?;

        user.generation_count += 1;
        let count = user.generation_count;
        self.store.put_users(&users)?;
        debug!(email, count, "Recorded generation");
        Ok(count)
    }

    /// The signed-in user, if any. Storage failures are returned, so this is
    /// what quota decisions must use.
    pub fn signed_in_user(&self) -> LessonResult<Option<UserRecord>> {
        let Some(email) = self.store.session_email()? else {
            return Ok(None);
        };
        Ok(self.store.users()?.into_iter().find(|u| u.email == email))
    }

    /// The signed-in user for display. Never fails: an unreadable store is
    /// logged and treated as signed out.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.signed_in_user().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to resolve current user");
            None
        })
    }
}

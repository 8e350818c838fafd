//! User-record service boundary
//!
//! The remote CRUD store is an external collaborator; the core only names
//! its interface and can best-effort mirror progression into it. Nothing
//! here is consulted when loading local state, and no consistency between
//! local saves and the remote record is guaranteed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Progress;

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub username: String,
    pub stars: u32,
    pub current_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("user {0} not found")]
    UserNotFound(u32),
}

/// User-record store interface. The production implementation lives behind
/// an HTTP service; the core never depends on one existing.
pub trait UserRecords {
    fn create_user(&mut self, username: &str) -> UserRecord;
    fn get_user(&self, id: u32) -> Option<UserRecord>;
    fn get_user_by_username(&self, username: &str) -> Option<UserRecord>;
    fn set_stars(&mut self, id: u32, stars: u32) -> Result<UserRecord, RecordError>;
    fn set_level(&mut self, id: u32, level: u32) -> Result<UserRecord, RecordError>;
}

/// In-memory implementation for tests and offline play.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecords {
    users: BTreeMap<u32, UserRecord>,
    last_id: u32,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRecords for MemoryRecords {
    fn create_user(&mut self, username: &str) -> UserRecord {
        self.last_id += 1;
        let user = UserRecord {
            id: self.last_id,
            username: username.to_owned(),
            stars: 0,
            current_level: crate::consts::FIRST_LEVEL,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn get_user(&self, id: u32) -> Option<UserRecord> {
        self.users.get(&id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users.values().find(|u| u.username == username).cloned()
    }

    fn set_stars(&mut self, id: u32, stars: u32) -> Result<UserRecord, RecordError> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or(RecordError::UserNotFound(id))?;
        user.stars = stars;
        Ok(user.clone())
    }

    fn set_level(&mut self, id: u32, level: u32) -> Result<UserRecord, RecordError> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or(RecordError::UserNotFound(id))?;
        user.current_level = level;
        Ok(user.clone())
    }
}

/// Best-effort mirror of local progression into a user record.
pub fn mirror_progress(
    records: &mut dyn UserRecords,
    user_id: u32,
    progress: &Progress,
) -> Result<(), RecordError> {
    records.set_stars(user_id, progress.total_stars)?;
    records.set_level(user_id, progress.current_level)?;
    Ok(())
}

use crate::config::{ConfigError, RankingConfig};
use crate::pool::{Item, ItemId};
use crate::session::{RankingSession, SessionMeta, SessionTarget};
use gloo_storage::errors::StorageError as GlooStorageError;
use gloo_storage::{LocalStorage, Storage};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a session after a reload.
///
/// `max_selectable` and `initial_display_count` are written for readers of the
/// raw storage entry; a restore recomputes them from the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub meta: SessionMeta,
    pub items: Vec<Item>,
    pub displayed: Vec<ItemId>,
    pub remaining: Vec<ItemId>,
    pub round: u32,
    pub is_qualification_phase: bool,
    pub max_selectable: usize,
    pub initial_display_count: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot version {0} is not supported")]
    Version(u32),
    #[error("snapshot holds no items")]
    Empty,
    #[error("snapshot ranks are not contiguous")]
    Ranks,
    #[error("snapshot could not be decoded: {0}")]
    Decode(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>, SnapshotError>;
    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<(), SnapshotError>;
    fn remove(&self, key: &str);
}

/// Browser local storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSnapshotStore;

impl SnapshotStore for LocalSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>, SnapshotError> {
        match LocalStorage::get::<SessionSnapshot>(key) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(GlooStorageError::SerdeError(err)) => Err(SnapshotError::Decode(err.to_string())),
            Err(err) => Err(SnapshotError::Storage(err.to_string())),
        }
    }

    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        LocalStorage::set(key, snapshot).map_err(|err| SnapshotError::Storage(err.to_string()))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Keeps raw JSON in memory, the same shape local storage would hold.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>, SnapshotError> {
        match self.entries.borrow().get(key) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|err| SnapshotError::Decode(err.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|err| SnapshotError::Decode(err.to_string()))?;
        self.entries.borrow_mut().insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub fn snapshot<S: SnapshotStore + ?Sized>(
    store: &S,
    target: &SessionTarget,
    session: &RankingSession,
) {
    if let Err(err) = store.save(&target.snapshot_key(), &session.snapshot()) {
        warn!("Failed to persist ranking session: {}", err);
    }
}

/// Resume a stored session. Anything unreadable is dropped so the caller
/// starts from a fresh pool.
pub fn restore<S: SnapshotStore + ?Sized, R: Rng + ?Sized>(
    store: &S,
    target: &SessionTarget,
    config: &RankingConfig,
    rng: &mut R,
) -> Option<RankingSession> {
    let key = target.snapshot_key();
    let stored = match store.load(&key) {
        Ok(Some(stored)) => stored,
        Ok(None) => return None,
        Err(err) => {
            warn!("Discarding stored ranking session {}: {}", key, err);
            store.remove(&key);
            return None;
        }
    };

    match RankingSession::from_snapshot(stored, config.clone(), rng) {
        Ok(session) => {
            debug!("Resumed ranking session from {}", key);
            Some(session)
        }
        Err(SnapshotError::Config(err)) => {
            warn!("Not resuming {} with an invalid config: {}", key, err);
            None
        }
        Err(err) => {
            warn!("Discarding stored ranking session {}: {}", key, err);
            store.remove(&key);
            None
        }
    }
}

pub fn clear<S: SnapshotStore + ?Sized>(store: &S, target: &SessionTarget) {
    store.remove(&target.snapshot_key());
}

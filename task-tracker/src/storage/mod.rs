//! Durable key-value persistence for the task collection, the logged-in user
//! and the theme preference.
//!
//! Every record is stored as JSON under a fixed key. Reads never fail: a
//! missing or unreadable record is reported as absent so the application can
//! carry on with an empty collection.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::task::Task;
use crate::user::User;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use thiserror::Error;

pub const TASKS_KEY: &str = "personal-task-tracker-tasks";
pub const USER_KEY: &str = "personal-task-tracker-user";
pub const DARK_MODE_KEY: &str = "dark-mode";

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_CHARS: usize = 11;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access the local store")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize record")]
    Serialization(#[from] serde_json::Error),
}

/// Raw string slots, one value per key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to the records the tracker keeps in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    store: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the stored collection record by record.
    ///
    /// Records that fail to parse, have a blank title, or repeat an id seen
    /// earlier in the collection are dropped; the rest are kept in order.
    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> Vec<Task> {
        let records: Vec<serde_json::Value> = self.load(TASKS_KEY).unwrap_or_default();
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let task: Task = match serde_json::from_value(record) {
                Ok(task) => task,
                Err(err) => {
                    tracing::warn!("Dropping malformed task at index {}: {}", index, err);
                    continue;
                }
            };
            if task.title.trim().is_empty() {
                tracing::warn!("Dropping task {} with a blank title", task.id);
                continue;
            }
            if !seen.insert(task.id.clone()) {
                tracing::warn!("Dropping task with duplicate id {}", task.id);
                continue;
            }
            tasks.push(task);
        }
        tracing::debug!("Loaded {} tasks", tasks.len());
        tasks
    }

    /// Replaces the whole stored collection.
    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.save(TASKS_KEY, tasks)
    }

    pub fn load_user(&self) -> Option<User> {
        self.load::<User>(USER_KEY).filter(User::is_valid)
    }

    pub fn save_user(&self, user: &User) -> Result<(), StorageError> {
        self.save(USER_KEY, user)
    }

    pub fn clear_user(&self) -> Result<(), StorageError> {
        self.store.remove(USER_KEY)
    }

    pub fn load_dark_mode(&self) -> bool {
        self.load(DARK_MODE_KEY).unwrap_or(false)
    }

    pub fn save_dark_mode(&self, enabled: bool) -> Result<(), StorageError> {
        self.save(DARK_MODE_KEY, &enabled)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!("Failed to read '{}', treating it as absent: {}", key, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Ignoring malformed record '{}': {}", key, err);
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

/// Generates a task id: the base-36 millisecond timestamp followed by random
/// base-36 characters.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let mut rng = rand::thread_rng();
    let mut id = to_base36(millis);
    id.extend((0..ID_RANDOM_CHARS).map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char));
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ID_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

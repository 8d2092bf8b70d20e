use super::{KeyValueStore, StorageError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-process [`KeyValueStore`]. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();

        clone.set("key", "value").unwrap();

        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_clears_entry() {
        let store = MemoryStore::new();
        store.set("key", "value").unwrap();

        store.remove("key").unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get("key").unwrap(), None);
    }
}

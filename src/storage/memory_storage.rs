use crate::{error::Result, storage::Storage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage backend
///
/// Backs tests and embedders that bring their own persistence; the slot map
/// lives only as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.remove(key);
        Ok(())
    }
}

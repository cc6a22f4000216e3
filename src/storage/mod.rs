use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

pub mod memory_storage;

/// Durable key-value slots for serialized board state
///
/// Models the browser localStorage surface the board was built against: one
/// string value per key, read whole, written whole. The store only ever uses
/// a single key, [`crate::STORAGE_KEY`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value under `key`, None when the slot has never been written
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Clears the slot under `key`; clearing an absent slot is fine
    async fn clear(&self, key: &str) -> Result<()>;
}

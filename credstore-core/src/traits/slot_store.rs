//! Persistent storage slot abstraction

use async_trait::async_trait;

use crate::error::CoreResult;

/// Key-value string store the serialized record list lives in
///
/// Platform implementations:
/// - Desktop/CLI: `JsonSlotStore` (one JSON file per key)
/// - Diskless consumers and tests: `MemorySlotStore`
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Read the raw value at a key
    ///
    /// # Arguments
    /// * `key` - Slot key
    ///
    /// # Returns
    /// * `Ok(Some(value))` - the slot holds a value
    /// * `Ok(None)` - nothing is stored under the key
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Overwrite the value at a key
    ///
    /// # Arguments
    /// * `key` - Slot key
    /// * `value` - Raw value to store
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;
}

//! JSON-file-backed storage slots
//!
//! Keeps one file per slot under a base directory.
//! Implements the credstore-core `SlotStore` trait.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use credstore_core::error::{CoreError, CoreResult};
use credstore_core::traits::SlotStore;
use tokio::fs;

/// Slot store keeping one `<key>.json` file per slot.
///
/// The base directory is supplied by the caller (it is not auto-detected),
/// so tests can point it at a temporary directory.
pub struct JsonSlotStore {
    /// Base directory holding the slot files
    base_dir: PathBuf,
}

impl JsonSlotStore {
    /// Create a slot store rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        log::debug!("Slot store directory: {base_dir:?}");
        Self { base_dir }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Ensure the base directory exists
    async fn ensure_base_dir(&self) -> CoreResult<()> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl SlotStore for JsonSlotStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(self.slot_path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.ensure_base_dir().await?;
        fs::write(self.slot_path(key), value)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

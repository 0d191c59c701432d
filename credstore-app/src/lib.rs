//! Platform-agnostic application bootstrap for Credstore.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection).

pub mod adapters;

use std::sync::Arc;

use credstore_core::error::{CoreError, CoreResult};
use credstore_core::services::AccountStore;
use credstore_core::traits::SlotStore;

/// Platform-agnostic application state.
///
/// Holds the account store. Every frontend constructs this once at startup
/// via `AppStateBuilder` and shares it from there.
pub struct AppState {
    /// Account record store
    pub account_store: Arc<AccountStore>,
}

impl AppState {
    /// Run the startup sequence: restore the persisted record list.
    ///
    /// Malformed persisted data is recovered inside the store (reset to
    /// empty); only storage access failures surface here.
    pub async fn run_startup(&self) -> CoreResult<()> {
        self.account_store.load_from_storage().await?;
        let count = self.account_store.accounts().await.len();
        log::info!("Account restoration complete: {count} records");
        Ok(())
    }
}

/// Builder for constructing `AppState` with a platform-specific adapter.
///
/// # Required adapters
/// - `slot_store`: where the serialized record list lives
pub struct AppStateBuilder {
    slot_store: Option<Arc<dyn SlotStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { slot_store: None }
    }

    #[must_use]
    pub fn slot_store(mut self, slots: Arc<dyn SlotStore>) -> Self {
        self.slot_store = Some(slots);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let slot_store = self
            .slot_store
            .ok_or_else(|| CoreError::ValidationError("slot_store is required".to_string()))?;

        Ok(AppState {
            account_store: Arc::new(AccountStore::new(slot_store)),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

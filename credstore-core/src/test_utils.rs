//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::AccountStore;
use crate::traits::SlotStore;
use crate::types::{AccountKind, AccountRecord, LabelToken};

// ===== MockSlotStore =====

pub struct MockSlotStore {
    slots: RwLock<HashMap<String, String>>,
    /// When Some, `set` returns this error (for testing save failure paths)
    set_error: RwLock<Option<String>>,
}

impl MockSlotStore {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            set_error: RwLock::new(None),
        }
    }

    pub async fn set_set_error(&self, err: Option<String>) {
        *self.set_error.write().await = err;
    }

    /// Seed a raw value directly, bypassing the store under test
    pub async fn seed(&self, key: &str, value: &str) {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SlotStore for MockSlotStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        if let Some(ref msg) = *self.set_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ===== Factory methods =====

/// Create a test `AccountStore` with its backing mock slot store
pub fn create_test_store() -> (AccountStore, Arc<MockSlotStore>) {
    let slots = Arc::new(MockSlotStore::new());
    let store = AccountStore::new(slots.clone());
    (store, slots)
}

/// Create a populated record for tests
pub fn make_record(id: &str) -> AccountRecord {
    AccountRecord {
        id: id.to_string(),
        labels: vec![LabelToken {
            text: "staging".to_string(),
        }],
        kind: AccountKind::Ldap,
        login: format!("user-{id}"),
        password: None,
    }
}

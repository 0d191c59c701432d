//! Account record store
//!
//! Holds the in-memory record list (the sole source of truth while the
//! process runs) and snapshots it wholesale to a single storage slot on
//! demand.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::{broadcast, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::traits::SlotStore;
use crate::types::{AccountKind, AccountPatch, AccountRecord};

/// Slot key the serialized record list is stored under
pub const ACCOUNTS_SLOT_KEY: &str = "account-records";

/// Capacity of the change notification channel
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Change notification emitted after a load or mutation completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// In-memory state was replaced from storage (or reset on malformed data)
    Loaded,
    /// A blank record was appended
    Added(String),
    /// A record was removed
    Removed(String),
    /// A record was patched
    Updated(String),
    /// A record was replaced or appended
    Upserted(String),
}

/// Account record store
///
/// Construct one instance per application and share it via `Arc`; there is
/// no implicit global. The storage slot is a snapshot written on demand,
/// never read continuously.
pub struct AccountStore {
    slots: Arc<dyn SlotStore>,
    accounts: RwLock<Vec<AccountRecord>>,
    events: broadcast::Sender<StoreEvent>,
}

impl AccountStore {
    /// Create a store backed by the given slot store
    #[must_use]
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            slots,
            accounts: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Snapshot of the current record sequence
    pub async fn accounts(&self) -> Vec<AccountRecord> {
        self.accounts.read().await.clone()
    }

    /// Subscribe to change notifications
    ///
    /// Receivers that lag or drop never block or fail a mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: StoreEvent) {
        // A send error only means nobody is listening
        let _ = self.events.send(event);
    }

    // ===== Persistence operations =====

    /// Replace the in-memory sequence from the storage slot
    ///
    /// An absent slot leaves the current state untouched. Malformed data
    /// (unparsable JSON, or not an array of records) resets the sequence to
    /// empty; the recovery is logged, not surfaced to the caller. Slot read
    /// failures propagate. Never writes back to storage.
    pub async fn load_from_storage(&self) -> CoreResult<()> {
        let Some(raw) = self.slots.get(ACCOUNTS_SLOT_KEY).await? else {
            log::debug!("No persisted records under '{ACCOUNTS_SLOT_KEY}', keeping current state");
            return Ok(());
        };

        let mut accounts = self.accounts.write().await;
        match serde_json::from_str::<Vec<AccountRecord>>(&raw) {
            Ok(parsed) => {
                log::info!("Loaded {} account records from storage", parsed.len());
                *accounts = parsed;
            }
            Err(e) => {
                log::warn!("Malformed persisted records, resetting to empty: {e}");
                accounts.clear();
            }
        }
        drop(accounts);

        self.notify(StoreEvent::Loaded);
        Ok(())
    }

    /// Serialize the entire current sequence and overwrite the slot
    ///
    /// No partial or incremental writes. Write failures propagate to the
    /// caller unrecovered.
    pub async fn save_to_storage(&self) -> CoreResult<()> {
        let raw = {
            let accounts = self.accounts.read().await;
            serde_json::to_string(&*accounts)
                .map_err(|e| CoreError::SerializationError(e.to_string()))?
        };

        self.slots.set(ACCOUNTS_SLOT_KEY, &raw).await
    }

    // ===== Mutation operations =====

    /// Append a blank local record with a freshly generated id
    ///
    /// The new record has no labels, an empty login, and an empty (not
    /// absent) password. Returns the created record.
    pub async fn add_account(&self) -> AccountRecord {
        let mut accounts = self.accounts.write().await;

        // Collisions are practically impossible within one session, but id
        // uniqueness must hold after every operation
        let mut id = generate_record_id();
        while accounts.iter().any(|a| a.id == id) {
            id = generate_record_id();
        }

        let record = AccountRecord {
            id: id.clone(),
            labels: Vec::new(),
            kind: AccountKind::Local,
            login: String::new(),
            password: Some(String::new()),
        };
        accounts.push(record.clone());
        drop(accounts);

        self.notify(StoreEvent::Added(id));
        record
    }

    /// Remove the record whose id matches exactly
    ///
    /// Unknown ids are a silent no-op; the remaining records keep their
    /// relative order. Returns whether a record was removed.
    pub async fn remove_account(&self, id: &str) -> bool {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        let removed = accounts.len() != before;
        drop(accounts);

        if removed {
            self.notify(StoreEvent::Removed(id.to_string()));
        }
        removed
    }

    /// Shallow-merge a patch into the record with the given id
    ///
    /// Fields absent from the patch are retained unchanged. Unknown ids are
    /// a silent no-op (`None`). Returns the updated record when one matched.
    pub async fn update_account(&self, id: &str, patch: AccountPatch) -> Option<AccountRecord> {
        let updated = {
            let mut accounts = self.accounts.write().await;
            let record = accounts.iter_mut().find(|a| a.id == id)?;

            if let Some(labels) = patch.labels {
                record.labels = labels;
            }
            if let Some(kind) = patch.kind {
                record.kind = kind;
            }
            if let Some(login) = patch.login {
                record.login = login;
            }
            if let Some(password) = patch.password {
                record.password = password;
            }
            record.clone()
        };

        self.notify(StoreEvent::Updated(id.to_string()));
        Some(updated)
    }

    /// Replace the record with the same id wholly, or append when absent
    ///
    /// Unlike `update_account` this takes the complete record, id included,
    /// and performs no field-level merge.
    pub async fn upsert_account(&self, record: AccountRecord) {
        let id = record.id.clone();
        {
            let mut accounts = self.accounts.write().await;
            if let Some(pos) = accounts.iter().position(|a| a.id == record.id) {
                accounts[pos] = record;
            } else {
                accounts.push(record);
            }
        }

        self.notify(StoreEvent::Upserted(id));
    }
}

/// Generate a record id: millisecond timestamp plus a random hex suffix
///
/// Uniqueness only matters within one in-memory sequence; no cross-session
/// guarantee is made or needed.
fn generate_record_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u64 = rand::rng().random();
    format!("{millis}-{suffix:x}")
}

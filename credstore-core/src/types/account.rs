//! Account record types

use serde::{Deserialize, Serialize};

/// Backend an account authenticates against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
    /// Directory-backed account
    Ldap,
    /// Locally managed account
    Local,
}

/// Free-text tag attached to an account record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelToken {
    /// Tag text
    pub text: String,
}

/// One stored credential entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    /// Record ID, unique within the store, immutable after creation
    pub id: String,
    /// Ordered label sequence; duplicates permitted
    pub labels: Vec<LabelToken>,
    /// Account backend
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Login name; no uniqueness constraint
    pub login: String,
    /// Local password. `None` means no local password applies (e.g. for
    /// LDAP-backed accounts) and serializes as JSON `null`; `Some("")` is an
    /// empty password. The key is always present on the wire.
    pub password: Option<String>,
}

/// Field-level merge payload for `AccountStore::update_account`
///
/// Fields left as `None` are retained unchanged on the target record.
/// The record id is not patchable.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    /// New label sequence (replaced wholesale, not appended)
    pub labels: Option<Vec<LabelToken>>,
    /// New account backend
    pub kind: Option<AccountKind>,
    /// New login name
    pub login: Option<String>,
    /// New password. The outer `None` leaves the password unchanged;
    /// `Some(None)` clears it to "no local password applies".
    pub password: Option<Option<String>>,
}

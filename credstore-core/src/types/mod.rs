//! Type definitions module

mod account;

pub use account::{AccountKind, AccountPatch, AccountRecord, LabelToken};

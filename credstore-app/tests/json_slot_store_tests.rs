#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `JsonSlotStore`: covers the raw `SlotStore`
//! contract and persistence through a real `AccountStore`.

use std::sync::Arc;

use credstore_app::adapters::JsonSlotStore;
use credstore_core::services::{AccountStore, ACCOUNTS_SLOT_KEY};
use credstore_core::traits::SlotStore;
use credstore_core::types::{AccountKind, AccountPatch, AccountRecord, LabelToken};

// ===== Helpers =====

fn create_test_store(dir: &std::path::Path) -> AccountStore {
    AccountStore::new(Arc::new(JsonSlotStore::new(dir)))
}

fn make_record(id: &str) -> AccountRecord {
    AccountRecord {
        id: id.to_string(),
        labels: vec![LabelToken {
            text: "directory".to_string(),
        }],
        kind: AccountKind::Ldap,
        login: format!("user-{id}"),
        password: None,
    }
}

// ===== Raw slot contract =====

#[tokio::test]
async fn get_missing_key_returns_none() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let slots = JsonSlotStore::new(tmp.path());

    let value = slots.get("account-records").await.unwrap();

    assert!(value.is_none());
}

#[tokio::test]
async fn set_then_get_round_trips() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let slots = JsonSlotStore::new(tmp.path());

    slots.set("account-records", "[]").await.unwrap();

    assert_eq!(
        slots.get("account-records").await.unwrap(),
        Some("[]".to_string())
    );
}

#[tokio::test]
async fn set_creates_missing_base_dir() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let nested = tmp.path().join("credstore").join("slots");
    let slots = JsonSlotStore::new(&nested);

    slots.set("account-records", "[]").await.unwrap();

    assert!(nested.join("account-records.json").exists());
}

#[tokio::test]
async fn set_overwrites_prior_value() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let slots = JsonSlotStore::new(tmp.path());

    slots.set("account-records", "[1]").await.unwrap();
    slots.set("account-records", "[2]").await.unwrap();

    assert_eq!(
        slots.get("account-records").await.unwrap(),
        Some("[2]".to_string())
    );
}

// ===== Persistence through the store =====

#[tokio::test]
async fn add_save_load_reproduces_sequence_in_fresh_store() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let store = create_test_store(tmp.path());
    let created = store.add_account().await;
    assert_eq!(created.kind, AccountKind::Local);
    assert_eq!(created.password, Some(String::new()));
    assert!(!created.id.is_empty());
    store.save_to_storage().await.unwrap();

    let fresh = create_test_store(tmp.path());
    fresh.load_from_storage().await.unwrap();

    assert_eq!(fresh.accounts().await, vec![created]);
}

#[tokio::test]
async fn saved_records_survive_mutations_and_round_trip() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let store = create_test_store(tmp.path());
    store.upsert_account(make_record("a")).await;
    store.upsert_account(make_record("b")).await;
    store
        .update_account(
            "a",
            AccountPatch {
                login: Some("rebound".to_string()),
                ..AccountPatch::default()
            },
        )
        .await
        .unwrap();
    store.remove_account("b").await;
    let before = store.accounts().await;
    store.save_to_storage().await.unwrap();

    let fresh = create_test_store(tmp.path());
    fresh.load_from_storage().await.unwrap();

    assert_eq!(fresh.accounts().await, before);
}

#[tokio::test]
async fn persisted_wire_format_is_stable() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let store = create_test_store(tmp.path());
    store.add_account().await;
    store.upsert_account(make_record("ldap-1")).await;
    store.save_to_storage().await.unwrap();

    let raw = tokio::fs::read_to_string(tmp.path().join(format!("{ACCOUNTS_SLOT_KEY}.json")))
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let records = value.as_array().expect("persisted value must be an array");
    assert_eq!(records.len(), 2);

    // Blank local record: type tag, empty (not null) password
    assert_eq!(records[0]["type"], "LOCAL");
    assert_eq!(records[0]["password"], "");
    assert_eq!(records[0]["labels"], serde_json::json!([]));

    // Directory record: null password key still present, label objects
    assert_eq!(records[1]["id"], "ldap-1");
    assert_eq!(records[1]["type"], "LDAP");
    assert!(records[1]["password"].is_null());
    assert_eq!(records[1]["labels"][0]["text"], "directory");
    assert_eq!(records[1]["login"], "user-ldap-1");
}

#[tokio::test]
async fn load_recovers_from_malformed_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    tokio::fs::write(
        tmp.path().join(format!("{ACCOUNTS_SLOT_KEY}.json")),
        "not json",
    )
    .await
    .unwrap();

    let store = create_test_store(tmp.path());
    store.upsert_account(make_record("pre")).await;
    store.load_from_storage().await.unwrap();

    assert!(store.accounts().await.is_empty());
}

#[tokio::test]
async fn load_recovers_from_non_array_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    tokio::fs::write(
        tmp.path().join(format!("{ACCOUNTS_SLOT_KEY}.json")),
        r#"{"id": "a"}"#,
    )
    .await
    .unwrap();

    let store = create_test_store(tmp.path());
    store.load_from_storage().await.unwrap();

    assert!(store.accounts().await.is_empty());
}

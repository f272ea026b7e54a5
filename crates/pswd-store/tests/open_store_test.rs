//! Integration tests for the load → decrypt → decode pipeline.
//!
//! Builds an encrypted store the way the browser extension writes it,
//! places it under its derived file name and opens it back.

use pswd_crypto::{seal, DecryptError, Key, Keychain};
use pswd_store::{open_store, EntryDecrypter, FileSource, StoreError};
use tempfile::TempDir;

const STORE_KEY: [u8; 32] = [0x5a; 32];
const ENTRY_KEY: [u8; 32] = [0x33; 32];

fn master_hex() -> String {
    format!("{}{}", "c0".repeat(32), hex::encode(STORE_KEY))
}

fn buffer_json(data: &[u8]) -> String {
    let items: Vec<String> = data.iter().map(|b| b.to_string()).collect();
    format!(r#"{{ "type": "Buffer", "data": [{}] }}"#, items.join(","))
}

fn sealed_secret(value: &str) -> Vec<u8> {
    let json = serde_json::to_string(value).unwrap();
    seal(&ENTRY_KEY, json.as_bytes()).unwrap()
}

fn encrypted_store() -> Vec<u8> {
    let json = format!(
        r#"{{
            "version": "0.0.1",
            "tags": {{ "0": {{ "title": "All" }}, "1": {{ "title": "Social" }} }},
            "entries": {{
                "0": {{
                    "title": "https://social.example",
                    "note": "Social",
                    "username": "alice",
                    "nonce": "0badc0de",
                    "tags": [1],
                    "password": {},
                    "safe_note": {}
                }}
            }}
        }}"#,
        buffer_json(&sealed_secret("correct horse battery staple")),
        buffer_json(&sealed_secret("recovery codes: 1234")),
    );
    seal(&STORE_KEY, json.as_bytes()).unwrap()
}

#[tokio::test]
async fn opens_store_by_derived_name_and_decrypts_entry() {
    let tmp = TempDir::new().unwrap();
    let keychain = Keychain::from_master_hex(&master_hex()).unwrap();
    std::fs::write(tmp.path().join(keychain.store_name()), encrypted_store()).unwrap();

    let source = FileSource::new(None, tmp.path());
    let store = open_store(&keychain, &source).await.expect("store should open");

    assert_eq!(store.name, keychain.store_name());
    assert_eq!(store.tags.len(), 2);
    assert_eq!(store.entries.len(), 1);

    let entry = store.entry("0").unwrap();
    assert_eq!(entry.title, "Social");
    assert_eq!(entry.url, "https://social.example");
    assert_eq!(entry.tags, ["Social"]);
    assert_eq!(
        entry.unlock_prompt(),
        "Unlock social.example for user alice?"
    );

    let decrypted = EntryDecrypter::new(Key::from_bytes(ENTRY_KEY.to_vec()))
        .decrypt(entry)
        .unwrap();
    assert_eq!(decrypted.password, "correct horse battery staple");
    assert_eq!(decrypted.safe_note, "recovery codes: 1234");
}

#[tokio::test]
async fn explicit_path_overrides_derived_name() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("backup.pswd");
    std::fs::write(&path, encrypted_store()).unwrap();

    let keychain = Keychain::from_master_hex(&master_hex()).unwrap();
    let source = FileSource::new(Some(path), "/nonexistent");
    let store = open_store(&keychain, &source).await.unwrap();
    assert_eq!(store.entries.len(), 1);
}

#[tokio::test]
async fn missing_file_is_load_error() {
    let tmp = TempDir::new().unwrap();
    let keychain = Keychain::from_master_hex(&master_hex()).unwrap();
    let source = FileSource::new(None, tmp.path());

    let err = open_store(&keychain, &source).await.unwrap_err();
    match err {
        StoreError::Load { path, .. } => {
            assert_eq!(path, tmp.path().join(keychain.store_name()))
        }
        other => panic!("expected load error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_master_key_fails_authentication() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store.pswd");
    std::fs::write(&path, encrypted_store()).unwrap();

    let other = format!("{}{}", "c0".repeat(32), "ab".repeat(32));
    let keychain = Keychain::from_master_hex(&other).unwrap();
    let err = open_store(&keychain, &FileSource::new(Some(path), "."))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Decrypt {
            source: DecryptError::Authentication,
            ..
        }
    ));
}

#[tokio::test]
async fn truncated_store_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store.pswd");
    std::fs::write(&path, &encrypted_store()[..20]).unwrap();

    let keychain = Keychain::from_master_hex(&master_hex()).unwrap();
    let err = open_store(&keychain, &FileSource::new(Some(path), "."))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Decrypt {
            source: DecryptError::TooShort { len: 20 },
            ..
        }
    ));
}

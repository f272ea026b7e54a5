//! Decrypted store JSON → [`Store`]
//!
//! The decrypted store looks like:
//! ```json
//! {
//!   "version": "0.0.1",
//!   "tags": { "0": { "title": "All", "icon": "home" } },
//!   "entries": {
//!     "0": {
//!       "title": "https://github.com",
//!       "note": "GitHub",
//!       "username": "alice",
//!       "nonce": "9f4c...",
//!       "tags": [0],
//!       "password": { "type": "Buffer", "data": [12, 34, ...] },
//!       "safe_note": { "type": "Buffer", "data": [56, 78, ...] }
//!     }
//!   }
//! }
//! ```
//!
//! An entry's JSON `title` holds the URL and `note` holds the display title.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};
use crate::model::{EncryptedEntry, Store, Tag};

#[derive(Debug, Deserialize)]
struct RawStore {
    tags: HashMap<String, RawTag>,
    entries: HashMap<String, RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    title: String,
    note: String,
    username: String,
    nonce: String,
    #[serde(default)]
    tags: Vec<TagId>,
    password: RawBuffer,
    safe_note: RawBuffer,
}

/// Node.js `Buffer` serialised with `JSON.stringify`
#[derive(Debug, Deserialize)]
struct RawBuffer {
    data: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagId {
    Number(u64),
    Text(String),
}

impl TagId {
    fn key(&self) -> String {
        match self {
            TagId::Number(n) => n.to_string(),
            TagId::Text(s) => s.clone(),
        }
    }
}

/// Numeric ids first in numeric order, then anything else lexically.
fn id_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Decode decrypted store JSON into a [`Store`] named `name`.
pub fn decode_store(name: &str, json: &[u8]) -> StoreResult<Store> {
    let raw: RawStore =
        serde_json::from_slice(json).map_err(|e| StoreError::decode("store JSON", e))?;

    let mut tags: Vec<Tag> = raw
        .tags
        .into_iter()
        .map(|(id, t)| Tag { id, title: t.title })
        .collect();
    tags.sort_by(|a, b| id_order(&a.id, &b.id));

    let tag_titles: HashMap<&str, &str> = tags
        .iter()
        .map(|t| (t.id.as_str(), t.title.as_str()))
        .collect();

    let mut entries: Vec<EncryptedEntry> = raw
        .entries
        .into_iter()
        .map(|(id, e)| {
            let entry_tags = e
                .tags
                .iter()
                .filter_map(|t| {
                    let key = t.key();
                    let title = tag_titles.get(key.as_str()).map(|s| s.to_string());
                    if title.is_none() {
                        tracing::debug!(entry = %id, tag = %key, "entry references unknown tag");
                    }
                    title
                })
                .collect();
            EncryptedEntry {
                id,
                url: e.title,
                title: e.note,
                username: e.username,
                nonce: e.nonce,
                tags: entry_tags,
                encrypted_password: e.password.data,
                encrypted_safe_note: e.safe_note.data,
            }
        })
        .collect();
    entries.sort_by(|a, b| id_order(&a.id, &b.id));

    tracing::debug!(tags = tags.len(), entries = entries.len(), "store decoded");

    Ok(Store {
        name: name.to_string(),
        tags,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "0.0.1",
        "extVersion": "0.6.12",
        "config": { "orderType": "date" },
        "tags": {
            "0": { "title": "All", "icon": "home" },
            "1": { "title": "Work", "icon": "briefcase" },
            "10": { "title": "Banking", "icon": "bank" }
        },
        "entries": {
            "2": {
                "title": "My bank",
                "note": "Bank",
                "username": "bob",
                "nonce": "00ff",
                "tags": [10, 42],
                "password": { "type": "Buffer", "data": [4, 5] },
                "safe_note": { "type": "Buffer", "data": [] }
            },
            "0": {
                "title": "https://github.com",
                "note": "GitHub",
                "username": "alice",
                "nonce": "abcd",
                "tags": [1],
                "password": { "type": "Buffer", "data": [1, 2, 3] },
                "safe_note": { "type": "Buffer", "data": [9] },
                "success": true,
                "export": false
            }
        }
    }"#;

    #[test]
    fn decodes_sample_store() {
        let store = decode_store("x.pswd", SAMPLE.as_bytes()).unwrap();
        assert_eq!(store.name, "x.pswd");

        let tag_titles: Vec<&str> = store.tags.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(tag_titles, ["All", "Work", "Banking"]);

        assert_eq!(store.entries.len(), 2);
        let github = &store.entries[0];
        assert_eq!(github.id, "0");
        assert_eq!(github.url, "https://github.com");
        assert_eq!(github.title, "GitHub");
        assert_eq!(github.username, "alice");
        assert_eq!(github.nonce, "abcd");
        assert_eq!(github.tags, ["Work"]);
        assert_eq!(github.encrypted_password, [1, 2, 3]);
        assert_eq!(github.encrypted_safe_note, [9]);

        let bank = store.entry("2").unwrap();
        assert_eq!(bank.tags, ["Banking"]);
        assert!(bank.encrypted_safe_note.is_empty());
    }

    #[test]
    fn missing_tags_list_is_empty() {
        let json = r#"{ "tags": {}, "entries": { "0": {
            "title": "t", "note": "n", "username": "u", "nonce": "00",
            "password": { "data": [] }, "safe_note": { "data": [] } } } }"#;
        let store = decode_store("s", json.as_bytes()).unwrap();
        assert!(store.entries[0].tags.is_empty());
    }

    #[test]
    fn string_tag_ids_resolve() {
        let json = r#"{ "tags": { "3": { "title": "Home" } }, "entries": { "0": {
            "title": "t", "note": "n", "username": "u", "nonce": "00", "tags": ["3"],
            "password": { "data": [] }, "safe_note": { "data": [] } } } }"#;
        let store = decode_store("s", json.as_bytes()).unwrap();
        assert_eq!(store.entries[0].tags, ["Home"]);
    }

    #[test]
    fn missing_field_is_decode_error() {
        let json = r#"{ "tags": {}, "entries": { "0": { "title": "t" } } }"#;
        let err = decode_store("s", json.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn not_json_is_decode_error() {
        let err = decode_store("s", b"\x00\x01garbage").unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn id_order_is_numeric_first() {
        let mut ids = vec!["b", "10", "2", "a", "1"];
        ids.sort_by(|a, b| id_order(a, b));
        assert_eq!(ids, ["1", "2", "10", "a", "b"]);
    }
}

//! pswd-store: TREZOR Password Manager store handling
//!
//! Pipeline: read `<store name>.pswd` → AES-256-GCM decrypt with the store
//! key → decode JSON → entries whose secrets stay packaged until an entry
//! key is supplied.

pub mod decode;
pub mod decrypter;
pub mod error;
pub mod loader;
pub mod model;

pub use decode::decode_store;
pub use decrypter::{EntryDecrypter, StoreDecrypter};
pub use error::{StoreError, StoreResult};
pub use loader::{open_store, FileSource};
pub use model::{DecryptedEntry, EncryptedEntry, Store, Tag};

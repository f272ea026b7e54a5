//! Store and entry decryption
//!
//! Both the store file and each entry secret are AES-256-GCM packages
//! (`IV || tag || ciphertext`). Unlike the stdin decryptor these paths
//! propagate failures.

use pswd_crypto::{Key, Keychain};

use crate::error::{StoreError, StoreResult};
use crate::model::{DecryptedEntry, EncryptedEntry};

/// Decrypts the store file with the keychain's store key.
#[derive(Debug)]
pub struct StoreDecrypter {
    store_key: Key,
}

impl StoreDecrypter {
    pub fn new(keychain: &Keychain) -> StoreResult<Self> {
        let store_key = keychain
            .store_key()
            .map_err(|e| StoreError::decrypt("store key", e))?;
        Ok(Self { store_key })
    }

    pub fn decrypt(&self, encrypted_store: &[u8]) -> StoreResult<Vec<u8>> {
        pswd_crypto::open(self.store_key.as_bytes(), encrypted_store)
            .map_err(|e| StoreError::decrypt("store", e))
    }
}

/// Decrypts entry secrets with a per-entry key.
#[derive(Debug)]
pub struct EntryDecrypter {
    entry_key: Key,
}

impl EntryDecrypter {
    pub fn new(entry_key: Key) -> Self {
        Self { entry_key }
    }

    pub fn from_hex(entry_key_hex: &str) -> StoreResult<Self> {
        let entry_key =
            Key::from_hex(entry_key_hex).map_err(|e| StoreError::decrypt("entry key", e))?;
        Ok(Self::new(entry_key))
    }

    /// Decrypt password and safe note. Each plaintext is a JSON string literal.
    pub fn decrypt(&self, entry: &EncryptedEntry) -> StoreResult<DecryptedEntry> {
        let password = self.decrypt_field(entry, "password", &entry.encrypted_password)?;
        let safe_note = self.decrypt_field(entry, "safe_note", &entry.encrypted_safe_note)?;
        Ok(DecryptedEntry {
            id: entry.id.clone(),
            url: entry.url.clone(),
            title: entry.title.clone(),
            username: entry.username.clone(),
            nonce: entry.nonce.clone(),
            tags: entry.tags.clone(),
            password,
            safe_note,
        })
    }

    fn decrypt_field(
        &self,
        entry: &EncryptedEntry,
        field: &str,
        package: &[u8],
    ) -> StoreResult<String> {
        let what = format!("entry {} {field}", entry.id);
        let plaintext = pswd_crypto::open(self.entry_key.as_bytes(), package)
            .map_err(|e| StoreError::decrypt(what.clone(), e))?;
        serde_json::from_slice::<String>(&plaintext).map_err(|e| StoreError::decode(what, e))
    }
}

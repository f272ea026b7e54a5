//! Reading the encrypted store from disk

use std::path::{Path, PathBuf};

use pswd_crypto::Keychain;

use crate::decode::decode_store;
use crate::decrypter::StoreDecrypter;
use crate::error::{StoreError, StoreResult};
use crate::model::Store;

/// Where to find the store file: an explicit path, or `dir/<store name>`.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: Option<PathBuf>,
    pub dir: PathBuf,
}

impl FileSource {
    pub fn new(path: Option<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            path,
            dir: dir.into(),
        }
    }

    pub fn resolve(&self, store_name: &str) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self.dir.join(store_name),
        }
    }

    pub async fn load_store(&self, store_name: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve(store_name);
        read(&path).await
    }
}

async fn read(path: &Path) -> StoreResult<Vec<u8>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "store file read");
    Ok(bytes)
}

/// Load, decrypt and decode the store for `keychain`.
pub async fn open_store(keychain: &Keychain, source: &FileSource) -> StoreResult<Store> {
    let name = keychain.store_name();
    let encrypted = source.load_store(name).await?;
    let json = StoreDecrypter::new(keychain)?.decrypt(&encrypted)?;
    let store = decode_store(name, &json)?;
    tracing::info!(
        store = %name,
        entries = store.entries.len(),
        tags = store.tags.len(),
        "store opened"
    );
    Ok(store)
}

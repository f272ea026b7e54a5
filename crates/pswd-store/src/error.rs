use std::path::PathBuf;

use pswd_crypto::DecryptError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("loading store {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decrypting {what}: {source}")]
    Decrypt {
        what: String,
        #[source]
        source: DecryptError,
    },

    #[error("decoding {what}: {reason}")]
    Decode { what: String, reason: String },

    #[error("no entry with id {0}")]
    EntryNotFound(String),
}

impl StoreError {
    pub(crate) fn decrypt(what: impl Into<String>, source: DecryptError) -> Self {
        StoreError::Decrypt {
            what: what.into(),
            source,
        }
    }

    pub(crate) fn decode(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        StoreError::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

//! Symmetric key material

use rand::RngCore;
use zeroize::Zeroize;

use crate::error::DecryptError;
use crate::KEY_SIZE;

/// Raw AES key bytes. Zeroized on drop.
///
/// The length is not checked here: a key of the wrong size is accepted and
/// rejected by the cipher when a package is opened.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Decode a hex string (either case, no prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, DecryptError> {
        hex::decode(hex_str.trim())
            .map(Self::from_bytes)
            .map_err(|e| DecryptError::InvalidKeyHex(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate a random 256-bit key.
pub fn generate_key() -> Key {
    let mut bytes = [0u8; KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    let key = Key::from_bytes(bytes.to_vec());
    bytes.zeroize();
    key
}

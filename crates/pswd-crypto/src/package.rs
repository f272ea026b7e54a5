//! AES-256-GCM package decryption/encryption
//!
//! Package format (binary):
//! ```text
//! [12 bytes: IV][16 bytes: GCM tag][N bytes: ciphertext]
//! ```
//!
//! No associated data. The tag precedes the ciphertext, unlike the
//! `ciphertext || tag` layout the `aead` crate produces, so the detached
//! in-place API is used in both directions.

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce, Tag,
};
use rand::RngCore;

use crate::error::DecryptError;
use crate::{HEADER_SIZE, IV_SIZE, TAG_SIZE};

/// Borrowed view of a package split into its three regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package<'a> {
    pub iv: &'a [u8],
    pub tag: &'a [u8],
    pub ciphertext: &'a [u8],
}

impl<'a> Package<'a> {
    /// Split `data` into IV, tag and ciphertext. The ciphertext may be empty.
    pub fn parse(data: &'a [u8]) -> Result<Self, DecryptError> {
        if data.len() < HEADER_SIZE {
            return Err(DecryptError::TooShort { len: data.len() });
        }
        let (iv, rest) = data.split_at(IV_SIZE);
        let (tag, ciphertext) = rest.split_at(TAG_SIZE);
        Ok(Self { iv, tag, ciphertext })
    }
}

/// Authenticate and decrypt a package, returning the raw plaintext.
pub fn open(key: &[u8], data: &[u8]) -> Result<Vec<u8>, DecryptError> {
    let package = Package::parse(data)?;

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| DecryptError::InvalidKeyLength(key.len()))?;
    let nonce = Nonce::from_slice(package.iv);

    let mut buffer = package.ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, Tag::from_slice(package.tag))
        .map_err(|_| DecryptError::Authentication)?;

    tracing::debug!(bytes = buffer.len(), "package authenticated");
    Ok(buffer)
}

/// Decrypt a package to text, swallowing every failure.
///
/// On failure a single `error <description>` event is logged and the empty
/// string is returned, so a failed decryption looks like an empty plaintext
/// to the caller. Invalid UTF-8 in the plaintext is replaced with U+FFFD.
pub fn decrypt(key: &[u8], data: &[u8]) -> String {
    match open(key, data) {
        Ok(plaintext) => String::from_utf8_lossy(&plaintext).into_owned(),
        Err(e) => {
            tracing::error!("error {e}");
            String::new()
        }
    }
}

/// Encrypt `plaintext` under a fresh random IV.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, DecryptError> {
    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);
    seal_with_iv(key, &iv, plaintext)
}

/// Encrypt `plaintext` under a caller-chosen IV.
///
/// Reusing an IV with the same key breaks GCM; only use this for fixed
/// test vectors.
pub fn seal_with_iv(
    key: &[u8],
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| DecryptError::InvalidKeyLength(key.len()))?;
    let nonce = Nonce::from_slice(iv);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut buffer)
        .map_err(|_| DecryptError::PlaintextTooLong)?;

    let mut package = Vec::with_capacity(HEADER_SIZE + buffer.len());
    package.extend_from_slice(iv);
    package.extend_from_slice(&tag);
    package.extend_from_slice(&buffer);
    Ok(package)
}

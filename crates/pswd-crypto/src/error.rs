use thiserror::Error;

/// Everything that can go wrong opening a package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    #[error("package too short: {len} bytes (minimum {})", crate::HEADER_SIZE)]
    TooShort { len: usize },

    #[error("invalid key length: {0} bytes (expected {})", crate::KEY_SIZE)]
    InvalidKeyLength(usize),

    #[error("invalid key hex: {0}")]
    InvalidKeyHex(String),

    #[error("unable to authenticate data: tag mismatch or corrupted ciphertext")]
    Authentication,

    #[error("encryption failed: plaintext too long")]
    PlaintextTooLong,
}

/// Coarse failure category, used by callers that report failures by exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Input or key could not be used at all
    Malformed,
    /// Input was well-formed but did not verify under the key
    Authentication,
}

impl DecryptError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DecryptError::Authentication => ErrorClass::Authentication,
            DecryptError::TooShort { .. }
            | DecryptError::InvalidKeyLength(_)
            | DecryptError::InvalidKeyHex(_)
            | DecryptError::PlaintextTooLong => ErrorClass::Malformed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeychainError {
    #[error("invalid master key: {0}")]
    InvalidMasterKey(String),
}

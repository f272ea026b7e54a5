//! pswd-crypto: AES-256-GCM package decryption for the TREZOR Password Manager format
//!
//! Package layout (binary):
//! ```text
//! [12 bytes: IV][16 bytes: GCM tag][N bytes: ciphertext]
//! ```
//!
//! Key hierarchy:
//! ```text
//! Master Key (64 bytes from the device, handled as 128 hex chars)
//!   ├── first half (hex text)  → HMAC-SHA256 key for the store file name
//!   └── second half (hex text) → hex-decoded AES-256-GCM store key
//! Entry Key (32 bytes from the device, per entry nonce) → AES-256-GCM entry key
//! ```

pub mod error;
pub mod keychain;
pub mod keys;
pub mod package;

pub use error::{DecryptError, ErrorClass, KeychainError};
pub use keychain::{unlock_prompt, Keychain};
pub use keys::{generate_key, Key};
pub use package::{decrypt, open, seal, seal_with_iv, Package};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of a GCM initialization vector (96-bit)
pub const IV_SIZE: usize = 12;

/// Size of a GCM authentication tag (128-bit)
pub const TAG_SIZE: usize = 16;

/// Bytes preceding the ciphertext in a package
pub const HEADER_SIZE: usize = IV_SIZE + TAG_SIZE;

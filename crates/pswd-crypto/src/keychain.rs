//! Store keys and names derived from the device master key
//!
//! The device produces the master key by encrypting [`MASTER_KEY_VALUE`]
//! under [`MASTER_KEY_PROMPT`] at [`KEY_PATH`]. Everything here works on the
//! hex rendering of that output: the halves are split on the hex TEXT, not
//! on the underlying bytes.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{DecryptError, KeychainError};
use crate::keys::Key;

type HmacSha256 = Hmac<Sha256>;

/// BIP-32 path used for all password manager key-value operations
pub const KEY_PATH: &str = "m/10016'/0";

/// Device prompt shown when deriving the master key
pub const MASTER_KEY_PROMPT: &str = "Activate TREZOR Password Manager?";

/// Fixed value the device encrypts to produce the master key (hex)
pub const MASTER_KEY_VALUE: &str = "2d650551248d792eabf628f451200d7f51cb63e46aadcbb1038aacb05e8c8aee\
                                    2d650551248d792eabf628f451200d7f51cb63e46aadcbb1038aacb05e8c8aee";

/// HMAC message for the store file name
pub const FILENAME_MESS: &str = "5f91add3fa1c3c76e90c90a3bd0999e2bd7833d06a483fe884ee60397aca277a";

/// Store file extension
pub const STORE_EXTENSION: &str = "pswd";

/// Holds the hex master key and derives the store key and file name from it.
pub struct Keychain {
    master_hex: SecretString,
    store_name: String,
}

impl Keychain {
    pub fn from_master_hex(master_hex: &str) -> Result<Self, KeychainError> {
        let master_hex = master_hex.trim();
        if master_hex.is_empty() {
            return Err(KeychainError::InvalidMasterKey("empty".into()));
        }
        if master_hex.len() % 2 != 0 {
            return Err(KeychainError::InvalidMasterKey(format!(
                "odd number of hex digits ({})",
                master_hex.len()
            )));
        }
        if !master_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KeychainError::InvalidMasterKey(
                "contains non-hex characters".into(),
            ));
        }
        let (first, _) = master_hex.split_at(master_hex.len() / 2);
        let store_name = derive_store_name(first)?;
        Ok(Self {
            master_hex: SecretString::from(master_hex.to_string()),
            store_name,
        })
    }

    fn halves(&self) -> (&str, &str) {
        let hex = self.master_hex.expose_secret();
        hex.split_at(hex.len() / 2)
    }

    /// Store encryption key: the second half of the master hex, decoded.
    ///
    /// A master key of 2 mod 4 hex digits has an odd-length second half,
    /// which fails to decode.
    pub fn store_key(&self) -> Result<Key, DecryptError> {
        let (_, second) = self.halves();
        Key::from_hex(second)
    }

    /// Store file name: `hex(HMAC-SHA256(first half of master hex, FILENAME_MESS)).pswd`
    pub fn store_name(&self) -> &str {
        &self.store_name
    }
}

fn derive_store_name(first_half: &str) -> Result<String, KeychainError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(first_half.as_bytes())
        .map_err(|e| KeychainError::InvalidMasterKey(e.to_string()))?;
    mac.update(FILENAME_MESS.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(format!("{}.{STORE_EXTENSION}", hex::encode(digest)))
}

impl std::fmt::Debug for Keychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keychain")
            .field("master_hex", &"[REDACTED]")
            .field("store_name", &self.store_name)
            .finish()
    }
}

/// Device prompt used to unlock an entry key: `Unlock {domain} for user {username}?`
///
/// For ftp/http/https URLs the domain is the network location (host, with
/// any userinfo and port). Any other string is used unchanged.
pub fn unlock_prompt(url: &str, username: &str) -> String {
    format!("Unlock {} for user {username}?", url_domain(url))
}

fn url_domain(url: &str) -> &str {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url;
    };
    if !["ftp", "http", "https"]
        .iter()
        .any(|s| scheme.eq_ignore_ascii_case(s))
    {
        return url;
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

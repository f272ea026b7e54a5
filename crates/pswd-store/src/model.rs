/// A store tag (label grouping entries)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub title: String,
}

/// Entry as stored: public fields in clear, secrets still packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub username: String,
    /// Hex nonce the device decrypts into this entry's key
    pub nonce: String,
    /// Titles of the tags this entry carries
    pub tags: Vec<String>,
    pub encrypted_password: Vec<u8>,
    pub encrypted_safe_note: Vec<u8>,
}

impl EncryptedEntry {
    /// Prompt the device shows when unlocking this entry's key.
    pub fn unlock_prompt(&self) -> String {
        pswd_crypto::unlock_prompt(&self.url, &self.username)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub username: String,
    pub nonce: String,
    pub tags: Vec<String>,
    pub password: String,
    pub safe_note: String,
}

impl std::fmt::Debug for DecryptedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedEntry")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("tags", &self.tags)
            .field("password", &"[REDACTED]")
            .field("safe_note", &"[REDACTED]")
            .finish()
    }
}

/// A decoded password store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// File name the store was located under
    pub name: String,
    pub tags: Vec<Tag>,
    pub entries: Vec<EncryptedEntry>,
}

impl Store {
    pub fn entry(&self, id: &str) -> Option<&EncryptedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

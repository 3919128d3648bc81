use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of an entry's content, lowercase hex (64 chars).
///
/// 条目内容的 SHA-256 摘要（64 位小写十六进制）。
///
/// This is the deduplication key: at most one history entry owns a given hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub const HEX_LEN: usize = 64;

    /// Hash the UTF-8 bytes of `content`.
    pub fn of(content: &str) -> Self {
        let digest = Sha256::digest(content.as_bytes());
        Self(hex::encode(digest))
    }

    /// Accept an already computed digest (e.g. loaded from storage).
    ///
    /// Returns `None` unless `value` is 64 hex characters; uppercase input is
    /// normalized to lowercase.
    pub fn from_hex(value: &str) -> Option<Self> {
        if value.len() != Self::HEX_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! On-disk layout of the JSON history file.
//!
//! ```json
//! { "version": 1, "next_id": 3, "items": [ { "id": 1, "content": "...", ... } ] }
//! ```
//!
//! Every field except `id` and `content` may be missing and falls back to a
//! sensible default when loaded.

use cn_core::clipboard::make_preview;
use cn_core::{ClipboardEntry, ContentHash, EntryId};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub next_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<StoredEntry>,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn one() -> i64 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default = "one")]
    pub used_count: i64,
}

impl StoredEntry {
    /// Convert to a domain entry, or `None` when the stored record is unusable.
    ///
    /// The hash is always recomputed from the content.
    pub fn into_entry(self, max_preview_chars: usize) -> Option<ClipboardEntry> {
        if self.content.is_empty() || self.id < 1 {
            warn!(id = self.id, "Skipping stored entry with empty content or invalid id");
            return None;
        }

        let content_hash = ContentHash::of(&self.content);
        if let Some(stored) = self.content_hash.as_deref() {
            if stored != content_hash.as_str() {
                warn!(id = self.id, "Stored content hash does not match content, recomputing");
            }
        }

        Some(ClipboardEntry {
            id: EntryId::new(self.id),
            preview: self
                .preview
                .unwrap_or_else(|| make_preview(&self.content, max_preview_chars)),
            content_hash,
            content: self.content,
            is_favorite: self.is_favorite,
            is_pinned: self.is_pinned,
            created_at: self.created_at,
            updated_at: self.updated_at.unwrap_or(self.created_at),
            used_count: self.used_count.max(1),
        })
    }
}

impl From<&ClipboardEntry> for StoredEntry {
    fn from(entry: &ClipboardEntry) -> Self {
        Self {
            id: entry.id.value(),
            content: entry.content.clone(),
            content_hash: Some(entry.content_hash.to_string()),
            preview: Some(entry.preview.clone()),
            is_favorite: entry.is_favorite,
            is_pinned: entry.is_pinned,
            created_at: entry.created_at,
            updated_at: Some(entry.updated_at),
            used_count: entry.used_count,
        }
    }
}

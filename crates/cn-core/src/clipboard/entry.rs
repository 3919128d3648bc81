use serde::{Deserialize, Serialize};

use super::hash::ContentHash;
use super::preview::make_preview;
use crate::ids::EntryId;

/// One retained clipboard capture.
///
/// 一条保留的剪贴板记录。
///
/// Invariants:
/// - `content_hash == ContentHash::of(&content)`; one entry per hash.
/// - `created_at` never changes after insertion.
/// - `used_count` starts at 1 and only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: EntryId,
    pub content: String,
    pub content_hash: ContentHash,
    pub preview: String,
    pub is_favorite: bool,
    pub is_pinned: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    pub updated_at: i64,
    pub used_count: i64,
}

impl ClipboardEntry {
    /// Apply already resolved changes in place.
    pub fn apply(&mut self, changes: &EntryChanges) {
        if let Some(content) = &changes.content {
            self.content = content.clone();
        }
        if let Some(hash) = &changes.content_hash {
            self.content_hash = hash.clone();
        }
        if let Some(preview) = &changes.preview {
            self.preview = preview.clone();
        }
        if let Some(is_favorite) = changes.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(is_pinned) = changes.is_pinned {
            self.is_pinned = is_pinned;
        }
        self.updated_at = changes.updated_at;
    }

    /// Record a dedup hit.
    pub fn record_reuse(&mut self, updated_at: i64) {
        self.used_count += 1;
        self.updated_at = updated_at;
    }
}

/// An entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClipboardEntry {
    pub content: String,
    pub content_hash: ContentHash,
    pub preview: String,
    pub created_at: i64,
}

impl NewClipboardEntry {
    pub fn new(content: impl Into<String>, max_preview_chars: usize, created_at: i64) -> Self {
        let content = content.into();
        Self {
            content_hash: ContentHash::of(&content),
            preview: make_preview(&content, max_preview_chars),
            content,
            created_at,
        }
    }

    pub fn into_entry(self, id: EntryId) -> ClipboardEntry {
        ClipboardEntry {
            id,
            content: self.content,
            content_hash: self.content_hash,
            preview: self.preview,
            is_favorite: false,
            is_pinned: false,
            created_at: self.created_at,
            updated_at: self.created_at,
            used_count: 1,
        }
    }
}

/// Partial update requested by a caller. Absent fields are left untouched.
///
/// 调用方请求的部分更新，缺省字段保持不变。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPatch {
    pub content: Option<String>,
    pub preview: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.preview.is_none()
            && self.is_favorite.is_none()
            && self.is_pinned.is_none()
    }
}

/// Changes a backend writes for one update.
///
/// Produced from an [`EntryPatch`]: a new `content` always carries its new
/// `content_hash`, and the preview is recomputed from it unless the patch
/// supplied one explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChanges {
    pub content: Option<String>,
    pub content_hash: Option<ContentHash>,
    pub preview: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
    pub updated_at: i64,
}

impl EntryChanges {
    pub fn from_patch(patch: EntryPatch, max_preview_chars: usize, updated_at: i64) -> Self {
        let content_hash = patch.content.as_deref().map(ContentHash::of);
        let preview = match (patch.preview, patch.content.as_deref()) {
            (Some(explicit), _) => Some(explicit),
            (None, Some(content)) => Some(make_preview(content, max_preview_chars)),
            (None, None) => None,
        };
        Self {
            content: patch.content,
            content_hash,
            preview,
            is_favorite: patch.is_favorite,
            is_pinned: patch.is_pinned,
            updated_at,
        }
    }
}

/// Aggregate counts over the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: u64,
    pub favorites: u64,
    /// Entries created since the start of the local day.
    pub today: u64,
}

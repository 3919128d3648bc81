use cn_core::{ClipboardEntry, EntryPatch, HistoryStats};
use serde::{Deserialize, Serialize};

/// Clipboard item DTO for frontend API.
///
/// This DTO separates the frontend API from internal domain models,
/// allowing domain evolution without breaking the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItemDto {
    pub id: i64,
    pub content: String,
    pub content_hash: String,
    pub preview: String,
    pub is_favorite: bool,
    pub is_pinned: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub used_count: i64,
}

impl From<ClipboardEntry> for ClipboardItemDto {
    fn from(entry: ClipboardEntry) -> Self {
        Self {
            id: entry.id.value(),
            content: entry.content,
            content_hash: entry.content_hash.into_inner(),
            preview: entry.preview,
            is_favorite: entry.is_favorite,
            is_pinned: entry.is_pinned,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            used_count: entry.used_count,
        }
    }
}

/// Partial update sent by `update_clipboard_item`. Omitted fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardItemUpdateDto {
    pub content: Option<String>,
    pub preview: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl From<ClipboardItemUpdateDto> for EntryPatch {
    fn from(dto: ClipboardItemUpdateDto) -> Self {
        EntryPatch {
            content: dto.content,
            preview: dto.preview,
            is_favorite: dto.is_favorite,
            is_pinned: dto.is_pinned,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardStatsDto {
    pub total: u64,
    pub favorites: u64,
    pub today: u64,
}

impl From<HistoryStats> for ClipboardStatsDto {
    fn from(stats: HistoryStats) -> Self {
        Self {
            total: stats.total,
            favorites: stats.favorites,
            today: stats.today,
        }
    }
}

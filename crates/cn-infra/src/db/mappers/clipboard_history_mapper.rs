use anyhow::{anyhow, Result};
use cn_core::{ClipboardEntry, ContentHash, EntryChanges, EntryId, NewClipboardEntry};

use crate::db::models::{ClipboardHistoryChangeset, ClipboardHistoryRow, NewClipboardHistoryRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct ClipboardHistoryRowMapper;

impl InsertMapper<NewClipboardEntry, NewClipboardHistoryRow> for ClipboardHistoryRowMapper {
    fn to_row(&self, domain: &NewClipboardEntry) -> Result<NewClipboardHistoryRow> {
        Ok(NewClipboardHistoryRow {
            content: domain.content.clone(),
            content_hash: domain.content_hash.to_string(),
            preview: domain.preview.clone(),
            is_favorite: false,
            is_pinned: false,
            created_at: domain.created_at,
            updated_at: domain.created_at,
            used_count: 1,
        })
    }
}

impl InsertMapper<EntryChanges, ClipboardHistoryChangeset> for ClipboardHistoryRowMapper {
    fn to_row(&self, domain: &EntryChanges) -> Result<ClipboardHistoryChangeset> {
        Ok(ClipboardHistoryChangeset {
            content: domain.content.clone(),
            content_hash: domain.content_hash.as_ref().map(ToString::to_string),
            preview: domain.preview.clone(),
            is_favorite: domain.is_favorite,
            is_pinned: domain.is_pinned,
            updated_at: Some(domain.updated_at),
        })
    }
}

impl RowMapper<ClipboardHistoryRow, ClipboardEntry> for ClipboardHistoryRowMapper {
    fn to_domain(&self, row: &ClipboardHistoryRow) -> Result<ClipboardEntry> {
        let content_hash = ContentHash::from_hex(&row.content_hash)
            .ok_or_else(|| anyhow!("row {} has a malformed content hash", row.id))?;

        Ok(ClipboardEntry {
            id: EntryId::new(row.id),
            content: row.content.clone(),
            content_hash,
            preview: row.preview.clone(),
            is_favorite: row.is_favorite,
            is_pinned: row.is_pinned,
            created_at: row.created_at,
            updated_at: row.updated_at,
            used_count: row.used_count,
        })
    }
}

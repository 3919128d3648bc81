use anyhow::Result;

use crate::clipboard::{
    ClipboardEntry, ContentHash, EntryChanges, HistoryStats, NewClipboardEntry,
};
use crate::ids::EntryId;

/// Persistence port for the clipboard history.
///
/// 剪贴板历史的持久化端口。
///
/// Every backend must behave identically:
/// - ids are strictly increasing and restart at 1 after `clear`;
/// - `list` follows the listing order, `search` the ranking order and
///   `list_favorites` the recency order (see `clipboard::ordering`);
/// - `content_hash` is unique.
///
/// Deduplication policy lives in the history store; backends only expose the
/// primitives.
#[async_trait::async_trait]
pub trait ClipboardHistoryRepositoryPort: Send + Sync {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardEntry>>;

    /// Store a new entry with the next id and `used_count = 1`.
    async fn insert(&self, entry: NewClipboardEntry) -> Result<ClipboardEntry>;

    /// Bump `used_count` and set `updated_at`. `None` if the id is unknown.
    async fn record_reuse(&self, id: EntryId, updated_at: i64) -> Result<Option<ClipboardEntry>>;

    async fn get(&self, id: EntryId) -> Result<Option<ClipboardEntry>>;

    /// List entries with pagination
    /// 列出条目（分页）
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardEntry>>;

    /// Returns `false` if the id is unknown.
    async fn update(&self, id: EntryId, changes: &EntryChanges) -> Result<bool>;

    /// Returns `false` if the id is unknown.
    async fn delete(&self, id: EntryId) -> Result<bool>;

    /// Case-insensitive substring match on content or preview; empty query matches all.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ClipboardEntry>>;

    async fn list_favorites(&self) -> Result<Vec<ClipboardEntry>>;

    async fn stats(&self, today_start_ms: i64) -> Result<HistoryStats>;

    /// Remove every entry and reset id allocation.
    async fn clear(&self) -> Result<()>;

    /// Make all accepted writes durable before shutdown.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

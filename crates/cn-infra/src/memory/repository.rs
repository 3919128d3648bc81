use anyhow::Result;
use async_trait::async_trait;
use cn_core::ports::ClipboardHistoryRepositoryPort;
use cn_core::{
    ClipboardEntry, ContentHash, EntryChanges, EntryId, HistoryStats, NewClipboardEntry,
};
use tokio::sync::Mutex;

use super::table::HistoryTable;

/// History backend without persistence. Everything is lost on exit.
///
/// 无持久化的历史后端，进程退出后数据丢失。
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    table: Mutex<HistoryTable>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClipboardHistoryRepositoryPort for InMemoryHistoryRepository {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardEntry>> {
        Ok(self.table.lock().await.find_by_hash(hash))
    }

    async fn insert(&self, entry: NewClipboardEntry) -> Result<ClipboardEntry> {
        self.table.lock().await.insert(entry)
    }

    async fn record_reuse(&self, id: EntryId, updated_at: i64) -> Result<Option<ClipboardEntry>> {
        Ok(self.table.lock().await.record_reuse(id, updated_at))
    }

    async fn get(&self, id: EntryId) -> Result<Option<ClipboardEntry>> {
        Ok(self.table.lock().await.get(id))
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardEntry>> {
        Ok(self.table.lock().await.list(limit, offset))
    }

    async fn update(&self, id: EntryId, changes: &EntryChanges) -> Result<bool> {
        self.table.lock().await.update(id, changes)
    }

    async fn delete(&self, id: EntryId) -> Result<bool> {
        Ok(self.table.lock().await.delete(id))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ClipboardEntry>> {
        Ok(self.table.lock().await.search(query, limit))
    }

    async fn list_favorites(&self) -> Result<Vec<ClipboardEntry>> {
        Ok(self.table.lock().await.favorites())
    }

    async fn stats(&self, today_start_ms: i64) -> Result<HistoryStats> {
        Ok(self.table.lock().await.stats(today_start_ms))
    }

    async fn clear(&self) -> Result<()> {
        self.table.lock().await.clear();
        Ok(())
    }
}

use std::sync::Arc;

use cn_core::ports::{ClipboardHistoryRepositoryPort, ClockPort};
use cn_core::{
    ClipboardEntry, ContentHash, EntryChanges, EntryId, EntryPatch, HistoryError, HistoryStats,
    NewClipboardEntry,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The clipboard history: deduplication, ordering and flags over one
/// persistence backend.
///
/// 剪贴板历史：在单一持久化后端之上实现去重、排序与标记。
///
/// Every mutation holds the write side of `gate` from its first read to its
/// last write, so a dedup check and the insert that follows it form one step.
/// Reads hold the read side and never observe a half-applied mutation.
pub struct HistoryStore {
    repo: Arc<dyn ClipboardHistoryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    max_preview_chars: usize,
    gate: RwLock<()>,
}

impl HistoryStore {
    pub fn new(
        repo: Arc<dyn ClipboardHistoryRepositoryPort>,
        clock: Arc<dyn ClockPort>,
        max_preview_chars: usize,
    ) -> Self {
        Self {
            repo,
            clock,
            max_preview_chars,
            gate: RwLock::new(()),
        }
    }

    /// Record `content`, returning the id of the entry that now holds it.
    ///
    /// Known content bumps `used_count` on the existing entry instead of
    /// creating a new one.
    #[tracing::instrument(
        name = "history.save",
        skip(self, content),
        fields(chars = content.chars().count())
    )]
    pub async fn save(&self, content: &str) -> Result<EntryId, HistoryError> {
        if content.is_empty() {
            return Err(HistoryError::InvalidInput(
                "content must not be empty".to_string(),
            ));
        }

        let hash = ContentHash::of(content);
        let now = self.clock.now_ms();
        let _guard = self.gate.write().await;

        if let Some(existing) = self
            .repo
            .find_by_hash(&hash)
            .await
            .map_err(HistoryError::storage)?
        {
            let reused = self
                .repo
                .record_reuse(existing.id, now)
                .await
                .map_err(HistoryError::storage)?
                .ok_or(HistoryError::NotFound(existing.id))?;
            debug!(id = %reused.id, used_count = reused.used_count, "Dedup hit");
            return Ok(reused.id);
        }

        let inserted = self
            .repo
            .insert(NewClipboardEntry::new(content, self.max_preview_chars, now))
            .await
            .map_err(HistoryError::storage)?;
        debug!(id = %inserted.id, "Stored new history entry");
        Ok(inserted.id)
    }

    pub async fn get_by_id(&self, id: EntryId) -> Result<Option<ClipboardEntry>, HistoryError> {
        let _guard = self.gate.read().await;
        self.repo.get(id).await.map_err(HistoryError::storage)
    }

    /// Entries in listing order: pinned first, then newest.
    pub async fn list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ClipboardEntry>, HistoryError> {
        let _guard = self.gate.read().await;
        self.repo
            .list(limit, offset)
            .await
            .map_err(HistoryError::storage)
    }

    #[tracing::instrument(name = "history.delete", skip(self), fields(id = %id))]
    pub async fn delete(&self, id: EntryId) -> Result<bool, HistoryError> {
        let _guard = self.gate.write().await;
        self.repo.delete(id).await.map_err(HistoryError::storage)
    }

    /// Apply `patch` to an entry. `updated_at` is refreshed even for an empty patch.
    ///
    /// New content is rehashed. If another entry already holds that content
    /// the update is refused and `false` is returned.
    #[tracing::instrument(name = "history.update", skip(self, patch), fields(id = %id))]
    pub async fn update(&self, id: EntryId, patch: EntryPatch) -> Result<bool, HistoryError> {
        if patch.content.as_deref() == Some("") {
            return Err(HistoryError::InvalidInput(
                "content must not be empty".to_string(),
            ));
        }

        let changes = EntryChanges::from_patch(patch, self.max_preview_chars, self.clock.now_ms());
        let _guard = self.gate.write().await;

        if let Some(new_hash) = &changes.content_hash {
            let owner = self
                .repo
                .find_by_hash(new_hash)
                .await
                .map_err(HistoryError::storage)?;
            if let Some(owner) = owner.filter(|owner| owner.id != id) {
                warn!(owner = %owner.id, "Edit would duplicate another entry, refusing");
                return Ok(false);
            }
        }

        self.repo
            .update(id, &changes)
            .await
            .map_err(HistoryError::storage)
    }

    /// Case-insensitive substring search in ranking order.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ClipboardEntry>, HistoryError> {
        let _guard = self.gate.read().await;
        self.repo
            .search(query, limit)
            .await
            .map_err(HistoryError::storage)
    }

    pub async fn get_favorites(&self) -> Result<Vec<ClipboardEntry>, HistoryError> {
        let _guard = self.gate.read().await;
        self.repo
            .list_favorites()
            .await
            .map_err(HistoryError::storage)
    }

    pub async fn get_stats(&self) -> Result<HistoryStats, HistoryError> {
        let today_start = self.clock.start_of_today_ms();
        let _guard = self.gate.read().await;
        self.repo
            .stats(today_start)
            .await
            .map_err(HistoryError::storage)
    }

    #[tracing::instrument(name = "history.clear_all", skip(self))]
    pub async fn clear_all(&self) -> Result<bool, HistoryError> {
        let _guard = self.gate.write().await;
        self.repo.clear().await.map_err(HistoryError::storage)?;
        info!("History cleared");
        Ok(true)
    }

    /// Flush the backend before the process exits.
    pub async fn close(&self) -> Result<(), HistoryError> {
        let _guard = self.gate.write().await;
        self.repo.flush().await.map_err(HistoryError::storage)
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use cn_core::ports::ClipboardHistoryRepositoryPort;
use cn_core::{
    ClipboardEntry, ContentHash, EntryChanges, EntryId, HistoryStats, NewClipboardEntry,
};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::document::{HistoryDocument, StoredEntry, CURRENT_VERSION};
use crate::memory::HistoryTable;

/// History backend persisted as a single JSON document.
///
/// 以单个 JSON 文档持久化的历史后端。
///
/// The whole document is rewritten after every mutation through a temp file
/// and a rename, so the file on disk is always either the previous or the new
/// complete history.
pub struct JsonFileHistoryRepository {
    path: PathBuf,
    table: Mutex<HistoryTable>,
}

impl JsonFileHistoryRepository {
    /// Load the history at `path`.
    ///
    /// A missing file yields an empty history. A file that cannot be parsed is
    /// logged and treated as empty; it is replaced on the next write.
    pub async fn open(path: impl Into<PathBuf>, max_preview_chars: usize) -> Result<Self> {
        let path = path.into();
        let table = Self::load(&path, max_preview_chars).await?;
        info!(path = %path.display(), entries = table.len(), "Opened JSON history");
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path, max_preview_chars: usize) -> Result<HistoryTable> {
        let content = match fs::read_to_string(path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No history file yet");
                return Ok(HistoryTable::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read history failed: {}", path.display()))
            }
        };

        let document: HistoryDocument = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed history file, starting empty");
                return Ok(HistoryTable::new());
            }
        };

        if document.version > CURRENT_VERSION {
            warn!(
                version = document.version,
                "History file written by a newer version, reading known fields only"
            );
        }

        let entries = document
            .items
            .into_iter()
            .filter_map(|item| item.into_entry(max_preview_chars));
        Ok(HistoryTable::restore(entries, document.next_id))
    }

    async fn persist(&self, table: &HistoryTable) -> Result<()> {
        let document = HistoryDocument {
            version: CURRENT_VERSION,
            next_id: Some(table.next_id().value()),
            items: table.iter().map(StoredEntry::from).collect(),
        };
        let content =
            serde_json::to_string_pretty(&document).context("serialize history failed")?;
        self.atomic_write(&content).await
    }

    /// Write `staged` to disk, then make it the live table.
    ///
    /// On a failed write the live table is left as it was, so memory never
    /// shows a change the file does not hold.
    async fn commit(&self, live: &mut HistoryTable, staged: HistoryTable) -> Result<()> {
        self.persist(&staged).await?;
        *live = staged;
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create history dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp history failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp history to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl ClipboardHistoryRepositoryPort for JsonFileHistoryRepository {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardEntry>> {
        Ok(self.table.lock().await.find_by_hash(hash))
    }

    async fn insert(&self, entry: NewClipboardEntry) -> Result<ClipboardEntry> {
        let mut table = self.table.lock().await;
        let mut staged = table.clone();
        let inserted = staged.insert(entry)?;
        self.commit(&mut table, staged).await?;
        Ok(inserted)
    }

    async fn record_reuse(&self, id: EntryId, updated_at: i64) -> Result<Option<ClipboardEntry>> {
        let mut table = self.table.lock().await;
        let mut staged = table.clone();
        let reused = staged.record_reuse(id, updated_at);
        if reused.is_some() {
            self.commit(&mut table, staged).await?;
        }
        Ok(reused)
    }

    async fn get(&self, id: EntryId) -> Result<Option<ClipboardEntry>> {
        Ok(self.table.lock().await.get(id))
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardEntry>> {
        Ok(self.table.lock().await.list(limit, offset))
    }

    async fn update(&self, id: EntryId, changes: &EntryChanges) -> Result<bool> {
        let mut table = self.table.lock().await;
        let mut staged = table.clone();
        let updated = staged.update(id, changes)?;
        if updated {
            self.commit(&mut table, staged).await?;
        }
        Ok(updated)
    }

    async fn delete(&self, id: EntryId) -> Result<bool> {
        let mut table = self.table.lock().await;
        let mut staged = table.clone();
        let deleted = staged.delete(id);
        if deleted {
            self.commit(&mut table, staged).await?;
        }
        Ok(deleted)
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
        let mut table = self.table.lock().await;
        self.commit(&mut table, HistoryTable::new()).await
    }

    async fn flush(&self) -> Result<()> {
        let table = self.table.lock().await;
        self.persist(&table).await
    }
}

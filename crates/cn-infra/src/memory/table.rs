use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, Result};
use cn_core::clipboard::ordering::{
    listing_order, matches_query, page, ranking_order, recency_order,
};
use cn_core::{
    ClipboardEntry, ContentHash, EntryChanges, EntryId, HistoryStats, NewClipboardEntry,
};
use tracing::warn;

/// Entries keyed by id, with a unique index on `content_hash`.
///
/// 以 id 为键的条目集合，附带 `content_hash` 唯一索引。
#[derive(Debug, Clone)]
pub struct HistoryTable {
    entries: BTreeMap<EntryId, ClipboardEntry>,
    by_hash: HashMap<ContentHash, EntryId>,
    next_id: EntryId,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            by_hash: HashMap::new(),
            next_id: EntryId::FIRST,
        }
    }

    /// Rebuild a table from previously stored entries.
    ///
    /// Entries repeating an id or a hash already seen are dropped with a
    /// warning. The next id is never lower than `max(id) + 1`.
    pub fn restore(entries: impl IntoIterator<Item = ClipboardEntry>, next_id: Option<i64>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            if table.entries.contains_key(&entry.id) {
                warn!(id = %entry.id, "Dropping stored entry with duplicate id");
                continue;
            }
            if table.by_hash.contains_key(&entry.content_hash) {
                warn!(id = %entry.id, hash = %entry.content_hash, "Dropping stored entry with duplicate content hash");
                continue;
            }
            table.by_hash.insert(entry.content_hash.clone(), entry.id);
            table.entries.insert(entry.id, entry);
        }

        let after_max = table
            .entries
            .keys()
            .next_back()
            .map(EntryId::next)
            .unwrap_or(EntryId::FIRST);
        let stored = next_id.map(EntryId::new).unwrap_or(EntryId::FIRST);
        table.next_id = after_max.max(stored);
        table
    }

    pub fn next_id(&self) -> EntryId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ClipboardEntry> {
        self.entries.values()
    }

    pub fn find_by_hash(&self, hash: &ContentHash) -> Option<ClipboardEntry> {
        self.by_hash
            .get(hash)
            .and_then(|id| self.entries.get(id))
            .cloned()
    }

    pub fn insert(&mut self, new: NewClipboardEntry) -> Result<ClipboardEntry> {
        if let Some(existing) = self.by_hash.get(&new.content_hash) {
            bail!("content hash already stored as entry {existing}");
        }
        let id = self.next_id;
        self.next_id = id.next();

        let entry = new.into_entry(id);
        self.by_hash.insert(entry.content_hash.clone(), id);
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    pub fn record_reuse(&mut self, id: EntryId, updated_at: i64) -> Option<ClipboardEntry> {
        let entry = self.entries.get_mut(&id)?;
        entry.record_reuse(updated_at);
        Some(entry.clone())
    }

    pub fn get(&self, id: EntryId) -> Option<ClipboardEntry> {
        self.entries.get(&id).cloned()
    }

    pub fn list(&self, limit: usize, offset: usize) -> Vec<ClipboardEntry> {
        page(self.sorted_by(listing_order), limit, offset)
    }

    /// Fails when the new content hash is owned by another entry.
    pub fn update(&mut self, id: EntryId, changes: &EntryChanges) -> Result<bool> {
        let Some(current_hash) = self.entries.get(&id).map(|e| e.content_hash.clone()) else {
            return Ok(false);
        };

        if let Some(new_hash) = &changes.content_hash {
            match self.by_hash.get(new_hash) {
                Some(owner) if *owner != id => {
                    bail!("content hash already stored as entry {owner}");
                }
                _ => {}
            }
            if *new_hash != current_hash {
                self.by_hash.remove(&current_hash);
                self.by_hash.insert(new_hash.clone(), id);
            }
        }

        if let Some(entry) = self.entries.get_mut(&id) {
            entry.apply(changes);
        }
        Ok(true)
    }

    pub fn delete(&mut self, id: EntryId) -> bool {
        match self.entries.remove(&id) {
            Some(entry) => {
                self.by_hash.remove(&entry.content_hash);
                true
            }
            None => false,
        }
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<ClipboardEntry> {
        let needle = query.to_lowercase();
        self.sorted_by(ranking_order)
            .into_iter()
            .filter(|entry| matches_query(entry, &needle))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn favorites(&self) -> Vec<ClipboardEntry> {
        self.sorted_by(recency_order)
            .into_iter()
            .filter(|entry| entry.is_favorite)
            .cloned()
            .collect()
    }

    pub fn stats(&self, today_start_ms: i64) -> HistoryStats {
        let mut stats = HistoryStats {
            total: self.entries.len() as u64,
            ..HistoryStats::default()
        };
        for entry in self.entries.values() {
            if entry.is_favorite {
                stats.favorites += 1;
            }
            if entry.created_at >= today_start_ms {
                stats.today += 1;
            }
        }
        stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_hash.clear();
        self.next_id = EntryId::FIRST;
    }

    fn sorted_by(
        &self,
        order: fn(&ClipboardEntry, &ClipboardEntry) -> std::cmp::Ordering,
    ) -> Vec<&ClipboardEntry> {
        let mut all: Vec<&ClipboardEntry> = self.entries.values().collect();
        all.sort_by(|a, b| order(a, b));
        all
    }
}

//! Ordering and matching rules every backend must agree on.
//!
//! 所有持久化后端必须一致遵守的排序与匹配规则。

use std::cmp::Ordering;

use super::entry::ClipboardEntry;

/// Listing order: pinned first, then newest `created_at`, then highest id.
pub fn listing_order(a: &ClipboardEntry, b: &ClipboardEntry) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| recency_order(a, b))
}

/// Ranking order used by search: most used first, then newest, then highest id.
pub fn ranking_order(a: &ClipboardEntry, b: &ClipboardEntry) -> Ordering {
    b.used_count
        .cmp(&a.used_count)
        .then_with(|| recency_order(a, b))
}

/// Newest `created_at` first, ties broken by highest id.
pub fn recency_order(a: &ClipboardEntry, b: &ClipboardEntry) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Case-insensitive substring match on content or preview.
///
/// `needle_lower` must already be lowercased; an empty needle matches everything.
pub fn matches_query(entry: &ClipboardEntry, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    entry.content.to_lowercase().contains(needle_lower)
        || entry.preview.to_lowercase().contains(needle_lower)
}

/// Take the `[offset, offset + limit)` window of an already ordered iterator.
pub fn page<'a, I>(ordered: I, limit: usize, offset: usize) -> Vec<ClipboardEntry>
where
    I: IntoIterator<Item = &'a ClipboardEntry>,
{
    ordered
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

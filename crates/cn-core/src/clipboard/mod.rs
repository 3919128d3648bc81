//! Clipboard history domain: entries, content hashing, previews and the
//! ordering rules shared by every persistence backend.

mod entry;
mod hash;
pub mod ordering;
mod preview;

pub use entry::{ClipboardEntry, EntryChanges, EntryPatch, HistoryStats, NewClipboardEntry};
pub use hash::ContentHash;
pub use preview::{make_preview, DEFAULT_PREVIEW_CHARS, ELLIPSIS};

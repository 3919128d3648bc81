mod clipboard_history;

pub use clipboard_history::{ClipboardHistoryChangeset, ClipboardHistoryRow, NewClipboardHistoryRow};

//! Use cases
//! 用例
//!
//! [ClipboardWatcher] ──subscriber──→ NotifyClipboardChanged → clipboard://changed
//         ↓
// PlatformRuntime (single consumer)
//         ↓
// CaptureClipboardText → HistoryStore.save
// ---------------------------------
// PasteHistoryEntry    → clipboard write → panel hide
// AppLifecycle         → hotkeys + watcher start / shutdown

pub mod app_lifecycle;
pub mod capture_clipboard_text;
pub mod notify_clipboard_changed;
pub mod paste_history_entry;

pub use app_lifecycle::{AppLifecycle, AppLifecycleError};
pub use capture_clipboard_text::CaptureClipboardText;
pub use notify_clipboard_changed::NotifyClipboardChanged;
pub use paste_history_entry::PasteHistoryEntry;

mod local_clipboard;
mod watcher;

pub use local_clipboard::LocalClipboard;
pub use watcher::{ClipboardWatcher, DEFAULT_POLL_INTERVAL};

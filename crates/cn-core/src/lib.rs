//! # cn-core
//!
//! Core domain models and ports for Clipnest.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! history entries, content hashing, previews, ordering rules, panel geometry
//! and the port traits implemented by the adapter crates.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod ids;
pub mod panel;
pub mod ports;

// Re-export commonly used types at the crate root
pub use app_dirs::AppDirs;
pub use clipboard::{
    ClipboardEntry, ContentHash, EntryChanges, EntryPatch, HistoryStats, NewClipboardEntry,
};
pub use config::{AppConfig, StorageBackendKind};
pub use error::{HistoryError, PanelError};
pub use ids::EntryId;
pub use panel::{HotkeyAction, HotkeyBinding, MonitorInfo, PanelState, Point, Rect, Size};

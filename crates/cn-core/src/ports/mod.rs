//! Capabilities the app layer needs from the outside world.
//!
//! 应用层依赖的外部能力接口。
//!
//! History storage, the system clipboard, the panel window, global hotkeys and
//! UI notifications are all reached through these traits; `cn-infra`,
//! `cn-platform` and `cn-tauri` provide the implementations.

pub mod app_dirs;
mod clipboard;
mod clipboard_change_handler;
mod clock;
pub mod errors;
mod history_repository;
pub mod panel;
mod ui_event;
pub mod watcher_control;

pub use app_dirs::AppDirsPort;
pub use clipboard::{ClipboardWriterPort, SystemClipboardPort};
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use errors::AppDirsError;
pub use history_repository::ClipboardHistoryRepositoryPort;
pub use panel::{DisplayPort, HotkeyPort, PanelWindowPort};
pub use ui_event::UiEventPort;
pub use watcher_control::{WatcherControlError, WatcherControlPort};

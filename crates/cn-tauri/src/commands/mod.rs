//! Tauri command handlers
//! Tauri 命令处理器

pub mod clipboard;
pub mod dto;
pub mod error;
pub mod panel;

pub use error::or_fallback;

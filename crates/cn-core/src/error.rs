use thiserror::Error;

use crate::ids::EntryId;

/// Errors surfaced by the history store.
///
/// 历史存储对外暴露的错误。
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("history entry {0} not found")]
    NotFound(EntryId),

    #[error("history storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl HistoryError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// Errors surfaced by the panel controller.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to register hotkey `{accelerator}`: {reason}")]
    HotkeyRegistrationFailed { accelerator: String, reason: String },

    #[error("panel window error: {0}")]
    Window(String),

    #[error("no monitor available")]
    NoMonitor,
}

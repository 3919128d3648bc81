//! Event Forwarding - Forward backend events to frontend
//! 事件转发 - 将后端事件转发到前端

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};

pub const CLIPBOARD_CHANGED: &str = "clipboard://changed";
pub const PANEL_SHOW: &str = "panel://show";

/// Payload of `clipboard://changed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardChangedPayload {
    pub content: String,
}

/// Forward captured clipboard text to frontend
/// 将捕获的剪贴板文本转发到前端
pub fn forward_clipboard_changed<R: Runtime>(
    app: &AppHandle<R>,
    content: &str,
) -> tauri::Result<()> {
    app.emit(
        CLIPBOARD_CHANGED,
        ClipboardChangedPayload {
            content: content.to_string(),
        },
    )
}

/// Tell the panel webview it has just been shown
/// 通知面板页面已显示
pub fn forward_panel_shown<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<()> {
    app.emit(PANEL_SHOW, ())
}

use anyhow::Result;

/// Receives clipboard text the watcher has just observed.
///
/// 接收监控器刚刚读取到的剪贴板文本。
///
/// Implemented by the app layer and handed to the platform runtime, so the
/// platform never depends on history or UI code.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// `content` is non-empty and differs from the previous observation.
    async fn on_clipboard_changed(&self, content: String) -> Result<()>;
}

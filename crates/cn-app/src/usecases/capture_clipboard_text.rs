use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use cn_core::ports::ClipboardChangeHandler;
use tracing::debug;

use crate::history::HistoryStore;

/// Records clipboard text captured by the watcher.
/// 记录监控器捕获的剪贴板文本。
///
/// The UI is told about the change separately, by the watcher's subscriber,
/// so a failed save never hides a copy from the panel.
pub struct CaptureClipboardText {
    history: Arc<HistoryStore>,
}

impl CaptureClipboardText {
    pub fn from_ports(history: Arc<HistoryStore>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.capture_clipboard_text.execute",
        skip(self, content),
        fields(chars = content.chars().count())
    )]
    pub async fn execute(&self, content: &str) -> Result<()> {
        let id = self.history.save(content).await?;
        debug!(%id, "Clipboard text recorded");
        Ok(())
    }
}

#[async_trait]
impl ClipboardChangeHandler for CaptureClipboardText {
    async fn on_clipboard_changed(&self, content: String) -> Result<()> {
        self.execute(&content).await
    }
}

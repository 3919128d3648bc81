use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use cn_core::ports::{ClipboardChangeHandler, UiEventPort};

/// Pushes `clipboard://changed` to the UI for every text the watcher detects.
///
/// 监控器每检测到一次变化就通知界面，与历史保存互不影响。
pub struct NotifyClipboardChanged {
    ui: Arc<dyn UiEventPort>,
}

impl NotifyClipboardChanged {
    pub fn from_ports(ui: Arc<dyn UiEventPort>) -> Self {
        Self { ui }
    }

    #[tracing::instrument(
        name = "usecase.notify_clipboard_changed.execute",
        skip(self, content),
        fields(chars = content.chars().count())
    )]
    pub fn execute(&self, content: &str) -> Result<()> {
        self.ui.emit_clipboard_changed(content)
    }
}

#[async_trait]
impl ClipboardChangeHandler for NotifyClipboardChanged {
    async fn on_clipboard_changed(&self, content: String) -> Result<()> {
        self.execute(&content)
    }
}

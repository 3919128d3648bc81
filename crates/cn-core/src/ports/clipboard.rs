//! Clipboard ports - abstract OS clipboard access
//!
//! 剪贴板端口 - 抽象系统剪贴板访问

use anyhow::Result;
use async_trait::async_trait;

/// Plain-text access to the operating system clipboard.
///
/// Implementations are blocking; callers on the async runtime move calls onto
/// a blocking thread.
pub trait SystemClipboardPort: Send + Sync {
    /// Current text, or `None` when the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, content: &str) -> Result<()>;
}

/// Write path used when pasting a history entry back to the clipboard.
///
/// Writes through this port are not captured again as new history.
#[async_trait]
pub trait ClipboardWriterPort: Send + Sync {
    /// Returns `false` when the clipboard rejected the write.
    async fn write_text(&self, content: &str) -> bool;
}

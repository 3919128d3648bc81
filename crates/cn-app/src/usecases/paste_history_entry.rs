//! Use case for writing a history entry back to the system clipboard
//! 将历史条目写回系统剪贴板的用例

use std::sync::Arc;

use cn_core::ports::ClipboardWriterPort;
use cn_core::{EntryId, HistoryError};
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::panel::PanelController;

/// Copy an entry's content to the clipboard and dismiss the panel.
///
/// The write goes through the watcher, so the pasted text is not captured
/// again and the entry's `used_count` is left alone.
pub struct PasteHistoryEntry {
    history: Arc<HistoryStore>,
    writer: Arc<dyn ClipboardWriterPort>,
    panel: Arc<PanelController>,
}

impl PasteHistoryEntry {
    pub fn from_ports(
        history: Arc<HistoryStore>,
        writer: Arc<dyn ClipboardWriterPort>,
        panel: Arc<PanelController>,
    ) -> Self {
        Self {
            history,
            writer,
            panel,
        }
    }

    /// # Returns / 返回值
    /// - `Ok(true)` once the clipboard holds the entry's content
    /// - `Ok(false)` when the entry does not exist or the clipboard refused the write
    #[tracing::instrument(
        name = "usecase.paste_history_entry.execute",
        skip(self),
        fields(entry_id = %id)
    )]
    pub async fn execute(&self, id: EntryId) -> Result<bool, HistoryError> {
        let Some(entry) = self.history.get_by_id(id).await? else {
            warn!("Paste requested for unknown entry");
            return Ok(false);
        };

        if !self.writer.write_text(&entry.content).await {
            return Ok(false);
        }
        info!("Entry written to clipboard");

        if let Err(e) = self.panel.on_paste_completed().await {
            warn!(error = %e, "Failed to hide panel after paste");
        }
        Ok(true)
    }
}

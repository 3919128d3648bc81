use cn_core::ports::watcher_control::{WatcherControlError, WatcherControlPort};
use tokio::sync::mpsc;

use crate::ipc::PlatformCommand;
use crate::runtime::event_bus::PlatformCommandSender;

/// Watcher control that forwards requests to the platform runtime.
///
/// 通过进程内 channel 将启停请求转发给平台运行时。
pub struct InMemoryWatcherControl {
    cmd_tx: PlatformCommandSender,
}

impl InMemoryWatcherControl {
    pub fn new(cmd_tx: PlatformCommandSender) -> Self {
        Self { cmd_tx }
    }

    async fn send(
        &self,
        command: PlatformCommand,
        on_error: fn(String) -> WatcherControlError,
    ) -> Result<(), WatcherControlError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|e: mpsc::error::SendError<PlatformCommand>| {
                if self.cmd_tx.is_closed() {
                    WatcherControlError::ChannelClosed
                } else {
                    on_error(e.to_string())
                }
            })
    }
}

#[async_trait::async_trait]
impl WatcherControlPort for InMemoryWatcherControl {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(
            PlatformCommand::StartClipboardWatcher,
            WatcherControlError::StartFailed,
        )
        .await
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(
            PlatformCommand::StopClipboardWatcher,
            WatcherControlError::StopFailed,
        )
        .await
    }
}

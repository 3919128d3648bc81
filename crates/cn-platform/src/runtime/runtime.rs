use std::sync::Arc;

use cn_core::ports::ClipboardChangeHandler;
use tracing::{debug, error, info, warn};

use super::event_bus::{PlatformCommandReceiver, PlatformEventReceiver};
use crate::clipboard::ClipboardWatcher;
use crate::ipc::{PlatformCommand, PlatformEvent};

/// Single consumer of platform events and commands.
///
/// 平台事件与命令的唯一消费者。
///
/// Clipboard changes are handed to the registered handler one at a time, so
/// history writes coming from the watcher are serialized in capture order.
pub struct PlatformRuntime {
    watcher: Arc<ClipboardWatcher>,
    event_rx: PlatformEventReceiver,
    command_rx: PlatformCommandReceiver,
    shutting_down: bool,
    clipboard_handler: Option<Arc<dyn ClipboardChangeHandler>>,
}

impl PlatformRuntime {
    pub fn new(
        watcher: Arc<ClipboardWatcher>,
        event_rx: PlatformEventReceiver,
        command_rx: PlatformCommandReceiver,
        clipboard_handler: Option<Arc<dyn ClipboardChangeHandler>>,
    ) -> Self {
        Self {
            watcher,
            event_rx,
            command_rx,
            shutting_down: false,
            clipboard_handler,
        }
    }

    /// Install the handler once the app layer exists; the runtime is built first.
    pub fn set_clipboard_handler(&mut self, handler: Arc<dyn ClipboardChangeHandler>) {
        self.clipboard_handler = Some(handler);
    }

    pub async fn start(mut self) {
        info!("platform runtime running");
        while !self.shutting_down {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event).await;
                }
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                }
                else => {
                    warn!("platform channels closed, leaving runtime loop");
                    break;
                }
            }
        }
        self.watcher.stop_watching();
        info!("platform runtime exited");
    }

    async fn handle_event(&self, event: PlatformEvent) {
        match event {
            PlatformEvent::ClipboardChanged { content } => {
                debug!(chars = content.chars().count(), "forwarding clipboard text");

                if let Some(handler) = &self.clipboard_handler {
                    if let Err(err) = handler.on_clipboard_changed(content).await {
                        error!(error = %err, "clipboard text was not captured");
                    }
                } else {
                    warn!("clipboard text dropped, no handler installed");
                }
            }
        }
    }

    fn handle_command(&mut self, command: PlatformCommand) {
        match command {
            PlatformCommand::StartClipboardWatcher => {
                debug!("watcher start requested");
                self.watcher.start_watching();
            }
            PlatformCommand::StopClipboardWatcher => {
                debug!("watcher stop requested");
                self.watcher.stop_watching();
            }
            PlatformCommand::Shutdown => {
                self.shutting_down = true;
                info!("platform runtime shutdown requested");
            }
        }
    }
}

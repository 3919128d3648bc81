use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use cn_core::ports::{ClipboardChangeHandler, ClipboardWriterPort, SystemClipboardPort};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::ipc::PlatformEvent;
use crate::runtime::event_bus::PlatformEventSender;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls the OS clipboard for text changes.
///
/// 轮询系统剪贴板的文本变化。
///
/// On every tick the current text is compared with the last content seen.
/// A change is delivered to the single subscriber and pushed onto the
/// platform event queue, whose consumer records it in the history.
///
/// `last_seen` is held across the read and compare of a poll and across a
/// paste write, so content written through [`ClipboardWatcher::write_to_clipboard`]
/// is never reported as a change.
pub struct ClipboardWatcher {
    clipboard: Arc<dyn SystemClipboardPort>,
    event_tx: PlatformEventSender,
    poll_interval: Duration,
    last_seen: tokio::sync::Mutex<Option<String>>,
    subscriber: RwLock<Option<Arc<dyn ClipboardChangeHandler>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ClipboardWatcher {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        event_tx: PlatformEventSender,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            event_tx,
            poll_interval,
            last_seen: tokio::sync::Mutex::new(None),
            subscriber: RwLock::new(None),
            task: Mutex::new(None),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Register the change subscriber. A later call replaces the earlier one.
    pub fn on_clipboard_changed(&self, handler: Arc<dyn ClipboardChangeHandler>) {
        let mut subscriber = self
            .subscriber
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if subscriber.replace(handler).is_some() {
            debug!("Replaced clipboard change subscriber");
        }
    }

    /// Spawn the polling task. No-op when it is already running.
    pub fn start_watching(self: &Arc<Self>) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Clipboard watcher already running, skipping start");
            return;
        }

        let watcher = Arc::clone(self);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(watcher.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                watcher.check_once().await;
            }
        }));
        info!(interval_ms = self.poll_interval.as_millis() as u64, "Clipboard watcher started");
    }

    /// Abort the polling task. Idempotent.
    pub fn stop_watching(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match handle {
            Some(handle) => {
                handle.abort();
                info!("Clipboard watcher stopped");
            }
            None => debug!("Clipboard watcher already stopped"),
        }
    }

    pub fn is_watching(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Run one poll step. Returns `true` when a change was detected.
    ///
    /// Read failures are treated as "no change".
    pub async fn check_once(&self) -> bool {
        let mut last_seen = self.last_seen.lock().await;

        let clipboard = Arc::clone(&self.clipboard);
        let content = match tokio::task::spawn_blocking(move || clipboard.read_text()).await {
            Ok(Ok(Some(text))) if !text.is_empty() => text,
            Ok(Ok(_)) => return false,
            Ok(Err(e)) => {
                debug!(error = %e, "Clipboard read failed");
                return false;
            }
            Err(e) => {
                debug!(error = %e, "Clipboard read task failed");
                return false;
            }
        };

        if last_seen.as_deref() == Some(content.as_str()) {
            return false;
        }
        *last_seen = Some(content.clone());
        drop(last_seen);

        debug!(chars = content.chars().count(), "Clipboard changed");
        self.notify_subscriber(&content).await;

        if let Err(e) = self
            .event_tx
            .send(PlatformEvent::ClipboardChanged { content })
            .await
        {
            warn!(error = %e, "Platform event queue closed, clipboard change dropped");
        }
        true
    }

    /// Put `content` on the OS clipboard without recording it as a new capture.
    ///
    /// Returns `false` when the write fails.
    pub async fn write_to_clipboard(&self, content: &str) -> bool {
        let mut last_seen = self.last_seen.lock().await;
        let previous = last_seen.replace(content.to_string());

        let clipboard = Arc::clone(&self.clipboard);
        let text = content.to_string();
        let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text)).await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Clipboard write failed");
                *last_seen = previous;
                false
            }
            Err(e) => {
                warn!(error = %e, "Clipboard write task failed");
                *last_seen = previous;
                false
            }
        }
    }

    async fn notify_subscriber(&self, content: &str) {
        let subscriber = self
            .subscriber
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(handler) = subscriber {
            if let Err(e) = handler.on_clipboard_changed(content.to_string()).await {
                warn!(error = %e, "Clipboard change subscriber failed");
            }
        }
    }
}

#[async_trait]
impl ClipboardWriterPort for ClipboardWatcher {
    async fn write_text(&self, content: &str) -> bool {
        self.write_to_clipboard(content).await
    }
}

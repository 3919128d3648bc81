use async_trait::async_trait;

/// Start/stop control over the clipboard polling watcher.
///
/// 剪贴板轮询监控器的启停控制端口。
///
/// Both requests are idempotent: starting a running watcher or stopping a
/// stopped one is not an error.
#[async_trait]
pub trait WatcherControlPort: Send + Sync {
    async fn start_watcher(&self) -> Result<(), WatcherControlError>;

    async fn stop_watcher(&self) -> Result<(), WatcherControlError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherControlError {
    #[error("failed to request watcher start: {0}")]
    StartFailed(String),

    #[error("failed to request watcher stop: {0}")]
    StopFailed(String),

    #[error("platform runtime is gone")]
    ChannelClosed,
}

use std::sync::Arc;

use cn_core::ports::{WatcherControlError, WatcherControlPort};
use cn_core::HotkeyBinding;
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::panel::PanelController;

#[derive(Debug, thiserror::Error)]
pub enum AppLifecycleError {
    #[error("clipboard watcher: {0}")]
    Watcher(#[from] WatcherControlError),
}

/// Boots and tears down the long-lived parts of the app.
/// 负责应用长生命周期组件的启动与关闭。
pub struct AppLifecycle {
    panel: Arc<PanelController>,
    watcher_control: Arc<dyn WatcherControlPort>,
    history: Arc<HistoryStore>,
}

impl AppLifecycle {
    pub fn from_ports(
        panel: Arc<PanelController>,
        watcher_control: Arc<dyn WatcherControlPort>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            panel,
            watcher_control,
            history,
        }
    }

    /// Register global hotkeys and start capturing the clipboard.
    ///
    /// Hotkeys that cannot be registered are skipped; the app still runs
    /// and the panel stays reachable through the tray or IPC.
    #[tracing::instrument(name = "usecase.app_lifecycle.start", skip_all)]
    pub async fn start(&self, bindings: &[HotkeyBinding]) -> Result<Vec<String>, AppLifecycleError> {
        let active = self.panel.register_hotkeys(bindings);
        if active.len() < bindings.len() {
            warn!(
                requested = bindings.len(),
                active = active.len(),
                "Some hotkeys could not be registered"
            );
        }

        self.watcher_control.start_watcher().await?;
        info!(hotkeys = ?active, "Application started");
        Ok(active)
    }

    /// Release hotkeys, stop the watcher and flush history. Every step runs
    /// even if an earlier one fails.
    #[tracing::instrument(name = "usecase.app_lifecycle.shutdown", skip_all)]
    pub async fn shutdown(&self) {
        if let Err(e) = self.panel.unregister_hotkeys() {
            warn!(error = %e, "Failed to unregister hotkeys");
        }
        if let Err(e) = self.watcher_control.stop_watcher().await {
            warn!(error = %e, "Failed to stop clipboard watcher");
        }
        if let Err(e) = self.history.close().await {
            warn!(error = %e, "Failed to flush history");
        }
        info!("Application shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cn_core::ports::{ClockPort, DisplayPort, HotkeyPort, PanelWindowPort, UiEventPort};
    use cn_core::{HotkeyAction, MonitorInfo, Point, Size};
    use cn_infra::JsonFileHistoryRepository;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    struct Clock;

    impl ClockPort for Clock {
        fn now_ms(&self) -> i64 {
            5
        }

        fn start_of_today_ms(&self) -> i64 {
            0
        }
    }

    /// Mock WatcherControlPort
    #[derive(Default)]
    struct MockWatcherControl {
        running: AtomicBool,
        fail_start: bool,
    }

    #[async_trait]
    impl WatcherControlPort for MockWatcherControl {
        async fn start_watcher(&self) -> Result<(), WatcherControlError> {
            if self.fail_start {
                return Err(WatcherControlError::ChannelClosed);
            }
            self.running.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
            self.running.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeHotkeys {
        active: Mutex<Vec<String>>,
    }

    impl HotkeyPort for FakeHotkeys {
        fn register(&self, binding: &HotkeyBinding) -> anyhow::Result<()> {
            if binding.accelerator.is_empty() || binding.accelerator.contains("Invalid") {
                anyhow::bail!("unparseable accelerator");
            }
            self.active.lock().unwrap().push(binding.accelerator.clone());
            Ok(())
        }

        fn unregister_all(&self) -> anyhow::Result<()> {
            self.active.lock().unwrap().clear();
            Ok(())
        }
    }

    struct InertWindow;

    impl PanelWindowPort for InertWindow {
        fn outer_size(&self) -> anyhow::Result<Size> {
            Ok(Size::default())
        }
        fn move_to(&self, _: Point) -> anyhow::Result<()> {
            Ok(())
        }
        fn show(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn hide(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn focus(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn set_visible_on_all_workspaces(&self, _: bool) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct NoDisplay;

    impl DisplayPort for NoDisplay {
        fn cursor_position(&self) -> anyhow::Result<Point> {
            Ok(Point::default())
        }
        fn monitors(&self) -> anyhow::Result<Vec<MonitorInfo>> {
            Ok(Vec::new())
        }
    }

    struct SilentUi;

    impl UiEventPort for SilentUi {
        fn emit_clipboard_changed(&self, _: &str) -> anyhow::Result<()> {
            Ok(())
        }
        fn emit_panel_shown(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn panel(hotkeys: Arc<FakeHotkeys>) -> Arc<PanelController> {
        Arc::new(PanelController::new(
            Arc::new(InertWindow),
            Arc::new(NoDisplay),
            hotkeys,
            Arc::new(SilentUi),
            crate::panel::PanelBehavior::default(),
        ))
    }

    fn bindings() -> Vec<HotkeyBinding> {
        vec![
            HotkeyBinding::new("CommandOrControl+Shift+V", HotkeyAction::TogglePanel),
            HotkeyBinding::new("Invalid+Combo", HotkeyAction::HidePanel),
        ]
    }

    #[tokio::test]
    async fn test_start_registers_hotkeys_and_starts_watcher() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileHistoryRepository::open(dir.path().join("history.json"), 100)
            .await
            .unwrap();
        let history = Arc::new(HistoryStore::new(Arc::new(repo), Arc::new(Clock), 100));
        let hotkeys = Arc::new(FakeHotkeys::default());
        let watcher = Arc::new(MockWatcherControl::default());
        let lifecycle = AppLifecycle::from_ports(panel(hotkeys.clone()), watcher.clone(), history);

        let active = lifecycle.start(&bindings()).await.unwrap();

        assert_eq!(active, vec!["CommandOrControl+Shift+V".to_string()]);
        assert!(watcher.running.load(Ordering::SeqCst));

        lifecycle.shutdown().await;

        assert!(!watcher.running.load(Ordering::SeqCst));
        assert!(hotkeys.active.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_flushes_file_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let repo = JsonFileHistoryRepository::open(path.clone(), 100)
            .await
            .unwrap();
        let history = Arc::new(HistoryStore::new(Arc::new(repo), Arc::new(Clock), 100));
        history.save("persist me").await.unwrap();
        let lifecycle = AppLifecycle::from_ports(
            panel(Arc::new(FakeHotkeys::default())),
            Arc::new(MockWatcherControl::default()),
            history,
        );

        lifecycle.shutdown().await;

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("persist me"));
    }

    #[tokio::test]
    async fn test_watcher_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileHistoryRepository::open(dir.path().join("h.json"), 100)
            .await
            .unwrap();
        let watcher = Arc::new(MockWatcherControl {
            fail_start: true,
            ..Default::default()
        });
        let lifecycle = AppLifecycle::from_ports(
            panel(Arc::new(FakeHotkeys::default())),
            watcher,
            Arc::new(HistoryStore::new(Arc::new(repo), Arc::new(Clock), 100)),
        );

        let err = lifecycle.start(&bindings()).await.unwrap_err();

        assert!(matches!(
            err,
            AppLifecycleError::Watcher(WatcherControlError::ChannelClosed)
        ));
    }
}

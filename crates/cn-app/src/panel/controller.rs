use std::sync::{Arc, Mutex, PoisonError};

use cn_core::panel::{center_in, monitor_at};
use cn_core::ports::{DisplayPort, HotkeyPort, PanelWindowPort, UiEventPort};
use cn_core::{HotkeyAction, HotkeyBinding, MonitorInfo, PanelError, PanelState, Point};
use tracing::{debug, info, warn};

/// Platform quirks the controller has to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBehavior {
    /// Briefly make the panel visible on every virtual desktop while showing
    /// it, so it opens on the desktop the user is looking at.
    pub hop_virtual_desktops: bool,
}

impl Default for PanelBehavior {
    fn default() -> Self {
        Self {
            hop_virtual_desktops: cfg!(target_os = "macos"),
        }
    }
}

/// Show/hide state machine for the history panel.
///
/// 历史面板的显示/隐藏状态机。
///
/// The panel is always re-centered on the monitor under the cursor when it
/// is shown; no position is remembered between shows.
pub struct PanelController {
    window: Arc<dyn PanelWindowPort>,
    display: Arc<dyn DisplayPort>,
    hotkeys: Arc<dyn HotkeyPort>,
    ui: Arc<dyn UiEventPort>,
    behavior: PanelBehavior,
    state: tokio::sync::Mutex<PanelState>,
    registered: Mutex<Vec<HotkeyBinding>>,
}

impl PanelController {
    pub fn new(
        window: Arc<dyn PanelWindowPort>,
        display: Arc<dyn DisplayPort>,
        hotkeys: Arc<dyn HotkeyPort>,
        ui: Arc<dyn UiEventPort>,
        behavior: PanelBehavior,
    ) -> Self {
        Self {
            window,
            display,
            hotkeys,
            ui,
            behavior,
            state: tokio::sync::Mutex::new(PanelState::Hidden),
            registered: Mutex::new(Vec::new()),
        }
    }

    pub async fn state(&self) -> PanelState {
        *self.state.lock().await
    }

    /// Flip between `Hidden` and `Shown`, returning the new state.
    #[tracing::instrument(name = "panel.toggle", skip(self))]
    pub async fn toggle(&self) -> Result<PanelState, PanelError> {
        let mut state = self.state.lock().await;
        match *state {
            PanelState::Hidden => self.show_locked(&mut state)?,
            PanelState::Shown => self.hide_locked(&mut state)?,
        }
        Ok(*state)
    }

    pub async fn show_panel(&self) -> Result<(), PanelError> {
        let mut state = self.state.lock().await;
        if state.is_shown() {
            return self.window.focus().map_err(window_error);
        }
        self.show_locked(&mut state)
    }

    pub async fn hide_panel(&self) -> Result<(), PanelError> {
        let mut state = self.state.lock().await;
        self.hide_locked(&mut state)
    }

    /// Entry point for global hotkey presses.
    pub async fn handle_hotkey(&self, action: HotkeyAction) -> Result<(), PanelError> {
        debug!(?action, "Hotkey pressed");
        match action {
            HotkeyAction::TogglePanel => self.toggle().await.map(|_| ()),
            HotkeyAction::HidePanel => self.hide_panel().await,
        }
    }

    /// A history entry was written back to the clipboard; get out of the way.
    pub async fn on_paste_completed(&self) -> Result<(), PanelError> {
        self.hide_panel().await
    }

    /// Replace all global hotkeys with `bindings`.
    ///
    /// Bindings that fail to register are logged and skipped. Returns the
    /// accelerators that are now active.
    #[tracing::instrument(name = "panel.register_hotkeys", skip_all, fields(count = bindings.len()))]
    pub fn register_hotkeys(&self, bindings: &[HotkeyBinding]) -> Vec<String> {
        let mut registered = self
            .registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = self.hotkeys.unregister_all() {
            warn!(error = %e, "Failed to unregister previous hotkeys");
        }
        registered.clear();

        for binding in bindings {
            match self.hotkeys.register(binding) {
                Ok(()) => {
                    info!(accelerator = %binding.accelerator, action = ?binding.action, "Hotkey registered");
                    registered.push(binding.clone());
                }
                Err(e) => {
                    let err = PanelError::HotkeyRegistrationFailed {
                        accelerator: binding.accelerator.clone(),
                        reason: e.to_string(),
                    };
                    warn!(error = %err, "Skipping hotkey");
                }
            }
        }

        registered.iter().map(|b| b.accelerator.clone()).collect()
    }

    pub fn registered_hotkeys(&self) -> Vec<String> {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|b| b.accelerator.clone())
            .collect()
    }

    pub fn unregister_hotkeys(&self) -> Result<(), PanelError> {
        let mut registered = self
            .registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.hotkeys
            .unregister_all()
            .map_err(|e| PanelError::Window(format!("unregister hotkeys: {e}")))?;
        registered.clear();
        Ok(())
    }

    fn show_locked(&self, state: &mut PanelState) -> Result<(), PanelError> {
        let monitors = self.display.monitors().map_err(window_error)?;
        let cursor = match self.display.cursor_position() {
            Ok(cursor) => Some(cursor),
            Err(e) => {
                warn!(error = %e, "Cursor position unavailable, using primary monitor");
                None
            }
        };
        let monitor = pick_monitor(&monitors, cursor).ok_or(PanelError::NoMonitor)?;

        let size = self.window.outer_size().map_err(window_error)?;
        let position = center_in(monitor.work_area, size);
        debug!(
            monitor = monitor.name.as_deref().unwrap_or("<unnamed>"),
            x = position.x,
            y = position.y,
            "Centering panel"
        );
        self.window.move_to(position).map_err(window_error)?;

        if self.behavior.hop_virtual_desktops {
            self.window
                .set_visible_on_all_workspaces(true)
                .map_err(window_error)?;
            self.window.show().map_err(window_error)?;
            let window = Arc::clone(&self.window);
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                if let Err(e) = window.set_visible_on_all_workspaces(false) {
                    warn!(error = %e, "Failed to pin panel back to current desktop");
                }
            });
        } else {
            self.window.show().map_err(window_error)?;
        }
        *state = PanelState::Shown;

        if let Err(e) = self.window.focus() {
            warn!(error = %e, "Panel shown without keyboard focus");
        }

        if let Err(e) = self.ui.emit_panel_shown() {
            warn!(error = %e, "Failed to emit panel shown event");
        }
        Ok(())
    }

    fn hide_locked(&self, state: &mut PanelState) -> Result<(), PanelError> {
        if !state.is_shown() {
            return Ok(());
        }
        self.window.hide().map_err(window_error)?;
        *state = PanelState::Hidden;
        Ok(())
    }
}

fn pick_monitor(monitors: &[MonitorInfo], cursor: Option<Point>) -> Option<&MonitorInfo> {
    match cursor {
        Some(cursor) => monitor_at(monitors, cursor),
        None => monitors
            .iter()
            .find(|m| m.is_primary)
            .or_else(|| monitors.first()),
    }
}

fn window_error(err: anyhow::Error) -> PanelError {
    PanelError::Window(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use cn_core::{Rect, Size};
    use mockall::{mock, predicate::eq, Sequence};

    mock! {
        pub Window {}

        impl PanelWindowPort for Window {
            fn outer_size(&self) -> anyhow::Result<Size>;
            fn move_to(&self, position: Point) -> anyhow::Result<()>;
            fn show(&self) -> anyhow::Result<()>;
            fn hide(&self) -> anyhow::Result<()>;
            fn focus(&self) -> anyhow::Result<()>;
            fn set_visible_on_all_workspaces(&self, visible: bool) -> anyhow::Result<()>;
        }
    }

    mock! {
        pub Display {}

        impl DisplayPort for Display {
            fn cursor_position(&self) -> anyhow::Result<Point>;
            fn monitors(&self) -> anyhow::Result<Vec<MonitorInfo>>;
        }
    }

    mock! {
        pub Hotkeys {}

        impl HotkeyPort for Hotkeys {
            fn register(&self, binding: &HotkeyBinding) -> anyhow::Result<()>;
            fn unregister_all(&self) -> anyhow::Result<()>;
        }
    }

    #[derive(Default)]
    struct CountingUi {
        shown: std::sync::atomic::AtomicUsize,
    }

    impl UiEventPort for CountingUi {
        fn emit_clipboard_changed(&self, _content: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn emit_panel_shown(&self) -> anyhow::Result<()> {
            self.shown
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    fn two_monitors() -> Vec<MonitorInfo> {
        vec![
            MonitorInfo {
                name: Some("left".into()),
                bounds: Rect::new(0, 0, 1920, 1080),
                work_area: Rect::new(0, 25, 1920, 1055),
                is_primary: true,
            },
            MonitorInfo {
                name: Some("right".into()),
                bounds: Rect::new(1920, 0, 2560, 1440),
                work_area: Rect::new(1920, 0, 2560, 1400),
                is_primary: false,
            },
        ]
    }

    fn display_with_cursor(cursor: anyhow::Result<Point>) -> MockDisplay {
        let mut display = MockDisplay::new();
        display.expect_monitors().returning(|| Ok(two_monitors()));
        let mut cursor = Some(cursor);
        display
            .expect_cursor_position()
            .returning(move || cursor.take().unwrap_or_else(|| Err(anyhow!("sampled twice"))));
        display
    }

    fn showable_window(expected_position: Point) -> MockWindow {
        let mut window = MockWindow::new();
        window
            .expect_outer_size()
            .returning(|| Ok(Size::new(400, 500)));
        window
            .expect_move_to()
            .with(eq(expected_position))
            .times(1)
            .returning(|_| Ok(()));
        window.expect_show().times(1).returning(|| Ok(()));
        window.expect_focus().returning(|| Ok(()));
        window
    }

    fn controller(
        window: MockWindow,
        display: MockDisplay,
        hotkeys: MockHotkeys,
        ui: Arc<CountingUi>,
    ) -> PanelController {
        PanelController::new(
            Arc::new(window),
            Arc::new(display),
            Arc::new(hotkeys),
            ui,
            PanelBehavior {
                hop_virtual_desktops: false,
            },
        )
    }

    #[tokio::test]
    async fn test_toggle_centers_on_monitor_under_cursor() {
        // (1920 + (2560 - 400) / 2, 0 + (1400 - 500) / 2)
        let window = showable_window(Point::new(3000, 450));
        let display = display_with_cursor(Ok(Point::new(2500, 700)));
        let ui = Arc::new(CountingUi::default());
        let panel = controller(window, display, MockHotkeys::new(), ui.clone());

        let state = panel.toggle().await.unwrap();

        assert_eq!(state, PanelState::Shown);
        assert_eq!(ui.shown.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cursor_failure_falls_back_to_primary_monitor() {
        // (0 + (1920 - 400) / 2, 25 + (1055 - 500) / 2)
        let window = showable_window(Point::new(760, 302));
        let display = display_with_cursor(Err(anyhow!("no pointer")));
        let panel = controller(
            window,
            display,
            MockHotkeys::new(),
            Arc::new(CountingUi::default()),
        );

        panel.show_panel().await.unwrap();

        assert_eq!(panel.state().await, PanelState::Shown);
    }

    #[tokio::test]
    async fn test_second_toggle_hides() {
        let mut window = showable_window(Point::new(760, 302));
        window.expect_hide().times(1).returning(|| Ok(()));
        let display = display_with_cursor(Ok(Point::new(10, 10)));
        let panel = controller(
            window,
            display,
            MockHotkeys::new(),
            Arc::new(CountingUi::default()),
        );

        assert_eq!(panel.toggle().await.unwrap(), PanelState::Shown);
        assert_eq!(panel.toggle().await.unwrap(), PanelState::Hidden);
    }

    #[tokio::test]
    async fn test_focus_failure_still_counts_as_shown() {
        let mut window = MockWindow::new();
        window
            .expect_outer_size()
            .returning(|| Ok(Size::new(400, 500)));
        window.expect_move_to().returning(|_| Ok(()));
        window.expect_show().times(1).returning(|| Ok(()));
        window
            .expect_focus()
            .returning(|| Err(anyhow!("focus stolen")));
        window.expect_hide().times(1).returning(|| Ok(()));
        let display = display_with_cursor(Ok(Point::new(10, 10)));
        let ui = Arc::new(CountingUi::default());
        let panel = controller(window, display, MockHotkeys::new(), ui.clone());

        assert_eq!(panel.toggle().await.unwrap(), PanelState::Shown);
        assert_eq!(ui.shown.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(panel.toggle().await.unwrap(), PanelState::Hidden);
    }

    #[tokio::test]
    async fn test_hide_when_hidden_is_a_no_op() {
        let mut window = MockWindow::new();
        window.expect_hide().never();
        let panel = controller(
            window,
            MockDisplay::new(),
            MockHotkeys::new(),
            Arc::new(CountingUi::default()),
        );

        panel.hide_panel().await.unwrap();
        panel.handle_hotkey(HotkeyAction::HidePanel).await.unwrap();

        assert_eq!(panel.state().await, PanelState::Hidden);
    }

    #[tokio::test]
    async fn test_no_monitor_keeps_panel_hidden() {
        let mut display = MockDisplay::new();
        display.expect_monitors().returning(|| Ok(Vec::new()));
        display
            .expect_cursor_position()
            .returning(|| Ok(Point::new(0, 0)));
        let mut window = MockWindow::new();
        window.expect_show().never();
        let panel = controller(
            window,
            display,
            MockHotkeys::new(),
            Arc::new(CountingUi::default()),
        );

        let err = panel.toggle().await.unwrap_err();

        assert!(matches!(err, PanelError::NoMonitor));
        assert_eq!(panel.state().await, PanelState::Hidden);
    }

    #[tokio::test]
    async fn test_paste_completion_hides_shown_panel() {
        let mut window = showable_window(Point::new(760, 302));
        window.expect_hide().times(1).returning(|| Ok(()));
        let display = display_with_cursor(Ok(Point::new(100, 100)));
        let panel = controller(
            window,
            display,
            MockHotkeys::new(),
            Arc::new(CountingUi::default()),
        );

        panel.handle_hotkey(HotkeyAction::TogglePanel).await.unwrap();
        panel.on_paste_completed().await.unwrap();

        assert_eq!(panel.state().await, PanelState::Hidden);
    }

    #[test]
    fn test_register_hotkeys_unregisters_first_and_skips_failures() {
        let mut seq = Sequence::new();
        let mut hotkeys = MockHotkeys::new();
        hotkeys
            .expect_unregister_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        hotkeys
            .expect_register()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|binding| {
                if binding.accelerator == "Broken+Key" {
                    Err(anyhow!("already taken"))
                } else {
                    Ok(())
                }
            });
        let panel = controller(
            MockWindow::new(),
            MockDisplay::new(),
            hotkeys,
            Arc::new(CountingUi::default()),
        );

        let active = panel.register_hotkeys(&[
            HotkeyBinding::new("Broken+Key", HotkeyAction::TogglePanel),
            HotkeyBinding::new("Escape", HotkeyAction::HidePanel),
        ]);

        assert_eq!(active, vec!["Escape".to_string()]);
        assert_eq!(panel.registered_hotkeys(), vec!["Escape".to_string()]);
    }

    #[test]
    fn test_reregistration_replaces_previous_bindings() {
        let mut hotkeys = MockHotkeys::new();
        hotkeys.expect_unregister_all().times(3).returning(|| Ok(()));
        hotkeys.expect_register().returning(|_| Ok(()));
        let panel = controller(
            MockWindow::new(),
            MockDisplay::new(),
            hotkeys,
            Arc::new(CountingUi::default()),
        );

        panel.register_hotkeys(&[HotkeyBinding::new("Alt+V", HotkeyAction::TogglePanel)]);
        let active =
            panel.register_hotkeys(&[HotkeyBinding::new("Alt+C", HotkeyAction::TogglePanel)]);
        assert_eq!(active, vec!["Alt+C".to_string()]);

        panel.unregister_hotkeys().unwrap();
        assert!(panel.registered_hotkeys().is_empty());
    }

    struct RecordingWindow {
        calls: Mutex<Vec<String>>,
    }

    impl PanelWindowPort for RecordingWindow {
        fn outer_size(&self) -> anyhow::Result<Size> {
            Ok(Size::new(400, 500))
        }
        fn move_to(&self, p: Point) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("move {} {}", p.x, p.y));
            Ok(())
        }
        fn show(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("show".into());
            Ok(())
        }
        fn hide(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("hide".into());
            Ok(())
        }
        fn focus(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("focus".into());
            Ok(())
        }
        fn set_visible_on_all_workspaces(&self, visible: bool) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("all_workspaces {visible}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_virtual_desktop_hop_is_cleared_after_yield() {
        let window = Arc::new(RecordingWindow {
            calls: Mutex::new(Vec::new()),
        });
        let panel = PanelController::new(
            window.clone(),
            Arc::new(display_with_cursor(Ok(Point::new(5, 5)))),
            Arc::new(MockHotkeys::new()),
            Arc::new(CountingUi::default()),
            PanelBehavior {
                hop_virtual_desktops: true,
            },
        );

        panel.show_panel().await.unwrap();
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        let calls = window.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "move 760 302",
                "all_workspaces true",
                "show",
                "focus",
                "all_workspaces false",
            ]
        );
    }
}

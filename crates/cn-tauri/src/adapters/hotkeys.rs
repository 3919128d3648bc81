use std::sync::Arc;

use anyhow::{anyhow, Result};
use cn_app::PanelController;
use cn_core::ports::HotkeyPort;
use cn_core::{HotkeyAction, HotkeyBinding};
use tauri::{AppHandle, Runtime};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Global shortcuts through `tauri-plugin-global-shortcut`.
///
/// 通过 global-shortcut 插件注册的全局快捷键。
///
/// Presses are not handled inline: each one is forwarded as a
/// [`HotkeyAction`] to the dispatcher task, which owns the panel.
pub struct TauriHotkeys<R: Runtime> {
    app: AppHandle<R>,
    actions: mpsc::Sender<HotkeyAction>,
}

impl<R: Runtime> TauriHotkeys<R> {
    pub fn new(app: AppHandle<R>, actions: mpsc::Sender<HotkeyAction>) -> Self {
        Self { app, actions }
    }
}

impl<R: Runtime> HotkeyPort for TauriHotkeys<R> {
    fn register(&self, binding: &HotkeyBinding) -> Result<()> {
        let shortcut = binding
            .accelerator
            .parse::<Shortcut>()
            .map_err(|e| anyhow!("invalid accelerator: {e}"))?;
        let action = binding.action;
        let actions = self.actions.clone();

        self.app
            .global_shortcut()
            .on_shortcut(shortcut, move |_app, _shortcut, event| {
                if let ShortcutState::Pressed = event.state {
                    if let Err(e) = actions.try_send(action) {
                        warn!(error = %e, ?action, "Dropped hotkey press");
                    }
                }
            })?;
        Ok(())
    }

    fn unregister_all(&self) -> Result<()> {
        self.app.global_shortcut().unregister_all()?;
        Ok(())
    }
}

/// Feed hotkey presses into the panel controller, one at a time.
pub fn spawn_hotkey_dispatcher(
    panel: Arc<PanelController>,
    mut actions: mpsc::Receiver<HotkeyAction>,
) {
    tauri::async_runtime::spawn(async move {
        while let Some(action) = actions.recv().await {
            if let Err(e) = panel.handle_hotkey(action).await {
                warn!(error = %e, ?action, "Hotkey action failed");
            }
        }
        debug!("Hotkey dispatcher stopped");
    });
}

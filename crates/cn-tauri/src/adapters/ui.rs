use anyhow::Result;
use cn_core::ports::UiEventPort;
use tauri::{AppHandle, Runtime};

use crate::events::{forward_clipboard_changed, forward_panel_shown};

/// Pushes backend events to every webview.
pub struct TauriUiEvents<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriUiEvents<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> UiEventPort for TauriUiEvents<R> {
    fn emit_clipboard_changed(&self, content: &str) -> Result<()> {
        forward_clipboard_changed(&self.app, content)?;
        Ok(())
    }

    fn emit_panel_shown(&self) -> Result<()> {
        forward_panel_shown(&self.app)?;
        Ok(())
    }
}

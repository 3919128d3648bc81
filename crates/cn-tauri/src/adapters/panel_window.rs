use anyhow::Result;
use cn_core::ports::PanelWindowPort;
use cn_core::{Point, Size};
use tauri::{PhysicalPosition, Runtime, WebviewWindow};

/// The history panel's webview window.
pub struct TauriPanelWindow<R: Runtime> {
    window: WebviewWindow<R>,
}

impl<R: Runtime> TauriPanelWindow<R> {
    pub fn new(window: WebviewWindow<R>) -> Self {
        Self { window }
    }
}

impl<R: Runtime> PanelWindowPort for TauriPanelWindow<R> {
    fn outer_size(&self) -> Result<Size> {
        let size = self.window.outer_size()?;
        Ok(Size::new(size.width, size.height))
    }

    fn move_to(&self, position: Point) -> Result<()> {
        self.window
            .set_position(PhysicalPosition::new(position.x, position.y))?;
        Ok(())
    }

    fn show(&self) -> Result<()> {
        self.window.show()?;
        Ok(())
    }

    fn hide(&self) -> Result<()> {
        self.window.hide()?;
        Ok(())
    }

    fn focus(&self) -> Result<()> {
        self.window.set_focus()?;
        Ok(())
    }

    fn set_visible_on_all_workspaces(&self, visible: bool) -> Result<()> {
        self.window.set_visible_on_all_workspaces(visible)?;
        Ok(())
    }
}

//! Ports used by the panel controller.
//!
//! 面板控制器使用的端口。
//!
//! All calls are synchronous: desktop shells dispatch window work onto their
//! own main thread and return immediately.

use anyhow::Result;

use crate::panel::{HotkeyBinding, MonitorInfo, Point, Size};

/// The panel's native window.
pub trait PanelWindowPort: Send + Sync {
    /// Outer size in physical pixels.
    fn outer_size(&self) -> Result<Size>;

    /// Move the top-left corner, in physical pixels.
    fn move_to(&self, position: Point) -> Result<()>;

    fn show(&self) -> Result<()>;

    fn hide(&self) -> Result<()>;

    fn focus(&self) -> Result<()>;

    /// Follow the user across virtual desktops (macOS Spaces).
    fn set_visible_on_all_workspaces(&self, visible: bool) -> Result<()>;
}

/// Cursor and monitor layout.
pub trait DisplayPort: Send + Sync {
    /// Global cursor position in physical pixels.
    fn cursor_position(&self) -> Result<Point>;

    fn monitors(&self) -> Result<Vec<MonitorInfo>>;
}

/// System-wide keyboard shortcuts.
pub trait HotkeyPort: Send + Sync {
    fn register(&self, binding: &HotkeyBinding) -> Result<()>;

    fn unregister_all(&self) -> Result<()>;
}

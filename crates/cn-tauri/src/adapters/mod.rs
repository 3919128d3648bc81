//! Tauri-backed port implementations.
//!
//! These adapters must only be constructed inside the Tauri setup phase.

mod display;
mod hotkeys;
mod panel_window;
mod ui;

pub use display::TauriDisplay;
pub use hotkeys::{spawn_hotkey_dispatcher, TauriHotkeys};
pub use panel_window::TauriPanelWindow;
pub use ui::TauriUiEvents;

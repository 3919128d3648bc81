//! Panel domain: visibility state, hotkey bindings and monitor geometry.

mod geometry;
mod hotkey;
mod state;

pub use geometry::{center_in, monitor_at, MonitorInfo, Point, Rect, Size};
pub use hotkey::{HotkeyAction, HotkeyBinding};
pub use state::PanelState;

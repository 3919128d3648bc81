mod controller;

pub use controller::{PanelBehavior, PanelController};

use serde::{Deserialize, Serialize};

/// Visibility of the history panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelState {
    #[default]
    Hidden,
    Shown,
}

impl PanelState {
    pub fn is_shown(&self) -> bool {
        matches!(self, PanelState::Shown)
    }
}

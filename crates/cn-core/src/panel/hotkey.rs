use serde::{Deserialize, Serialize};

/// What a global hotkey does when pressed.
///
/// 全局快捷键被按下时触发的动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    TogglePanel,
    HidePanel,
}

/// An accelerator string (e.g. `CommandOrControl+Shift+V`) bound to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    pub accelerator: String,
    pub action: HotkeyAction,
}

impl HotkeyBinding {
    pub fn new(accelerator: impl Into<String>, action: HotkeyAction) -> Self {
        Self {
            accelerator: accelerator.into(),
            action,
        }
    }
}

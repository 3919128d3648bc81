use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clipboard::DEFAULT_PREVIEW_CHARS;
use crate::panel::{HotkeyAction, HotkeyBinding, Size};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_TOGGLE_HOTKEY: &str = "CommandOrControl+Shift+V";
pub const DEFAULT_HIDE_HOTKEY: &str = "Escape";
pub const DEFAULT_PANEL_WIDTH: u32 = 400;
pub const DEFAULT_PANEL_HEIGHT: u32 = 500;

/// Which persistence backend backs the history.
///
/// 历史记录使用的持久化后端。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    Memory,
    File,
    #[default]
    Sqlite,
}

impl FromStr for StorageBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(anyhow::anyhow!("unknown storage backend: {other}")),
        }
    }
}

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Selected history backend
    pub storage_backend: StorageBackendKind,

    /// SQLite database path (path info only, no existence check)
    /// SQLite 数据库路径（仅路径信息，不检查文件是否存在）
    pub database_path: PathBuf,

    /// JSON history document path
    pub history_file_path: PathBuf,

    /// Clipboard polling period
    pub poll_interval_ms: u64,

    /// Preview length in characters
    pub max_preview_chars: usize,

    pub toggle_panel_hotkey: String,
    pub hide_panel_hotkey: String,

    pub panel_width: u32,
    pub panel_height: u32,
}

impl AppConfig {
    /// Create AppConfig with system-default paths for production use
    /// 生产环境使用：创建具有系统默认路径的 AppConfig
    ///
    /// # Arguments / 参数
    ///
    /// * `data_dir` - Base directory for app data (e.g., `~/.local/share/clipnest`)
    ///                应用数据的基础目录
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            storage_backend: StorageBackendKind::default(),
            database_path: data_dir.join("clipnest.db"),
            history_file_path: data_dir.join("history.json"),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_preview_chars: DEFAULT_PREVIEW_CHARS,
            toggle_panel_hotkey: DEFAULT_TOGGLE_HOTKEY.to_string(),
            hide_panel_hotkey: DEFAULT_HIDE_HOTKEY.to_string(),
            panel_width: DEFAULT_PANEL_WIDTH,
            panel_height: DEFAULT_PANEL_HEIGHT,
        }
    }

    /// Overlay the keys present in `toml_value` on top of `base`.
    /// 将 `toml_value` 中存在的键覆盖到 `base` 之上。
    ///
    /// Only an unknown `storage.backend` is an error; every other missing or
    /// mistyped key keeps the base value.
    pub fn from_toml(toml_value: &toml::Value, base: Self) -> anyhow::Result<Self> {
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));
        let get_str = |section: &str, key: &str| get(section, key).and_then(|v| v.as_str());
        let get_uint = |section: &str, key: &str| {
            get(section, key)
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };

        let storage_backend = match get_str("storage", "backend") {
            Some(raw) => raw.parse()?,
            None => base.storage_backend,
        };

        Ok(Self {
            storage_backend,
            database_path: get_str("storage", "database_path")
                .map(PathBuf::from)
                .unwrap_or(base.database_path),
            history_file_path: get_str("storage", "history_file_path")
                .map(PathBuf::from)
                .unwrap_or(base.history_file_path),
            poll_interval_ms: get_uint("clipboard", "poll_interval_ms")
                .filter(|ms| *ms > 0)
                .unwrap_or(base.poll_interval_ms),
            max_preview_chars: get_uint("clipboard", "max_preview_chars")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(base.max_preview_chars),
            toggle_panel_hotkey: get_str("hotkeys", "toggle_panel")
                .map(str::to_string)
                .unwrap_or(base.toggle_panel_hotkey),
            hide_panel_hotkey: get_str("hotkeys", "hide_panel")
                .map(str::to_string)
                .unwrap_or(base.hide_panel_hotkey),
            panel_width: get_uint("panel", "width")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(base.panel_width),
            panel_height: get_uint("panel", "height")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(base.panel_height),
        })
    }

    /// Hotkeys to register at startup. Empty accelerators are skipped.
    pub fn hotkey_bindings(&self) -> Vec<HotkeyBinding> {
        [
            (&self.toggle_panel_hotkey, HotkeyAction::TogglePanel),
            (&self.hide_panel_hotkey, HotkeyAction::HidePanel),
        ]
        .into_iter()
        .filter(|(accelerator, _)| !accelerator.trim().is_empty())
        .map(|(accelerator, action)| HotkeyBinding::new(accelerator.clone(), action))
        .collect()
    }

    pub fn panel_size(&self) -> Size {
        Size::new(self.panel_width, self.panel_height)
    }
}

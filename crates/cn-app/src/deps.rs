//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping handed to the shell runtime.
//! 此模块定义交给外壳运行时的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use cn_core::ports::{ClipboardWriterPort, UiEventPort, WatcherControlPort};
use cn_core::AppConfig;

use crate::history::HistoryStore;
use crate::panel::PanelController;

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct AppDeps {
    pub config: AppConfig,

    // History / 历史
    pub history: Arc<HistoryStore>,

    // Clipboard / 剪贴板
    pub clipboard_writer: Arc<dyn ClipboardWriterPort>,
    pub watcher_control: Arc<dyn WatcherControlPort>,

    // Panel & UI / 面板与界面
    pub panel: Arc<PanelController>,
    pub ui_events: Arc<dyn UiEventPort>,
}

//! # AppRuntime / 应用运行时
//!
//! The `AppRuntime` is the state Tauri manages for every command. It wraps
//! `AppDeps` and provides a `usecases()` method that returns a `UseCases`
//! accessor.
//!
//! `AppRuntime` 是访问所有应用依赖和用例的中心点。
//!
//! ```ignore
//! use std::sync::Arc;
//! use cn_tauri::bootstrap::AppRuntime;
//! use tauri::State;
//!
//! #[tauri::command]
//! async fn paste(runtime: State<'_, Arc<AppRuntime>>, id: i64) -> Result<bool, String> {
//!     let uc = runtime.usecases().paste_history_entry();
//!     uc.execute(id.into()).await.map_err(|e| e.to_string())
//! }
//! ```

use std::sync::Arc;

use cn_app::usecases::{
    AppLifecycle, CaptureClipboardText, NotifyClipboardChanged, PasteHistoryEntry,
};
use cn_app::{AppDeps, HistoryStore, PanelController};
use cn_core::AppConfig;

use super::wiring::{
    create_history_store, create_platform_layer, create_system_clipboard, PlatformLayer,
    WiringResult,
};

pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
}

impl AppRuntime {
    /// Create a new AppRuntime from dependencies.
    /// 从依赖创建新的 AppRuntime。
    pub fn new(deps: AppDeps) -> Self {
        Self { deps }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.deps.history
    }

    pub fn panel(&self) -> &Arc<PanelController> {
        &self.deps.panel
    }

    /// Get use cases accessor.
    /// 获取用例访问器。
    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Use case accessor for AppRuntime.
/// AppRuntime 的用例访问器。
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    /// Handler the platform runtime calls for every captured clipboard change.
    pub fn capture_clipboard_text(&self) -> CaptureClipboardText {
        CaptureClipboardText::from_ports(self.runtime.deps.history.clone())
    }

    /// Subscriber the watcher calls directly, before the change is queued.
    pub fn notify_clipboard_changed(&self) -> NotifyClipboardChanged {
        NotifyClipboardChanged::from_ports(self.runtime.deps.ui_events.clone())
    }

    pub fn paste_history_entry(&self) -> PasteHistoryEntry {
        PasteHistoryEntry::from_ports(
            self.runtime.deps.history.clone(),
            self.runtime.deps.clipboard_writer.clone(),
            self.runtime.deps.panel.clone(),
        )
    }

    pub fn app_lifecycle(&self) -> AppLifecycle {
        AppLifecycle::from_ports(
            self.runtime.deps.panel.clone(),
            self.runtime.deps.watcher_control.clone(),
            self.runtime.deps.history.clone(),
        )
    }
}

/// Everything that can be assembled before Tauri starts.
/// 在 Tauri 启动之前即可组装的部分。
///
/// - Phase 1 (pre-Tauri): `load_config()` → `create_runtime()` → `AppRuntimeSeed`
/// - Phase 2 (Tauri setup): shell ports + seed → `AppDeps` → `AppRuntime`
pub struct AppRuntimeSeed {
    /// Application configuration loaded from TOML
    /// 从 TOML 加载的应用配置
    pub config: AppConfig,
    pub history: Arc<HistoryStore>,
    pub platform: PlatformLayer,
}

/// Create the runtime seed without touching Tauri.
///
/// Opens the history backend and the system clipboard. Failure here aborts
/// startup.
pub async fn create_runtime(config: AppConfig) -> WiringResult<AppRuntimeSeed> {
    let history = create_history_store(&config).await?;
    let clipboard = create_system_clipboard()?;
    let platform = create_platform_layer(&config, clipboard);
    Ok(AppRuntimeSeed {
        config,
        history,
        platform,
    })
}

//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (db, json file, memory) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (clipboard, watcher) / 创建 platform 层具体实现
//! - ✅ Inject all dependencies into AppDeps / 将所有依赖注入到 AppDeps
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on cn-infra + cn-platform + cn-app simultaneously.**
//! > **这是唯一允许同时依赖 cn-infra、cn-platform 和 cn-app 的地方。**

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cn_app::{AppDeps, HistoryStore, PanelBehavior, PanelController};
use cn_core::config::{AppConfig, StorageBackendKind};
use cn_core::ports::*;
use cn_infra::db::{init_db_pool, DbPool, DieselSqliteExecutor, SqliteHistoryRepository};
use cn_infra::{InMemoryHistoryRepository, JsonFileHistoryRepository, SystemClock};
use cn_platform::adapters::InMemoryWatcherControl;
use cn_platform::clipboard::{ClipboardWatcher, LocalClipboard};
use cn_platform::runtime::event_bus::{command_channel, event_channel};
use cn_platform::runtime::PlatformRuntime;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("History file initialization failed: {0}")]
    HistoryFileInit(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

/// Create SQLite database connection pool
/// 创建 SQLite 数据库连接池
///
/// # Errors / 错误
///
/// Returns `WiringError::DatabaseInit` if:
/// - Parent directory creation fails / 父目录创建失败
/// - Database pool creation fails / 数据库池创建失败
/// - Migration fails / 迁移失败
fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    // Ensure parent directory exists
    // 确保父目录存在
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {}", e)))
}

/// Pick the persistence backend named by the configuration.
/// 根据配置选择持久化后端。
pub async fn create_history_repository(
    config: &AppConfig,
) -> WiringResult<Arc<dyn ClipboardHistoryRepositoryPort>> {
    tracing::info!(backend = ?config.storage_backend, "Creating history backend");
    let repo: Arc<dyn ClipboardHistoryRepositoryPort> = match config.storage_backend {
        StorageBackendKind::Memory => Arc::new(InMemoryHistoryRepository::new()),
        StorageBackendKind::File => Arc::new(
            JsonFileHistoryRepository::open(
                config.history_file_path.clone(),
                config.max_preview_chars,
            )
            .await
            .map_err(|e| WiringError::HistoryFileInit(e.to_string()))?,
        ),
        StorageBackendKind::Sqlite => {
            let pool = create_db_pool(&config.database_path)?;
            Arc::new(SqliteHistoryRepository::with_executor(
                DieselSqliteExecutor::new(pool),
            ))
        }
    };
    Ok(repo)
}

pub async fn create_history_store(config: &AppConfig) -> WiringResult<Arc<HistoryStore>> {
    let repo = create_history_repository(config).await?;
    Ok(Arc::new(HistoryStore::new(
        repo,
        Arc::new(SystemClock),
        config.max_preview_chars,
    )))
}

/// Platform layer implementations / 平台层实现
///
/// Everything here can be built before Tauri starts. The runtime is not yet
/// spawned; its clipboard handler is attached during Tauri setup.
pub struct PlatformLayer {
    pub watcher: Arc<ClipboardWatcher>,
    pub runtime: PlatformRuntime,
    pub watcher_control: Arc<dyn WatcherControlPort>,
}

pub fn create_platform_layer(
    config: &AppConfig,
    clipboard: Arc<dyn SystemClipboardPort>,
) -> PlatformLayer {
    let (event_tx, event_rx) = event_channel();
    let (command_tx, command_rx) = command_channel();

    let watcher = Arc::new(ClipboardWatcher::new(
        clipboard,
        event_tx,
        Duration::from_millis(config.poll_interval_ms),
    ));
    let runtime = PlatformRuntime::new(watcher.clone(), event_rx, command_rx, None);

    PlatformLayer {
        watcher,
        runtime,
        watcher_control: Arc::new(InMemoryWatcherControl::new(command_tx)),
    }
}

pub fn create_system_clipboard() -> WiringResult<Arc<dyn SystemClipboardPort>> {
    let clipboard =
        LocalClipboard::new().map_err(|e| WiringError::ClipboardInit(e.to_string()))?;
    Ok(Arc::new(clipboard))
}

/// Ports that only exist once the Tauri app (and its panel window) is up.
/// 仅在 Tauri 应用及面板窗口创建后才存在的端口。
pub struct ShellPorts {
    pub window: Arc<dyn PanelWindowPort>,
    pub display: Arc<dyn DisplayPort>,
    pub hotkeys: Arc<dyn HotkeyPort>,
    pub ui_events: Arc<dyn UiEventPort>,
}

/// Assemble the application dependencies.
/// 组装应用依赖。
pub fn wire_dependencies(
    config: AppConfig,
    history: Arc<HistoryStore>,
    platform: &PlatformLayer,
    shell: ShellPorts,
) -> AppDeps {
    let panel = Arc::new(PanelController::new(
        shell.window,
        shell.display,
        shell.hotkeys,
        shell.ui_events.clone(),
        PanelBehavior::default(),
    ));

    AppDeps {
        config,
        history,
        clipboard_writer: platform.watcher.clone(),
        watcher_control: platform.watcher_control.clone(),
        panel,
        ui_events: shell.ui_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path, backend: StorageBackendKind) -> AppConfig {
        let mut config = AppConfig::with_system_defaults(dir.to_path_buf());
        config.storage_backend = backend;
        config
    }

    #[test]
    fn test_create_db_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("clipnest.db");

        let pool = create_db_pool(&db_path);

        assert!(pool.is_ok());
        assert!(db_path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_each_backend_can_be_selected() {
        for backend in [
            StorageBackendKind::Memory,
            StorageBackendKind::File,
            StorageBackendKind::Sqlite,
        ] {
            let dir = tempfile::tempdir().unwrap();
            let store = create_history_store(&config_in(dir.path(), backend))
                .await
                .unwrap();

            let id = store.save("wired").await.unwrap();
            assert_eq!(id.value(), 1, "{backend:?}");
            store.close().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_file_backend_writes_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), StorageBackendKind::File);
        let store = create_history_store(&config).await.unwrap();

        store.save("on disk").await.unwrap();

        assert_eq!(config.history_file_path, dir.path().join("history.json"));
        assert!(config.history_file_path.exists());
    }
}

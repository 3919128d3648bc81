use anyhow::Context;
use cn_core::ports::AppDirsPort;
use cn_core::AppConfig;
use cn_platform::app_dirs::DirsAppDirsAdapter;
use cn_tauri::bootstrap::{create_runtime, load_config, run_app};

/// Application entry point: tracing, configuration, history, then Tauri.
pub fn run() -> anyhow::Result<()> {
    if let Err(e) = cn_tauri::bootstrap::tracing::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application directories")?;
    let defaults = AppConfig::with_system_defaults(app_dirs.app_data_root.clone());
    let config = match load_config(&app_dirs.config_path(), defaults.clone()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid config file, using defaults");
            defaults
        }
    };
    tracing::info!(
        backend = ?config.storage_backend,
        data_dir = %app_dirs.app_data_root.display(),
        "Starting Clipnest"
    );

    let seed = tauri::async_runtime::block_on(create_runtime(config))
        .context("Failed to initialize history storage")?;

    run_app(seed, tauri::generate_context!())
}

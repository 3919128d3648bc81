use std::sync::Arc;

use cn_app::usecases::{CaptureClipboardText, NotifyClipboardChanged};
use tauri::{
    App, AppHandle, Manager, RunEvent, WebviewUrl, WebviewWindowBuilder, WindowEvent, Wry,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::runtime::{AppRuntime, AppRuntimeSeed};
use super::wiring::{wire_dependencies, ShellPorts};
use crate::adapters::{
    spawn_hotkey_dispatcher, TauriDisplay, TauriHotkeys, TauriPanelWindow, TauriUiEvents,
};
use crate::commands;

pub const PANEL_WINDOW_LABEL: &str = "panel";
const HOTKEY_QUEUE_CAPACITY: usize = 16;

type SetupResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Run the Tauri application with the given runtime seed.
///
/// AppHandle-dependent adapters are created and injected in the setup hook;
/// the completed [`AppRuntime`] is then managed as Tauri state.
pub fn run_app(seed: AppRuntimeSeed, context: tauri::Context<Wry>) -> anyhow::Result<()> {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(move |app| {
            let runtime = build_runtime(app, seed)?;
            app.manage(runtime);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::clipboard::get_clipboard_items,
            commands::clipboard::save_clipboard_item,
            commands::clipboard::delete_clipboard_item,
            commands::clipboard::update_clipboard_item,
            commands::clipboard::search_clipboard_items,
            commands::clipboard::get_favorite_clipboard_items,
            commands::clipboard::get_clipboard_stats,
            commands::clipboard::clear_all_clipboard_items,
            commands::clipboard::paste_clipboard_item,
            commands::panel::show_panel,
            commands::panel::hide_panel,
        ])
        .build(context)?;

    app.run(handle_run_event);
    Ok(())
}

/// Build the completed runtime from the seed.
///
/// This must be called from the Tauri setup closure.
fn build_runtime(app: &mut App<Wry>, seed: AppRuntimeSeed) -> SetupResult<Arc<AppRuntime>> {
    let AppRuntimeSeed {
        config,
        history,
        mut platform,
    } = seed;

    let window = WebviewWindowBuilder::new(app, PANEL_WINDOW_LABEL, WebviewUrl::default())
        .title("Clipnest")
        .inner_size(f64::from(config.panel_width), f64::from(config.panel_height))
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .resizable(false)
        .visible(false)
        .build()?;

    let handle = app.handle().clone();
    let (hotkey_tx, hotkey_rx) = mpsc::channel(HOTKEY_QUEUE_CAPACITY);
    let shell = ShellPorts {
        window: Arc::new(TauriPanelWindow::new(window)),
        display: Arc::new(TauriDisplay::new(handle.clone())),
        hotkeys: Arc::new(TauriHotkeys::new(handle.clone(), hotkey_tx)),
        ui_events: Arc::new(TauriUiEvents::new(handle)),
    };

    let bindings = config.hotkey_bindings();
    let deps = wire_dependencies(config, history, &platform, shell);
    let runtime = Arc::new(AppRuntime::new(deps));

    let notify: Arc<NotifyClipboardChanged> =
        Arc::new(runtime.usecases().notify_clipboard_changed());
    platform.watcher.on_clipboard_changed(notify);
    let capture: Arc<CaptureClipboardText> = Arc::new(runtime.usecases().capture_clipboard_text());
    platform.runtime.set_clipboard_handler(capture);
    tauri::async_runtime::spawn(platform.runtime.start());
    spawn_hotkey_dispatcher(runtime.panel().clone(), hotkey_rx);

    let lifecycle = runtime.usecases().app_lifecycle();
    tauri::async_runtime::spawn(async move {
        match lifecycle.start(&bindings).await {
            Ok(active) => info!(hotkeys = ?active, "Clipnest ready"),
            Err(e) => error!(error = %e, "Failed to start clipboard capture"),
        }
    });

    Ok(runtime)
}

fn handle_run_event(app_handle: &AppHandle<Wry>, event: RunEvent) {
    match event {
        RunEvent::WindowEvent {
            label,
            event: WindowEvent::CloseRequested { api, .. },
            ..
        } if label == PANEL_WINDOW_LABEL => {
            // The panel lives for the whole session; closing it only hides it.
            api.prevent_close();
            if let Some(runtime) = app_handle.try_state::<Arc<AppRuntime>>() {
                let panel = runtime.panel().clone();
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = panel.hide_panel().await {
                        warn!(error = %e, "Failed to hide panel on close request");
                    }
                });
            }
        }
        RunEvent::Exit => {
            if let Some(runtime) = app_handle.try_state::<Arc<AppRuntime>>() {
                let lifecycle = runtime.usecases().app_lifecycle();
                tauri::async_runtime::block_on(lifecycle.shutdown());
            }
        }
        _ => {}
    }
}

//! Panel window commands
//! 面板窗口命令

use std::sync::Arc;

use tauri::State;

use super::error::or_fallback;
use crate::bootstrap::AppRuntime;

#[tauri::command]
pub async fn show_panel(runtime: State<'_, Arc<AppRuntime>>) -> Result<bool, String> {
    let result = runtime.panel().show_panel().await.map(|()| true);
    Ok(or_fallback("show_panel", result, false))
}

#[tauri::command]
pub async fn hide_panel(runtime: State<'_, Arc<AppRuntime>>) -> Result<bool, String> {
    let result = runtime.panel().hide_panel().await.map(|()| true);
    Ok(or_fallback("hide_panel", result, false))
}

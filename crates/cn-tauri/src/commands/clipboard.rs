//! Clipboard history Tauri commands
//! 剪贴板历史相关的 Tauri 命令

use std::sync::Arc;

use cn_core::EntryId;
use tauri::State;

use super::dto::{ClipboardItemDto, ClipboardItemUpdateDto, ClipboardStatsDto};
use super::error::or_fallback;
use crate::bootstrap::AppRuntime;

const DEFAULT_LIMIT: usize = 50;

fn to_dtos(entries: Vec<cn_core::ClipboardEntry>) -> Vec<ClipboardItemDto> {
    entries.into_iter().map(ClipboardItemDto::from).collect()
}

/// Get clipboard history entries in listing order
/// 获取剪贴板历史条目
#[tauri::command]
pub async fn get_clipboard_items(
    runtime: State<'_, Arc<AppRuntime>>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<ClipboardItemDto>, String> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let offset = offset.unwrap_or(0);
    tracing::debug!(limit, offset, "get_clipboard_items");

    let result = runtime.history().list(limit, offset).await.map(to_dtos);
    Ok(or_fallback("get_clipboard_items", result, Vec::new()))
}

/// Store text as if it had been copied. Returns the entry id.
#[tauri::command]
pub async fn save_clipboard_item(
    runtime: State<'_, Arc<AppRuntime>>,
    content: String,
) -> Result<Option<i64>, String> {
    let result = runtime
        .history()
        .save(&content)
        .await
        .map(|id| Some(id.value()));
    Ok(or_fallback("save_clipboard_item", result, None))
}

#[tauri::command]
pub async fn delete_clipboard_item(
    runtime: State<'_, Arc<AppRuntime>>,
    id: i64,
) -> Result<bool, String> {
    let result = runtime.history().delete(EntryId::new(id)).await;
    Ok(or_fallback("delete_clipboard_item", result, false))
}

#[tauri::command]
pub async fn update_clipboard_item(
    runtime: State<'_, Arc<AppRuntime>>,
    id: i64,
    updates: ClipboardItemUpdateDto,
) -> Result<bool, String> {
    let result = runtime
        .history()
        .update(EntryId::new(id), updates.into())
        .await;
    Ok(or_fallback("update_clipboard_item", result, false))
}

#[tauri::command]
pub async fn search_clipboard_items(
    runtime: State<'_, Arc<AppRuntime>>,
    query: String,
    limit: Option<usize>,
) -> Result<Vec<ClipboardItemDto>, String> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let result = runtime.history().search(&query, limit).await.map(to_dtos);
    Ok(or_fallback("search_clipboard_items", result, Vec::new()))
}

#[tauri::command]
pub async fn get_favorite_clipboard_items(
    runtime: State<'_, Arc<AppRuntime>>,
) -> Result<Vec<ClipboardItemDto>, String> {
    let result = runtime.history().get_favorites().await.map(to_dtos);
    Ok(or_fallback("get_favorite_clipboard_items", result, Vec::new()))
}

#[tauri::command]
pub async fn get_clipboard_stats(
    runtime: State<'_, Arc<AppRuntime>>,
) -> Result<ClipboardStatsDto, String> {
    let result = runtime
        .history()
        .get_stats()
        .await
        .map(ClipboardStatsDto::from);
    Ok(or_fallback(
        "get_clipboard_stats",
        result,
        ClipboardStatsDto::default(),
    ))
}

#[tauri::command]
pub async fn clear_all_clipboard_items(
    runtime: State<'_, Arc<AppRuntime>>,
) -> Result<bool, String> {
    let result = runtime.history().clear_all().await;
    Ok(or_fallback("clear_all_clipboard_items", result, false))
}

/// Write an entry back to the system clipboard and hide the panel
/// 将条目写回系统剪贴板并隐藏面板
#[tauri::command]
pub async fn paste_clipboard_item(
    runtime: State<'_, Arc<AppRuntime>>,
    id: i64,
) -> Result<bool, String> {
    let uc = runtime.usecases().paste_history_entry();
    let result = uc.execute(EntryId::new(id)).await;
    Ok(or_fallback("paste_clipboard_item", result, false))
}

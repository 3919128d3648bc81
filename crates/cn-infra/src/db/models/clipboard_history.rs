use diesel::prelude::*;

use crate::db::schema::clipboard_history;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clipboard_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardHistoryRow {
    pub id: i64,
    pub content: String,
    pub content_hash: String,
    pub preview: String,
    pub is_favorite: bool,
    pub is_pinned: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub used_count: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = clipboard_history)]
pub struct NewClipboardHistoryRow {
    pub content: String,
    pub content_hash: String,
    pub preview: String,
    pub is_favorite: bool,
    pub is_pinned: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub used_count: i64,
}

/// `None` columns are left untouched by the UPDATE.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = clipboard_history)]
pub struct ClipboardHistoryChangeset {
    pub content: Option<String>,
    pub content_hash: Option<String>,
    pub preview: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
    pub updated_at: Option<i64>,
}

use anyhow::Result;
use async_trait::async_trait;
use cn_core::clipboard::ordering::matches_query;
use cn_core::ports::ClipboardHistoryRepositoryPort;
use cn_core::{
    ClipboardEntry, ContentHash, EntryChanges, EntryId, HistoryStats, NewClipboardEntry,
};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::executor::DieselSqliteExecutor;
use crate::db::mappers::ClipboardHistoryRowMapper;
use crate::db::models::{ClipboardHistoryChangeset, ClipboardHistoryRow, NewClipboardHistoryRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::clipboard_history;

const LIKE_ESCAPE: char = '\\';

/// SQLite history backend, ready to wire.
pub type SqliteHistoryRepository = DieselHistoryRepository<
    DieselSqliteExecutor,
    ClipboardHistoryRowMapper,
    ClipboardHistoryRowMapper,
    ClipboardHistoryRowMapper,
>;

impl SqliteHistoryRepository {
    pub fn with_executor(executor: DieselSqliteExecutor) -> Self {
        Self::new(
            executor,
            ClipboardHistoryRowMapper,
            ClipboardHistoryRowMapper,
            ClipboardHistoryRowMapper,
        )
    }
}

/// History backend on SQLite through diesel.
///
/// 基于 diesel 的 SQLite 历史后端。
///
/// Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT`; `clear` also resets the
/// table's `sqlite_sequence` row so allocation restarts at 1.
pub struct DieselHistoryRepository<E, NM, CM, RM> {
    executor: E,
    new_mapper: NM,
    changes_mapper: CM,
    row_mapper: RM,
}

impl<E, NM, CM, RM> DieselHistoryRepository<E, NM, CM, RM> {
    pub fn new(executor: E, new_mapper: NM, changes_mapper: CM, row_mapper: RM) -> Self {
        Self {
            executor,
            new_mapper,
            changes_mapper,
            row_mapper,
        }
    }
}

impl<E, NM, CM, RM> DieselHistoryRepository<E, NM, CM, RM>
where
    RM: RowMapper<ClipboardHistoryRow, ClipboardEntry>,
{
    fn to_domain_all(&self, rows: &[ClipboardHistoryRow]) -> Result<Vec<ClipboardEntry>> {
        rows.iter().map(|row| self.row_mapper.to_domain(row)).collect()
    }
}

/// `%needle%` with LIKE wildcards escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl<E, NM, CM, RM> ClipboardHistoryRepositoryPort for DieselHistoryRepository<E, NM, CM, RM>
where
    E: DbExecutor,
    NM: InsertMapper<NewClipboardEntry, NewClipboardHistoryRow>,
    CM: InsertMapper<EntryChanges, ClipboardHistoryChangeset>,
    RM: RowMapper<ClipboardHistoryRow, ClipboardEntry>,
{
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardEntry>> {
        self.executor.run(|conn| {
            let row = clipboard_history::table
                .filter(clipboard_history::content_hash.eq(hash.as_str()))
                .select(ClipboardHistoryRow::as_select())
                .first(conn)
                .optional()?;

            row.map(|r| self.row_mapper.to_domain(&r)).transpose()
        })
    }

    async fn insert(&self, entry: NewClipboardEntry) -> Result<ClipboardEntry> {
        let new_row = self.new_mapper.to_row(&entry)?;
        self.executor.run(|conn| {
            let row = diesel::insert_into(clipboard_history::table)
                .values(&new_row)
                .returning(ClipboardHistoryRow::as_returning())
                .get_result(conn)?;

            self.row_mapper.to_domain(&row)
        })
    }

    async fn record_reuse(&self, id: EntryId, updated_at: i64) -> Result<Option<ClipboardEntry>> {
        self.executor.run(|conn| {
            let row = diesel::update(clipboard_history::table.find(id.value()))
                .set((
                    clipboard_history::used_count.eq(clipboard_history::used_count + 1_i64),
                    clipboard_history::updated_at.eq(updated_at),
                ))
                .returning(ClipboardHistoryRow::as_returning())
                .get_result(conn)
                .optional()?;

            row.map(|r| self.row_mapper.to_domain(&r)).transpose()
        })
    }

    async fn get(&self, id: EntryId) -> Result<Option<ClipboardEntry>> {
        self.executor.run(|conn| {
            let row = clipboard_history::table
                .find(id.value())
                .select(ClipboardHistoryRow::as_select())
                .first(conn)
                .optional()?;

            row.map(|r| self.row_mapper.to_domain(&r)).transpose()
        })
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardEntry>> {
        self.executor.run(|conn| {
            let rows = clipboard_history::table
                .order((
                    clipboard_history::is_pinned.desc(),
                    clipboard_history::created_at.desc(),
                    clipboard_history::id.desc(),
                ))
                .limit(limit as i64)
                .offset(offset as i64)
                .select(ClipboardHistoryRow::as_select())
                .load(conn)?;

            self.to_domain_all(&rows)
        })
    }

    async fn update(&self, id: EntryId, changes: &EntryChanges) -> Result<bool> {
        let changeset = self.changes_mapper.to_row(changes)?;
        self.executor.run(|conn| {
            let affected = diesel::update(clipboard_history::table.find(id.value()))
                .set(&changeset)
                .execute(conn)?;
            Ok(affected > 0)
        })
    }

    async fn delete(&self, id: EntryId) -> Result<bool> {
        self.executor.run(|conn| {
            let affected =
                diesel::delete(clipboard_history::table.find(id.value())).execute(conn)?;
            Ok(affected > 0)
        })
    }

    /// SQLite `LIKE` folds ASCII case only, so non-ASCII queries are matched
    /// in Rust over the ranked rows.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ClipboardEntry>> {
        let ranking = (
            clipboard_history::used_count.desc(),
            clipboard_history::created_at.desc(),
            clipboard_history::id.desc(),
        );

        if query.is_ascii() {
            let pattern = like_pattern(query);
            return self.executor.run(|conn| {
                let mut statement = clipboard_history::table
                    .select(ClipboardHistoryRow::as_select())
                    .into_boxed::<Sqlite>();
                if !query.is_empty() {
                    statement = statement.filter(
                        clipboard_history::content
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE)
                            .or(clipboard_history::preview
                                .like(pattern.clone())
                                .escape(LIKE_ESCAPE)),
                    );
                }
                let rows = statement.order(ranking).limit(limit as i64).load(conn)?;

                self.to_domain_all(&rows)
            });
        }

        let needle = query.to_lowercase();
        self.executor.run(|conn| {
            let rows = clipboard_history::table
                .order(ranking)
                .select(ClipboardHistoryRow::as_select())
                .load(conn)?;

            let mut matched = Vec::new();
            for row in &rows {
                if matched.len() == limit {
                    break;
                }
                let entry = self.row_mapper.to_domain(row)?;
                if matches_query(&entry, &needle) {
                    matched.push(entry);
                }
            }
            Ok(matched)
        })
    }

    async fn list_favorites(&self) -> Result<Vec<ClipboardEntry>> {
        self.executor.run(|conn| {
            let rows = clipboard_history::table
                .filter(clipboard_history::is_favorite.eq(true))
                .order((
                    clipboard_history::created_at.desc(),
                    clipboard_history::id.desc(),
                ))
                .select(ClipboardHistoryRow::as_select())
                .load(conn)?;

            self.to_domain_all(&rows)
        })
    }

    async fn stats(&self, today_start_ms: i64) -> Result<HistoryStats> {
        self.executor.run(|conn| {
            let total: i64 = clipboard_history::table.count().get_result(conn)?;
            let favorites: i64 = clipboard_history::table
                .filter(clipboard_history::is_favorite.eq(true))
                .count()
                .get_result(conn)?;
            let today: i64 = clipboard_history::table
                .filter(clipboard_history::created_at.ge(today_start_ms))
                .count()
                .get_result(conn)?;

            Ok(HistoryStats {
                total: total.max(0) as u64,
                favorites: favorites.max(0) as u64,
                today: today.max(0) as u64,
            })
        })
    }

    async fn clear(&self) -> Result<()> {
        self.executor.run(|conn| {
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(clipboard_history::table).execute(conn)?;
                diesel::sql_query("DELETE FROM sqlite_sequence WHERE name = 'clipboard_history'")
                    .execute(conn)?;
                Ok(())
            })
        })
    }
}

use anyhow::{Context, Result};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pooled SQLite connections backing the history table.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_URL: &str = ":memory:";
const MAX_CONNECTIONS: u32 = 4;

/// Per-connection SQLite settings.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Open the history database and bring its schema up to date.
///
/// 打开历史数据库并执行未完成的迁移。
///
/// `":memory:"` gets a single-connection pool, since every SQLite connection
/// to `:memory:` opens its own private database.
pub fn init_db_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let max_size = if database_url == IN_MEMORY_URL {
        1
    } else {
        MAX_CONNECTIONS
    };

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .with_context(|| format!("Failed to create database pool: {database_url}"))?;

    run_migrations(&pool)?;

    Ok(pool)
}

fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("history schema migration failed: {e}"))?;
    info!(count = applied.len(), "history schema is up to date");

    Ok(())
}

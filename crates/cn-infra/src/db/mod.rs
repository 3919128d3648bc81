pub mod executor;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod ports;
pub mod repositories;
pub mod schema;

pub use executor::DieselSqliteExecutor;
pub use mappers::ClipboardHistoryRowMapper;
pub use pool::{init_db_pool, DbPool};
pub use repositories::{DieselHistoryRepository, SqliteHistoryRepository};

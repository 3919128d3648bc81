use std::sync::Arc;

use anyhow::Context;
use diesel::SqliteConnection;

use crate::db::pool::DbPool;
use crate::db::ports::DbExecutor;

/// Runs history queries on a connection checked out of the shared pool.
#[derive(Clone)]
pub struct DieselSqliteExecutor {
    pool: Arc<DbPool>,
}

impl DieselSqliteExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

impl DbExecutor for DieselSqliteExecutor {
    fn run<T>(
        &self,
        work: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut conn = self
            .pool
            .get()
            .context("no history database connection available")?;
        work(&mut conn)
    }
}

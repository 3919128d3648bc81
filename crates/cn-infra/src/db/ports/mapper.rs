use anyhow::Result;

/// Domain value → row written to the database.
pub trait InsertMapper<D, R>: Sync + Send {
    fn to_row(&self, domain: &D) -> Result<R>;
}

/// Row read from the database → domain value.
pub trait RowMapper<R, D>: Sync + Send {
    fn to_domain(&self, row: &R) -> Result<D>;
}

use crate::{Query, Result};
use async_trait::async_trait;
use lifeos_core::Row;

/// Row-level access to the remote generic tables.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Append one row and return the created row(s) as the store reports them.
    async fn insert(&self, table: &str, row: &Row) -> Result<Vec<Row>>;

    /// Rows of `table` matching `query`, in the order the store returns them.
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>>;
}

use crate::*;
use chrono::NaiveDateTime;

/// Store defines the data-access seam the benchmark runs against.
///
/// One connection, one logical thread of control. Transactions are opened
/// and closed explicitly by the caller, so implementations only need to
/// honor `begin`/`commit` on the connection they already hold.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Create the table and its index if absent.
    async fn create(&self, table: &Table) -> Result<()>;
    /// Remove every row from the table.
    async fn delete(&self, table: &Table) -> Result<()>;
    async fn begin(&self, table: &Table) -> Result<()>;
    async fn commit(&self, table: &Table) -> Result<()>;
    /// Insert a single row. A row whose id is already present yields
    /// [`Error::Duplicate`] and leaves the open transaction usable.
    async fn insert(&self, table: &Table, row: &Row) -> Result<()>;
    /// Up to `limit` birth dates strictly after `after`, newest first.
    async fn select(
        &self,
        table: &Table,
        after: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<NaiveDateTime>>;
    async fn count(&self, table: &Table) -> Result<usize>;
}

#[async_trait::async_trait]
impl<S> Store for std::sync::Arc<S>
where
    S: Store + ?Sized,
{
    async fn create(&self, table: &Table) -> Result<()> {
        self.as_ref().create(table).await
    }
    async fn delete(&self, table: &Table) -> Result<()> {
        self.as_ref().delete(table).await
    }
    async fn begin(&self, table: &Table) -> Result<()> {
        self.as_ref().begin(table).await
    }
    async fn commit(&self, table: &Table) -> Result<()> {
        self.as_ref().commit(table).await
    }
    async fn insert(&self, table: &Table, row: &Row) -> Result<()> {
        self.as_ref().insert(table, row).await
    }
    async fn select(
        &self,
        table: &Table,
        after: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<NaiveDateTime>> {
        self.as_ref().select(table, after, limit).await
    }
    async fn count(&self, table: &Table) -> Result<usize> {
        self.as_ref().count(table).await
    }
}

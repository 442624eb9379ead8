use crate::*;
use chrono::NaiveDateTime;

/// Outcome of loading one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Load {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Sequences schema setup, deletes, batched loads and range queries over
/// the benchmarked tables, timing each phase.
///
/// Every phase returns its error instead of aborting; the caller decides
/// whether a failure ends the run.
pub struct Runner<S> {
    store: S,
    config: Config,
    tables: Vec<Table>,
}

impl<S> Runner<S>
where
    S: Store,
{
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            tables: Table::all().to_vec(),
        }
    }
    /// Restrict the run to a subset of tables, kept in the given order.
    pub fn tables(mut self, tables: impl IntoIterator<Item = Table>) -> Self {
        self.tables = tables.into_iter().collect();
        self
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load mode: schema, delete every table, load every table.
    pub async fn create(&self) -> Result<Report> {
        let mut report = Report::default();
        self.schema().await?;
        for table in self.tables.iter().copied() {
            report.time(Phase::Delete, table, self.delete(&table)).await?;
        }
        for table in self.tables.iter().copied() {
            let load = report.time(Phase::Insert, table, self.insert(&table)).await?;
            log::info!(
                "loaded {} ({} inserted, {} duplicates)",
                table,
                load.inserted,
                load.duplicates
            );
            if self.config.verify {
                self.verify(&table).await?;
            }
        }
        Ok(report)
    }

    /// Query mode: one bounded range query per table.
    pub async fn query(&self) -> Result<Report> {
        let mut report = Report::default();
        for table in self.tables.iter().copied() {
            if self.config.verify {
                self.verify(&table).await?;
            }
            let dates = report.time(Phase::Select, table, self.select(&table)).await?;
            log::info!("selected {} rows from {}", dates.len(), table);
        }
        Ok(report)
    }

    /// Create each table and its index if absent.
    pub async fn schema(&self) -> Result<()> {
        for table in self.tables.iter() {
            log::info!("creating table ({})", table);
            self.store.create(table).await?;
        }
        Ok(())
    }

    pub async fn delete(&self, table: &Table) -> Result<()> {
        log::info!("deleting rows ({})", table);
        self.store.delete(table).await
    }

    /// Insert the configured rows in transactions of `batch` rows.
    ///
    /// A duplicate id is logged and skipped; any other failure is returned
    /// with the transaction left open.
    pub async fn insert(&self, table: &Table) -> Result<Load> {
        log::info!("inserting {} rows ({})", self.config.rows, table);
        let batch = self.config.batch;
        if batch == 0 {
            return Err(Error::Load {
                table: table.name(),
                reason: "batch size must be at least one row",
            });
        }
        if self.config.rows as u64 > MAX_ROWS {
            return Err(Error::Load {
                table: table.name(),
                reason: "row ids would overflow INTEGER",
            });
        }
        let mut load = Load::default();
        let mut open = false;
        for (i, row) in Rows::from(&self.config).enumerate() {
            if i % batch == 0 {
                log::info!("{}", i);
                if open {
                    self.store.commit(table).await?;
                }
                self.store.begin(table).await?;
                open = true;
            }
            match self.store.insert(table, &row).await {
                Ok(()) => load.inserted += 1,
                Err(e) if e.is_duplicate() => {
                    log::warn!("duplicate {}", row.id);
                    load.duplicates += 1;
                }
                Err(e) => return Err(e),
            }
        }
        if open {
            self.store.commit(table).await?;
        }
        Ok(load)
    }

    /// Up to `limit` birth dates past the threshold, newest first.
    pub async fn select(&self, table: &Table) -> Result<Vec<NaiveDateTime>> {
        log::info!("selecting rows ({})", table);
        self.store
            .select(table, self.config.threshold, self.config.limit)
            .await
    }

    /// Fail unless the table holds exactly the configured row count.
    pub async fn verify(&self, table: &Table) -> Result<()> {
        let expected = self.config.rows;
        match self.store.count(table).await? {
            actual if actual == expected => Ok(()),
            actual => Err(Error::Count {
                table: table.name(),
                expected,
                actual,
            }),
        }
    }
}

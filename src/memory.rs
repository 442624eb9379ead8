//! In-process [`Store`] backed by ordered maps.
//!
//! Mirrors the relational semantics the benchmark relies on (unique ids,
//! ordered range scans, counts) and additionally keeps a ledger of
//! transaction boundaries so batch sizes can be inspected after a load.
use crate::*;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Ledger {
    open: Option<&'static str>,
    pending: usize,
    peak: usize,
    commits: usize,
}

#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<BTreeMap<&'static str, BTreeMap<i32, NaiveDateTime>>>,
    ledger: Mutex<Ledger>,
    fault: Option<i32>,
}

impl Memory {
    /// A store whose insert of `id` fails with a non-duplicate error.
    pub fn faulty(id: i32) -> Self {
        Self {
            fault: Some(id),
            ..Self::default()
        }
    }
    /// Largest number of insert attempts, duplicates included, made inside
    /// a single transaction.
    pub fn peak(&self) -> usize {
        self.ledger.lock().expect("ledger lock").peak
    }
    pub fn commits(&self) -> usize {
        self.ledger.lock().expect("ledger lock").commits
    }
    pub fn is_open(&self) -> bool {
        self.ledger.lock().expect("ledger lock").open.is_some()
    }
    pub fn exists(&self, table: &Table) -> bool {
        self.tables
            .lock()
            .expect("tables lock")
            .contains_key(table.name())
    }

    fn missing(table: &Table) -> Source {
        format!("relation \"{}\" does not exist", table.name()).into()
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn create(&self, table: &Table) -> Result<()> {
        self.tables
            .lock()
            .expect("tables lock")
            .entry(table.name())
            .or_default();
        Ok(())
    }
    async fn delete(&self, table: &Table) -> Result<()> {
        self.tables
            .lock()
            .expect("tables lock")
            .get_mut(table.name())
            .map(BTreeMap::clear)
            .ok_or_else(|| Error::Delete {
                table: table.name(),
                source: Self::missing(table),
            })
    }
    async fn begin(&self, table: &Table) -> Result<()> {
        let mut ledger = self.ledger.lock().expect("ledger lock");
        match ledger.open {
            Some(_) => Err(Error::Transaction {
                table: table.name(),
                source: "transaction already open".into(),
            }),
            None => {
                ledger.open = Some(table.name());
                ledger.pending = 0;
                Ok(())
            }
        }
    }
    async fn commit(&self, table: &Table) -> Result<()> {
        let mut ledger = self.ledger.lock().expect("ledger lock");
        match ledger.open.take() {
            None => Err(Error::Transaction {
                table: table.name(),
                source: "no transaction open".into(),
            }),
            Some(_) => {
                ledger.commits += 1;
                ledger.pending = 0;
                Ok(())
            }
        }
    }
    async fn insert(&self, table: &Table, row: &Row) -> Result<()> {
        if self.fault == Some(row.id) {
            return Err(Error::Insert {
                table: table.name(),
                id: row.id,
                source: "injected fault".into(),
            });
        }
        let mut tables = self.tables.lock().expect("tables lock");
        let rows = tables.get_mut(table.name()).ok_or_else(|| Error::Insert {
            table: table.name(),
            id: row.id,
            source: Self::missing(table),
        })?;
        let mut ledger = self.ledger.lock().expect("ledger lock");
        if ledger.open.is_some() {
            ledger.pending += 1;
            ledger.peak = ledger.peak.max(ledger.pending);
        }
        if rows.contains_key(&row.id) {
            return Err(Error::Duplicate {
                table: table.name(),
                id: row.id,
            });
        }
        rows.insert(row.id, row.birth);
        Ok(())
    }
    async fn select(
        &self,
        table: &Table,
        after: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<NaiveDateTime>> {
        let tables = self.tables.lock().expect("tables lock");
        let rows = tables.get(table.name()).ok_or_else(|| Error::Query {
            table: table.name(),
            source: Self::missing(table),
        })?;
        let mut dates = rows
            .values()
            .copied()
            .filter(|date| *date > after)
            .collect::<Vec<_>>();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.truncate(limit);
        Ok(dates)
    }
    async fn count(&self, table: &Table) -> Result<usize> {
        self.tables
            .lock()
            .expect("tables lock")
            .get(table.name())
            .map(BTreeMap::len)
            .ok_or_else(|| Error::Query {
                table: table.name(),
                source: Self::missing(table),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn row(id: i32, minutes: i64) -> Row {
        Row {
            id,
            birth: Config::default().epoch + TimeDelta::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn unique_ids_are_enforced() {
        let store = Memory::default();
        let table = Table::from(Index::Hash);
        store.create(&table).await.unwrap();
        store.insert(&table, &row(1, 1)).await.unwrap();
        let err = store.insert(&table, &row(1, 2)).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.count(&table).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let store = Memory::default();
        let table = Table::from(Index::None);
        assert!(!store.exists(&table));
        store.create(&table).await.unwrap();
        store.insert(&table, &row(0, 1)).await.unwrap();
        store.create(&table).await.unwrap();
        assert!(store.exists(&table));
        assert_eq!(store.count(&table).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_table_is_an_error() {
        let store = Memory::default();
        let table = Table::from(Index::Btree);
        assert_eq!(store.delete(&table).await.unwrap_err().kind(), Kind::Delete);
        assert_eq!(store.count(&table).await.unwrap_err().kind(), Kind::Query);
        assert_eq!(
            store.insert(&table, &row(0, 1)).await.unwrap_err().kind(),
            Kind::Insert
        );
    }

    #[tokio::test]
    async fn nested_begin_is_rejected() {
        let store = Memory::default();
        let table = Table::from(Index::None);
        store.begin(&table).await.unwrap();
        assert_eq!(
            store.begin(&table).await.unwrap_err().kind(),
            Kind::Transaction
        );
        store.commit(&table).await.unwrap();
        assert_eq!(
            store.commit(&table).await.unwrap_err().kind(),
            Kind::Transaction
        );
        assert_eq!(store.commits(), 1);
    }

    #[tokio::test]
    async fn select_filters_orders_and_limits() {
        let store = Memory::default();
        let table = Table::from(Index::Btree);
        store.create(&table).await.unwrap();
        for i in 0..10 {
            store.insert(&table, &row(i, i as i64 + 1)).await.unwrap();
        }
        let after = Config::default().epoch + TimeDelta::minutes(4);
        let dates = store.select(&table, after, 3).await.unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], Config::default().epoch + TimeDelta::minutes(10));
        assert!(dates.windows(2).all(|w| w[0] > w[1]));
        assert!(dates.iter().all(|d| *d > after));
    }
}

use const_format::concatcp;
use std::fmt::Display;
use std::fmt::Formatter;

/// Identity column, declared `UNIQUE` in every table.
#[rustfmt::skip]
pub const ID:    &str = "id";
/// Timestamp column carrying the secondary index, if any.
#[rustfmt::skip]
pub const BIRTH: &str = "birth_date";

#[rustfmt::skip]
const COLUMNS: &str = concatcp!("(", ID, " INTEGER UNIQUE, ", BIRTH, " TIMESTAMP)");

/// Table with no secondary index.
#[rustfmt::skip]
pub const NO_INDEX:    &str = "users_no_index";
/// Table with a hash index on `birth_date`.
#[rustfmt::skip]
pub const HASH_INDEX:  &str = "users_hash_index";
/// Table with a btree index on `birth_date`.
#[rustfmt::skip]
pub const BTREE_INDEX: &str = "users_btree_index";

/// Secondary index declared on `birth_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Index {
    #[value(name = "no-index")]
    None,
    Hash,
    Btree,
}

impl Index {
    pub const fn all() -> [Self; 3] {
        [Self::None, Self::Hash, Self::Btree]
    }
    fn method(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Hash => Some("HASH"),
            Self::Btree => Some("BTREE"),
        }
    }
}

/// A benchmarked relation. The three tables share columns and differ only
/// in their [`Index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table {
    name: &'static str,
    index: Index,
}

impl Table {
    /// The benchmarked tables in reporting order.
    pub const fn all() -> [Self; 3] {
        [
            Self::from(Index::None),
            Self::from(Index::Hash),
            Self::from(Index::Btree),
        ]
    }
    pub const fn from(index: Index) -> Self {
        let name = match index {
            Index::None => NO_INDEX,
            Index::Hash => HASH_INDEX,
            Index::Btree => BTREE_INDEX,
        };
        Self { name, index }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn index(&self) -> Index {
        self.index
    }
    /// Fixed-width label used in timing reports.
    pub fn label(&self) -> &'static str {
        match self.index {
            Index::None => "No Index   ",
            Index::Hash => "Hash Index ",
            Index::Btree => "Btree Index",
        }
    }

    /// Idempotent DDL for the table and its index.
    pub fn creates(&self) -> String {
        let table = format!("CREATE TABLE IF NOT EXISTS {} {};", self.name, COLUMNS);
        match self.index.method() {
            None => table,
            Some(method) => format!(
                "{table}
                 CREATE INDEX IF NOT EXISTS {t}_{c}_{m} ON {t} USING {method} ({c});",
                t = self.name,
                c = BIRTH,
                m = method.to_lowercase(),
            ),
        }
    }
    pub fn deletes(&self) -> String {
        format!("DELETE FROM {}", self.name)
    }
    /// Conflicting ids affect zero rows instead of aborting the transaction.
    pub fn inserts(&self) -> String {
        format!(
            "INSERT INTO {t} ({i}, {b}) VALUES ($1, $2) ON CONFLICT ({i}) DO NOTHING",
            t = self.name,
            i = ID,
            b = BIRTH,
        )
    }
    pub fn selects(&self) -> String {
        format!(
            "SELECT   {b} \
             FROM     {t} \
             WHERE    {b} > $1 \
             ORDER BY {b} DESC \
             LIMIT    $2",
            t = self.name,
            b = BIRTH,
        )
    }
    pub fn counts(&self) -> String {
        format!("SELECT COUNT({}) FROM {}", ID, self.name)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_in_reporting_order() {
        let names = Table::all().map(|t| t.name());
        assert_eq!(names, [NO_INDEX, HASH_INDEX, BTREE_INDEX]);
        let indices = Table::all().map(|t| t.index());
        assert_eq!(indices, Index::all());
    }

    #[test]
    fn only_indexed_tables_declare_an_index() {
        let [none, hash, btree] = Table::all().map(|t| t.creates());
        assert!(none.starts_with("CREATE TABLE IF NOT EXISTS users_no_index"));
        assert!(!none.contains("CREATE INDEX"));
        assert!(hash.contains("CREATE INDEX IF NOT EXISTS users_hash_index_birth_date_hash"));
        assert!(hash.contains("USING HASH (birth_date)"));
        assert!(btree.contains("USING BTREE (birth_date)"));
    }

    #[test]
    fn columns_are_shared() {
        for table in Table::all() {
            assert!(table.creates().contains("(id INTEGER UNIQUE, birth_date TIMESTAMP)"));
        }
    }

    #[test]
    fn range_query_is_ordered_and_bounded() {
        let sql = Table::from(Index::Btree).selects();
        assert!(sql.contains("WHERE    birth_date > $1"));
        assert!(sql.contains("ORDER BY birth_date DESC"));
        assert!(sql.ends_with("LIMIT    $2"));
    }

    #[test]
    fn labels_align() {
        assert!(Table::all().iter().all(|t| t.label().len() == 11));
    }
}

use thiserror::Error;

/// Underlying driver or backend failure.
pub type Source = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures a benchmark phase can surface.
///
/// Only [`Error::Duplicate`] is recoverable; the insert loop skips the row
/// and keeps going. Everything else ends the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("could not connect to database: {0}")]
    Connect(#[source] Source),
    #[error("could not create table {table}: {source}")]
    Schema { table: &'static str, source: Source },
    #[error("could not delete from {table}: {source}")]
    Delete { table: &'static str, source: Source },
    #[error("transaction failed on {table}: {source}")]
    Transaction { table: &'static str, source: Source },
    #[error("cannot load {table}: {reason}")]
    Load {
        table: &'static str,
        reason: &'static str,
    },
    #[error("duplicate id {id} in {table}")]
    Duplicate { table: &'static str, id: i32 },
    #[error("insert error on {table} at id {id}: {source}")]
    Insert {
        table: &'static str,
        id: i32,
        source: Source,
    },
    #[error("range query on {table} failed: {source}")]
    Query { table: &'static str, source: Source },
    #[error("expected {expected} rows in {table}, found {actual}")]
    Count {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Coarse classification of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Connect,
    Schema,
    Delete,
    Transaction,
    Load,
    Duplicate,
    Insert,
    Query,
    Count,
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Connect(_) => Kind::Connect,
            Self::Schema { .. } => Kind::Schema,
            Self::Delete { .. } => Kind::Delete,
            Self::Transaction { .. } => Kind::Transaction,
            Self::Load { .. } => Kind::Load,
            Self::Duplicate { .. } => Kind::Duplicate,
            Self::Insert { .. } => Kind::Insert,
            Self::Query { .. } => Kind::Query,
            Self::Count { .. } => Kind::Count,
        }
    }
    pub fn is_duplicate(&self) -> bool {
        self.kind() == Kind::Duplicate
    }
}

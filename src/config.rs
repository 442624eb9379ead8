use crate::*;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;

/// Parameters for a single benchmark run.
///
/// Defaults come from the compiled-in constants at the crate root;
/// the command line may override the load and query sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rows loaded into each table.
    pub rows: usize,
    /// Rows per transaction.
    pub batch: usize,
    /// Maximum rows returned by a range query.
    pub limit: usize,
    /// Increment between consecutive `birth_date` values.
    pub step: TimeDelta,
    /// Row `i` is dated `epoch + (i + 1) * step`.
    pub epoch: NaiveDateTime,
    /// Range queries match `birth_date > threshold`.
    pub threshold: NaiveDateTime,
    /// Assert `COUNT(*) == rows` after loading and before querying.
    pub verify: bool,
}

impl Config {
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
    pub fn batch(mut self, batch: usize) -> Self {
        self.batch = batch;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
    pub fn epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }
    pub fn threshold(mut self, threshold: NaiveDateTime) -> Self {
        self.threshold = threshold;
        self
    }
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            batch: BATCH_SIZE,
            limit: SELECT_LIMIT,
            step: TimeDelta::minutes(STEP_MINUTES),
            epoch: midnight(EPOCH_DATE),
            threshold: midnight(THRESHOLD_DATE),
            verify: false,
        }
    }
}

fn midnight((y, m, d): (i32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid calendar constant")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.rows, 5_000_000);
        assert_eq!(config.batch, 10_000);
        assert_eq!(config.limit, 10_000);
        assert_eq!(config.step, TimeDelta::minutes(1));
        assert_eq!(config.epoch.to_string(), "0001-01-01 00:00:00");
        assert!(config.threshold > config.epoch);
        assert!(!config.verify);
    }

    #[test]
    fn batch_is_taken_verbatim() {
        assert_eq!(Config::default().batch(250).batch, 250);
    }
}

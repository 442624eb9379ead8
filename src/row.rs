use crate::*;
use chrono::NaiveDateTime;
use chrono::TimeDelta;

/// One synthetic record: an identity and a birth timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row {
    pub id: i32,
    pub birth: NaiveDateTime,
}

/// Deterministic row generator.
///
/// Yields `count` rows with ids `0..count`; each row's birth date is one
/// `step` past the previous one, starting one `step` past `epoch`.
#[derive(Debug, Clone)]
pub struct Rows {
    next: usize,
    count: usize,
    date: NaiveDateTime,
    step: TimeDelta,
}

impl Rows {
    pub fn new(count: usize, epoch: NaiveDateTime, step: TimeDelta) -> Self {
        Self {
            next: 0,
            count,
            date: epoch,
            step,
        }
    }
}

impl From<&Config> for Rows {
    fn from(config: &Config) -> Self {
        Self::new(config.rows, config.epoch, config.step)
    }
}

impl Iterator for Rows {
    type Item = Row;
    fn next(&mut self) -> Option<Row> {
        if self.next >= self.count {
            return None;
        }
        let id = i32::try_from(self.next).expect("row ids fit in INTEGER");
        self.next += 1;
        self.date += self.step;
        Some(Row {
            id,
            birth: self.date,
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Rows {}

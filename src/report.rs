use crate::*;
use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;
use std::time::Instant;

/// A timed benchmark operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Insert,
    Delete,
    Select,
}

impl Phase {
    /// Reporting order.
    pub const fn all() -> [Self; 3] {
        [Self::Insert, Self::Delete, Self::Select]
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert => write!(f, "Insert"),
            Self::Delete => write!(f, "Delete"),
            Self::Select => write!(f, "Select"),
        }
    }
}

/// Wall-clock time of one phase on one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    pub phase: Phase,
    pub table: Table,
    pub elapsed: Duration,
}

/// Timings collected over a run, printed grouped by phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report(Vec<Lap>);

impl Report {
    pub fn laps(&self) -> &[Lap] {
        &self.0
    }
    pub fn record(&mut self, phase: Phase, table: Table, elapsed: Duration) {
        log::debug!("{} {} took {:?}", phase, table, elapsed);
        self.0.push(Lap {
            phase,
            table,
            elapsed,
        });
    }
    /// Times `f`, records the lap, and passes its output through.
    pub async fn time<T, F>(&mut self, phase: Phase, table: Table, f: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let output = f.await?;
        self.record(phase, table, start.elapsed());
        Ok(output)
    }
    pub fn elapsed(&self, phase: Phase, table: &Table) -> Option<Duration> {
        self.0
            .iter()
            .find(|lap| lap.phase == phase && lap.table == *table)
            .map(|lap| lap.elapsed)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for phase in Phase::all() {
            let laps = Table::all()
                .into_iter()
                .filter_map(|table| self.elapsed(phase, &table).map(|dt| (table, dt)))
                .collect::<Vec<_>>();
            if laps.is_empty() {
                continue;
            }
            writeln!(f, "{} Execution time:", phase)?;
            for (table, elapsed) in laps {
                writeln!(f, "{}: {:.6}", table.label(), elapsed.as_secs_f64())?;
            }
        }
        Ok(())
    }
}

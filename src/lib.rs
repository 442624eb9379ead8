//! Index throughput benchmark.
//!
//! Loads, deletes and range-queries the same synthetic rows across three
//! tables that differ only in the secondary index on `birth_date`, and
//! reports wall-clock time per phase per table.
pub mod config;
pub mod error;
pub mod memory;
#[cfg(feature = "database")]
pub mod mode;
#[cfg(feature = "database")]
pub mod postgres;
pub mod report;
pub mod row;
pub mod runner;
pub mod store;
pub mod table;

pub use config::*;
pub use error::*;
pub use memory::*;
#[cfg(feature = "database")]
pub use mode::*;
#[cfg(feature = "database")]
pub use postgres::*;
pub use report::*;
pub use row::*;
pub use runner::*;
pub use store::*;
pub use table::*;

// ============================================================================
// LOAD PARAMETERS
// ============================================================================
/// Rows loaded into each table per `create` run.
pub const ROW_COUNT: usize = 5_000_000;
/// Rows per transaction before commit.
pub const BATCH_SIZE: usize = 10_000;
/// Largest loadable row count; ids `0..MAX_ROWS` must fit in `INTEGER`.
pub const MAX_ROWS: u64 = i32::MAX as u64 + 1;
/// Minutes added to `birth_date` per generated row.
pub const STEP_MINUTES: i64 = 1;
/// First `birth_date` is one step past this (year, month, day).
pub const EPOCH_DATE: (i32, u32, u32) = (1, 1, 1);

// ============================================================================
// RANGE QUERY PARAMETERS
// ============================================================================
/// Upper bound on rows fetched by a single range query.
pub const SELECT_LIMIT: usize = 10_000;
/// Range queries match `birth_date` strictly after this (year, month, day).
pub const THRESHOLD_DATE: (i32, u32, u32) = (5, 1, 1);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Route progress checkpoints and phase timings to the terminal at INFO and
/// to `logs/<unix-seconds>.log` at DEBUG, one file per benchmark run.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

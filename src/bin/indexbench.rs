//! Index Benchmark Binary
//!
//! `indexbench create` loads every table and reports insert/delete times;
//! `indexbench select` reports range query times. Connects via `DB_URL`.

use indexbench::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    log();
    if let Err(e) = Cli::run().await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

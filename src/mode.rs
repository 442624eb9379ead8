//! Benchmark mode selection from command line arguments.
use crate::*;
use anyhow::Context;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
    #[arg(
        long,
        global = true,
        default_value_t = ROW_COUNT as u64,
        value_parser = clap::value_parser!(u64).range(..=MAX_ROWS),
        help = "Rows loaded per table"
    )]
    rows: u64,
    #[arg(
        long,
        global = true,
        default_value_t = BATCH_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Rows per transaction"
    )]
    batch: u64,
    #[arg(long, global = true, default_value_t = SELECT_LIMIT, help = "Rows per range query")]
    limit: usize,
    #[arg(long, global = true, help = "Check row counts against --rows")]
    verify: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[command(about = "Create tables, clear them, bulk-load and print timings")]
    Create,
    #[command(about = "Run range queries and print timings")]
    Select {
        #[arg(long, value_enum, help = "Query a single table")]
        only: Option<Index>,
    },
}

impl Cli {
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }
    pub fn config(&self) -> Config {
        Config::default()
            .rows(self.rows as usize)
            .batch(self.batch as usize)
            .limit(self.limit)
            .verify(self.verify)
    }

    pub async fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let Some(mode) = cli.mode() else {
            println!("Please enter arguments: create|select");
            return Ok(());
        };
        let client = db().await?;
        let runner = Runner::new(client, cli.config());
        let report = match mode {
            Mode::Create => runner.create().await.context("create")?,
            Mode::Select { only: None } => runner.query().await.context("select")?,
            Mode::Select { only: Some(index) } => runner
                .tables([Table::from(index)])
                .query()
                .await
                .context("select")?,
        };
        print!("{}", report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("indexbench").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn no_arguments_selects_no_mode() {
        assert_eq!(parse(&[]).mode(), None);
    }

    #[test]
    fn create_uses_compiled_defaults() {
        let cli = parse(&["create"]);
        assert_eq!(cli.mode(), Some(Mode::Create));
        assert_eq!(cli.config(), Config::default());
    }

    #[test]
    fn select_can_target_one_table() {
        let cli = parse(&["select", "--only", "btree"]);
        assert_eq!(
            cli.mode(),
            Some(Mode::Select {
                only: Some(Index::Btree)
            })
        );
        let cli = parse(&["select", "--only", "no-index"]);
        assert_eq!(
            cli.mode(),
            Some(Mode::Select {
                only: Some(Index::None)
            })
        );
    }

    #[test]
    fn overrides_flow_into_config() {
        let cli = parse(&["create", "--rows", "3", "--batch", "2", "--verify"]);
        let config = cli.config();
        assert_eq!(config.rows, 3);
        assert_eq!(config.batch, 2);
        assert!(config.verify);
    }

    #[test]
    fn rows_are_bounded_by_integer_ids() {
        let cli = parse(&["create", "--rows", "2147483648"]);
        assert_eq!(cli.config().rows as u64, MAX_ROWS);
        let args = ["indexbench", "create", "--rows", "2147483649"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn zero_batch_is_rejected() {
        let args = ["indexbench", "create", "--batch", "0"];
        assert!(Cli::try_parse_from(args).is_err());
        assert_eq!(parse(&["create", "--batch", "1"]).config().batch, 1);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let args = ["indexbench", "update"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}

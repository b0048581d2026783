//! Operator utility for sweeping the tables of a PostgreSQL schema.
//!
//! Connects to a database whose credentials live in AWS Secrets Manager,
//! enumerates the tables of one schema, and either lists or drops them.
//! Per-table drop failures are isolated and reported; they do not abort
//! the run.

use clap::{Args, Parser, Subcommand};
use tablesweep_core::{
    init_logging, ActionOutcome, AwsSecretStore, RunSummary, SweepConfig, TableAction,
};
use tracing::error;

#[derive(Parser)]
#[command(name = "tablesweep")]
#[command(about = "List or drop the tables of a PostgreSQL schema")]
#[command(version)]
#[command(long_about = "
tablesweep - schema sweep utility

Resolves database credentials from AWS Secrets Manager, enumerates the
tables of one schema in lexicographic order, and applies an action to
each:

  list    print every table name
  drop    issue DROP TABLE IF EXISTS .. CASCADE per table

A failed drop of one table is reported and the sweep continues with the
next table. The process exits non-zero only when the run itself fails
(secret resolution, connection, or catalog query) - or, with
'drop --strict', when any per-table drop failed.

EXAMPLES:
  tablesweep --secret-name prod/appdb --region us-east-1 list
  tablesweep --secret-name prod/appdb --region us-east-1 drop --strict
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,

    /// Credential secret name
    #[arg(
        long,
        env = "TABLESWEEP_SECRET_NAME",
        help = "Name of the credential secret in AWS Secrets Manager"
    )]
    pub secret_name: String,

    /// Secret store region
    #[arg(long, env = "AWS_REGION", help = "AWS region holding the secret")]
    pub region: String,

    /// Target schema
    #[arg(
        long,
        default_value = "public",
        help = "Schema whose tables are enumerated"
    )]
    pub schema: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the tables in the schema
    List,
    /// Drop every table in the schema (conditional, cascading)
    Drop(DropArgs),
}

#[derive(Args)]
pub struct DropArgs {
    /// Treat per-table failures as a run failure
    #[arg(
        long,
        help = "Exit with a non-zero status when any per-table drop failed"
    )]
    pub strict: bool,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let (action, strict) = match &cli.command {
        Command::List => (TableAction::List, false),
        Command::Drop(args) => (TableAction::Drop, args.strict),
    };

    let config =
        SweepConfig::new(&cli.secret_name, &cli.region, action).with_schema(&cli.schema);
    let store = AwsSecretStore::for_region(&config.region).await;

    let summary = tablesweep_core::run(&config, &store).await.map_err(|e| {
        error!("Sweep failed: {}", e);
        e
    })?;

    report_summary(&summary);

    if strict && !summary.is_clean() {
        std::process::exit(2);
    }

    Ok(())
}

/// Prints the per-table summary to stdout.
fn report_summary(summary: &RunSummary) {
    match summary.action {
        TableAction::List => {
            println!("Tables in the database:");
            for outcome in &summary.outcomes {
                println!("{}", outcome.table());
            }
        }
        TableAction::Drop => {
            for outcome in &summary.outcomes {
                match outcome {
                    ActionOutcome::Succeeded { table } => {
                        println!("Dropped table {}", table);
                    }
                    ActionOutcome::Failed { table, reason } => {
                        println!("Failed to drop table {}: {}", table, reason);
                    }
                }
            }
        }
    }

    println!(
        "{}: {} tables, {} failures",
        summary.action,
        summary.table_count(),
        summary.failure_count()
    );
}

//! Pipeline orchestration: resolve, connect, enumerate, apply.
//!
//! Control flow is strictly sequential with no feedback loop; each stage
//! depends only on the previous stage's output. No timeouts or
//! cancellation are imposed, so a hung I/O call blocks the run — a
//! documented limitation, not a policy this module adds silently.

use crate::config::SweepConfig;
use crate::executor;
use crate::models::{RunSummary, TableAction};
use crate::secrets::{self, SecretStore};
use crate::session::{DatabaseSession, PostgresSession};
use crate::Result;

/// Runs the full sweep pipeline against PostgreSQL.
///
/// Resolves credentials from `store`, opens a single session, enumerates
/// the configured schema, and applies the configured action to each table.
/// The session is closed exactly once on every exit path past the
/// connect stage.
///
/// # Errors
/// Returns the fatal error of whichever stage failed first: secret
/// resolution, connection, or catalog enumeration. Per-table action
/// failures are not errors; they are reported in the returned summary.
pub async fn run(config: &SweepConfig, store: &dyn SecretStore) -> Result<RunSummary> {
    config.validate()?;

    tracing::info!(
        "Starting sweep: action={}, schema='{}'",
        config.action,
        config.schema
    );

    let bundle = secrets::resolve(store, &config.secret_name).await?;
    let session = PostgresSession::connect(&bundle).await?;

    run_scoped(&session, &config.schema, config.action).await
}

/// Runs enumeration and action execution within a session scope.
///
/// The session is closed exactly once whether enumeration succeeds or
/// fails; this is the scoped-release guarantee around the only shared
/// resource of a run.
///
/// # Errors
/// Propagates the enumeration failure, after the session is closed.
pub async fn run_scoped(
    session: &dyn DatabaseSession,
    schema: &str,
    action: TableAction,
) -> Result<RunSummary> {
    let result = sweep(session, schema, action).await;
    session.close().await;
    result
}

async fn sweep(
    session: &dyn DatabaseSession,
    schema: &str,
    action: TableAction,
) -> Result<RunSummary> {
    let tables = session.list_tables(schema).await?;
    Ok(executor::apply(session, tables, action).await)
}

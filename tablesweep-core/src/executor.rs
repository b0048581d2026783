//! Applies the chosen action to each enumerated table.
//!
//! This is the one place with branching and error-isolation logic: a
//! destructive bulk operation over an enumerated set must not let one
//! unit's failure block the rest, and the caller receives an outcome per
//! unit rather than a single all-or-nothing result.

use crate::models::{ActionOutcome, RunSummary, TableAction, TableName};
use crate::session::DatabaseSession;

/// Applies `action` to each table in enumeration order.
///
/// Stateless sequential loop over an already-fixed sequence; no step
/// depends on a prior outcome. A per-table failure is recorded and the
/// loop continues, so the returned outcomes always cover the full input
/// sequence in the same order.
///
/// The `List` action never contacts the database again: enumeration
/// already produced the names.
pub async fn apply(
    session: &dyn DatabaseSession,
    tables: Vec<TableName>,
    action: TableAction,
) -> RunSummary {
    let mut outcomes = Vec::with_capacity(tables.len());

    for table in tables {
        let outcome = match action {
            TableAction::List => ActionOutcome::Succeeded { table },
            TableAction::Drop => drop_one(session, table).await,
        };
        outcomes.push(outcome);
    }

    RunSummary { action, outcomes }
}

async fn drop_one(session: &dyn DatabaseSession, table: TableName) -> ActionOutcome {
    tracing::info!("Dropping table: {}", table);

    match session.drop_table(&table).await {
        Ok(()) => {
            tracing::info!("Table {} dropped", table);
            ActionOutcome::Succeeded { table }
        }
        Err(e) => {
            tracing::warn!("Failed to drop table {}: {}", table, e);
            ActionOutcome::Failed {
                table,
                reason: e.to_string(),
            }
        }
    }
}

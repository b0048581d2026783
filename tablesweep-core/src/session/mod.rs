//! Database session abstraction.
//!
//! [`DatabaseSession`] is the minimal capability interface the pipeline
//! needs from the database: enumerate the catalog, drop one table, close.
//! The object-safe design lets tests substitute in-memory fakes; the
//! production implementation is [`postgres::PostgresSession`].

use crate::models::TableName;
use crate::Result;
use async_trait::async_trait;
use thiserror::Error;

pub mod postgres;

pub use postgres::PostgresSession;

/// Failure of a single table action.
///
/// Unlike [`crate::error::SweepError`], this is recoverable: the executor
/// records it against the table and moves on to the next one.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TableActionError {
    message: String,
}

impl TableActionError {
    /// Wraps an underlying failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An open handle to one database, bound to one credential bundle.
///
/// Exactly one session exists per run. The pipeline's scoped runner
/// guarantees [`close`](DatabaseSession::close) is awaited exactly once on
/// every exit path, including enumeration and action failures.
#[async_trait]
pub trait DatabaseSession: Send + Sync {
    /// Enumerates the tables of one schema, lexicographically ordered.
    ///
    /// An empty schema yields an empty sequence, not an error.
    ///
    /// # Errors
    /// Returns [`crate::error::SweepError::CatalogQuery`] when the
    /// introspection query cannot be executed.
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableName>>;

    /// Issues a cascading conditional drop for one table.
    ///
    /// Dropping an absent table is not an error (the statement is
    /// conditional), so repeating a sweep over an already-emptied schema
    /// succeeds.
    ///
    /// # Errors
    /// Returns a [`TableActionError`] the executor isolates to this table.
    async fn drop_table(&self, table: &TableName) -> std::result::Result<(), TableActionError>;

    /// Releases the session.
    async fn close(&self);
}

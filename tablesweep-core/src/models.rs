//! Core data types shared across the sweep pipeline.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Database credentials resolved from the secret store.
///
/// Produced once per run by secret resolution and consumed by the session
/// layer. The bundle is zeroized on drop and its `Debug` output masks the
/// password; it is never serialized, persisted, or logged.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialBundle {
    /// Database host address
    pub host: String,
    /// Database port
    pub port: u16,
    /// Role to authenticate as
    pub username: String,
    /// Password for the role
    pub password: String,
    /// Database name to connect to
    pub database: String,
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"****")
            .field("database", &self.database)
            .finish()
    }
}

impl std::fmt::Display for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Intentionally omits username and password
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

/// An opaque table identifier produced by catalog enumeration.
///
/// The enumerated sequence is fixed once the catalog query returns; later
/// per-table failures never re-trigger enumeration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableName(String);

impl TableName {
    /// Wraps a raw catalog name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the raw name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The action applied to each enumerated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Record each table name for output; no further database contact
    List,
    /// Issue a cascading conditional drop per table
    Drop,
}

impl std::fmt::Display for TableAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Per-table result of applying an action.
///
/// A `Failed` outcome is isolated to its table; it never aborts the
/// remaining sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action completed for this table
    Succeeded {
        /// Table the action was applied to
        table: TableName,
    },
    /// The action failed for this table; the run continued
    Failed {
        /// Table the action was applied to
        table: TableName,
        /// Underlying failure message
        reason: String,
    },
}

impl ActionOutcome {
    /// The table this outcome belongs to.
    pub fn table(&self) -> &TableName {
        match self {
            Self::Succeeded { table } | Self::Failed { table, .. } => table,
        }
    }

    /// True when the action completed for this table.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Aggregated result of one pipeline run.
///
/// Outcomes appear in enumeration order, one per table.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Action that was applied
    pub action: TableAction,
    /// Per-table outcomes in enumeration order
    pub outcomes: Vec<ActionOutcome>,
}

impl RunSummary {
    /// Number of tables the action was applied to.
    pub fn table_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of per-table failures.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// True when every outcome succeeded (vacuously true for zero tables).
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

//! Core library for tablesweep.
//!
//! Implements the credential-resolution-then-schema-operation pipeline:
//! fetch a secret, open a database session from it, enumerate the schema's
//! tables, and apply an action (list or drop) to each with per-table fault
//! isolation.
//!
//! # Architecture
//! - Secret store and database clients sit behind object-safe traits
//!   ([`SecretStore`], [`DatabaseSession`]) so tests run against fakes.
//! - Fatal errors unwind to the binary; per-table failures become outcome
//!   records and never abort the run.
//! - Credentials are zeroized on drop and never logged or serialized.

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod secrets;
pub mod session;

// Re-export commonly used types
pub use config::SweepConfig;
pub use error::{Result, SweepError};
pub use logging::init_logging;
pub use models::{ActionOutcome, CredentialBundle, RunSummary, TableAction, TableName};
pub use pipeline::run;
pub use secrets::{AwsSecretStore, SecretPayload, SecretStore};
pub use session::{DatabaseSession, PostgresSession, TableActionError};

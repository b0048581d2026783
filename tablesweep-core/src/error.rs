//! Error types for the sweep pipeline.
//!
//! Fatal errors carry the stage that produced them plus the underlying
//! cause; per-table drop failures are not errors at all, they become
//! [`crate::models::ActionOutcome::Failed`] records inside the executor.
//! Credential material (passwords, secret payloads) never appears in any
//! error message.

use thiserror::Error;

/// Main error type for tablesweep operations.
///
/// Every variant here is run-fatal: it aborts the pipeline before any
/// further table action is attempted. Per-table failures are isolated at
/// the item boundary and reported through the run summary instead.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Secret service unreachable or the named secret does not exist
    #[error("Secret unavailable: {context}")]
    SecretUnavailable {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Retrieved secret payload could not be decoded into credentials
    #[error("Secret payload invalid: {context}")]
    SecretFormatInvalid { context: String },

    /// Database session could not be established (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Catalog introspection query could not be executed
    #[error("Catalog query failed: {context}")]
    CatalogQuery {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with SweepError
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Creates a secret-unavailable error with context
    pub fn secret_unavailable<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SecretUnavailable {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a secret-format error.
    ///
    /// The payload itself is never included, only a description of what
    /// failed to decode.
    pub fn secret_format_invalid(context: impl Into<String>) -> Self {
        Self::SecretFormatInvalid {
            context: context.into(),
        }
    }

    /// Creates a connection error with sanitized context
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a catalog query error with context
    pub fn catalog_query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CatalogQuery {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_error_messages_name_the_stage() {
        let error = SweepError::secret_unavailable("secret 'prod/db' lookup", Boom);
        assert!(error.to_string().contains("Secret unavailable"));
        assert!(error.to_string().contains("prod/db"));

        let error = SweepError::connection_failed("opening session to host db.internal", Boom);
        assert!(error.to_string().contains("Database connection failed"));

        let error = SweepError::catalog_query_failed("listing tables in schema 'public'", Boom);
        assert!(error.to_string().contains("Catalog query failed"));
    }

    #[test]
    fn test_error_source_is_preserved() {
        let error = SweepError::connection_failed("opening session", Boom);
        let source = std::error::Error::source(&error).expect("source should be attached");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_format_error_has_no_source() {
        let error = SweepError::secret_format_invalid("payload is not valid JSON");
        assert!(std::error::Error::source(&error).is_none());
        assert!(error.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_configuration_error() {
        let error = SweepError::configuration("secret name cannot be empty");
        assert!(error.to_string().contains("secret name cannot be empty"));
    }
}

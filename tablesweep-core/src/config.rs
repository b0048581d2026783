//! Run configuration passed into the pipeline entry point.

use crate::models::TableAction;
use crate::Result;

/// Configuration for one sweep run.
///
/// Replaces the fixed secret-name/region constants of earlier revisions
/// with an explicit structure the binary builds from flags and
/// environment variables.
///
/// # Example
/// ```rust
/// use tablesweep_core::{SweepConfig, TableAction};
///
/// let config = SweepConfig::new("prod/appdb", "us-east-1", TableAction::List);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.schema, "public");
/// ```
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Name of the credential secret in the secret store
    pub secret_name: String,
    /// Secret store region
    pub region: String,
    /// Schema whose tables are enumerated
    pub schema: String,
    /// Action applied to each enumerated table
    pub action: TableAction,
}

impl SweepConfig {
    /// Creates a configuration targeting the `public` schema.
    pub fn new(
        secret_name: impl Into<String>,
        region: impl Into<String>,
        action: TableAction,
    ) -> Self {
        Self {
            secret_name: secret_name.into(),
            region: region.into(),
            schema: "public".to_string(),
            action,
        }
    }

    /// Overrides the target schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Validates configuration values.
    ///
    /// # Errors
    /// Returns a configuration error when any required value is empty.
    pub fn validate(&self) -> Result<()> {
        if self.secret_name.is_empty() {
            return Err(crate::error::SweepError::configuration(
                "secret name cannot be empty",
            ));
        }

        if self.region.is_empty() {
            return Err(crate::error::SweepError::configuration(
                "region cannot be empty",
            ));
        }

        if self.schema.is_empty() {
            return Err(crate::error::SweepError::configuration(
                "schema cannot be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_public_schema() {
        let config = SweepConfig::new("prod/appdb", "us-east-1", TableAction::List);
        assert_eq!(config.schema, "public");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_schema_override() {
        let config =
            SweepConfig::new("prod/appdb", "us-east-1", TableAction::Drop).with_schema("staging");
        assert_eq!(config.schema, "staging");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(SweepConfig::new("", "us-east-1", TableAction::List)
            .validate()
            .is_err());
        assert!(SweepConfig::new("prod/appdb", "", TableAction::List)
            .validate()
            .is_err());
        assert!(SweepConfig::new("prod/appdb", "us-east-1", TableAction::List)
            .with_schema("")
            .validate()
            .is_err());
    }
}

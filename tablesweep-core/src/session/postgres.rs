//! PostgreSQL session implementation.

use super::{DatabaseSession, TableActionError};
use crate::error::SweepError;
use crate::models::{CredentialBundle, TableName};
use crate::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// A single scoped PostgreSQL session.
///
/// Backed by a pool capped at one connection so the run's
/// exactly-one-session invariant holds. Connection options are built from
/// the credential bundle field by field; the password never transits a
/// printable connection URL. No statement or connection timeouts are
/// configured: a hung I/O call blocks the run, which is a known limitation
/// of this tool rather than a policy it papers over.
pub struct PostgresSession {
    pool: PgPool,
}

impl PostgresSession {
    /// Opens a session from a resolved credential bundle.
    ///
    /// The connection is established eagerly; on return the session is
    /// fully usable, never partially initialized.
    ///
    /// # Errors
    /// Returns [`SweepError::Connection`] carrying the transport error
    /// when a session cannot be established (auth failure, unreachable
    /// host, wrong port).
    pub async fn connect(bundle: &CredentialBundle) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&bundle.host)
            .port(bundle.port)
            .username(&bundle.username)
            .password(&bundle.password)
            .database(&bundle.database)
            .application_name(concat!("tablesweep-", env!("CARGO_PKG_VERSION")));

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                SweepError::connection_failed(format!("opening session to {}", bundle), e)
            })?;

        tracing::info!("Connected to {}", bundle);
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseSession for PostgresSession {
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableName>> {
        tracing::debug!("Enumerating tables in schema '{}'", schema);

        let names = sqlx::query_scalar::<_, String>(
            "SELECT table_name \
             FROM information_schema.tables \
             WHERE table_schema = $1 \
             ORDER BY table_name",
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            let context = if is_privilege_error(&e) {
                format!(
                    "insufficient privileges to read the table catalog of schema '{}'",
                    schema
                )
            } else {
                format!("listing tables in schema '{}'", schema)
            };
            SweepError::catalog_query_failed(context, e)
        })?;

        tracing::info!("Found {} tables in schema '{}'", names.len(), schema);
        Ok(names.into_iter().map(TableName::from).collect())
    }

    async fn drop_table(&self, table: &TableName) -> std::result::Result<(), TableActionError> {
        let statement = format!("DROP TABLE IF EXISTS {} CASCADE", quote_ident(table.as_str()));

        sqlx::query(&statement)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| TableActionError::new(e.to_string()))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database session closed");
    }
}

fn is_privilege_error(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("42501"))
}

/// Quotes a catalog identifier for use in a DDL statement.
///
/// Identifiers cannot be bound as parameters; embedded double quotes are
/// doubled per the SQL standard.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn test_quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_quote_ident_preserves_case_and_spaces() {
        assert_eq!(quote_ident("Order Items"), "\"Order Items\"");
    }

    #[test]
    fn test_drop_statement_shape() {
        let statement = format!("DROP TABLE IF EXISTS {} CASCADE", quote_ident("events"));
        assert_eq!(statement, "DROP TABLE IF EXISTS \"events\" CASCADE");
    }
}

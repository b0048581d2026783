//! AWS Secrets Manager implementation of the secret store.

use super::{SecretPayload, SecretStore};
use crate::error::SweepError;
use crate::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::Client;

/// Secret store backed by AWS Secrets Manager.
///
/// Holds a configured SDK client; one lookup is made per run and nothing
/// is cached across invocations.
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    /// Builds a store for the given region using the ambient AWS
    /// credential chain (environment, profile, instance role).
    pub async fn for_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&config),
        }
    }

    /// Wraps an already-configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn fetch(&self, secret_name: &str) -> Result<SecretPayload> {
        tracing::debug!("Fetching secret '{}' from Secrets Manager", secret_name);

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| {
                SweepError::secret_unavailable(format!("retrieving secret '{}'", secret_name), e)
            })?;

        Ok(SecretPayload {
            text: output.secret_string().map(str::to_string),
            binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
        })
    }
}

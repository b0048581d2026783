//! Secret resolution: fetch a named credential bundle and decode it.
//!
//! The store itself sits behind the [`SecretStore`] trait so tests can
//! substitute in-memory fakes; the production implementation is
//! [`aws::AwsSecretStore`]. Decoding tries the textual payload first and
//! falls back to the base64-encoded binary payload. There is no default
//! credential fallback and no caching across invocations.

use crate::error::SweepError;
use crate::models::CredentialBundle;
use crate::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub mod aws;

pub use aws::AwsSecretStore;

/// Raw payload returned by a secret store lookup.
///
/// Exactly one of the two fields is expected to be populated: `text` holds
/// UTF-8 structured text, `binary` holds base64 bytes wrapping the same.
/// Zeroized on drop; `Debug` never prints payload content.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretPayload {
    /// UTF-8 structured text payload, when the secret was stored as text
    pub text: Option<String>,
    /// Base64-encoded binary payload, when the secret was stored as binary
    pub binary: Option<Vec<u8>>,
}

impl std::fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretPayload")
            .field("text", &self.text.as_ref().map(|_| "****"))
            .field("binary", &self.binary.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Minimal capability interface over a remote secret store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches the named secret's raw payload.
    ///
    /// # Errors
    /// Returns [`SweepError::SecretUnavailable`] when the store is
    /// unreachable or the secret does not exist.
    async fn fetch(&self, secret_name: &str) -> Result<SecretPayload>;
}

/// Fetches and decodes a named credential bundle.
///
/// # Errors
/// Returns [`SweepError::SecretUnavailable`] when the fetch fails and
/// [`SweepError::SecretFormatInvalid`] when the payload cannot be decoded
/// into a [`CredentialBundle`]. Both are fatal for the run.
pub async fn resolve(store: &dyn SecretStore, secret_name: &str) -> Result<CredentialBundle> {
    tracing::debug!("Resolving secret '{}'", secret_name);
    let payload = store.fetch(secret_name).await?;
    let bundle = decode_payload(secret_name, &payload)?;
    tracing::info!("Resolved credentials for {}", bundle);
    Ok(bundle)
}

/// Decodes a raw payload into a credential bundle.
///
/// Textual payloads win over binary ones when both are present.
fn decode_payload(secret_name: &str, payload: &SecretPayload) -> Result<CredentialBundle> {
    if let Some(text) = payload.text.as_deref() {
        return parse_bundle(secret_name, text);
    }

    if let Some(binary) = payload.binary.as_deref() {
        let decoded = BASE64.decode(binary).map_err(|_| {
            SweepError::secret_format_invalid(format!(
                "secret '{}' binary payload is not valid base64",
                secret_name
            ))
        })?;
        let text = String::from_utf8(decoded).map_err(|_| {
            SweepError::secret_format_invalid(format!(
                "secret '{}' binary payload is not UTF-8 text",
                secret_name
            ))
        })?;
        return parse_bundle(secret_name, &text);
    }

    Err(SweepError::secret_format_invalid(format!(
        "secret '{}' has neither a text nor a binary payload",
        secret_name
    )))
}

fn parse_bundle(secret_name: &str, text: &str) -> Result<CredentialBundle> {
    // serde_json errors report positions and field names, never values
    serde_json::from_str(text).map_err(|e| {
        SweepError::secret_format_invalid(format!(
            "secret '{}' is not a credential document: {}",
            secret_name, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDS_JSON: &str =
        r#"{"host":"h","port":5432,"username":"u","password":"p","database":"d"}"#;

    fn text_payload(text: &str) -> SecretPayload {
        SecretPayload {
            text: Some(text.to_string()),
            binary: None,
        }
    }

    #[test]
    fn test_decode_text_payload() {
        let bundle = decode_payload("s", &text_payload(CREDS_JSON)).unwrap();
        assert_eq!(bundle.host, "h");
        assert_eq!(bundle.port, 5432);
        assert_eq!(bundle.username, "u");
        assert_eq!(bundle.password, "p");
        assert_eq!(bundle.database, "d");
    }

    #[test]
    fn test_decode_binary_payload_matches_text() {
        let payload = SecretPayload {
            text: None,
            binary: Some(BASE64.encode(CREDS_JSON).into_bytes()),
        };
        let from_binary = decode_payload("s", &payload).unwrap();
        let from_text = decode_payload("s", &text_payload(CREDS_JSON)).unwrap();

        assert_eq!(from_binary.host, from_text.host);
        assert_eq!(from_binary.port, from_text.port);
        assert_eq!(from_binary.username, from_text.username);
        assert_eq!(from_binary.password, from_text.password);
        assert_eq!(from_binary.database, from_text.database);
    }

    #[test]
    fn test_text_payload_wins_over_binary() {
        let other = r#"{"host":"x","port":1,"username":"x","password":"x","database":"x"}"#;
        let payload = SecretPayload {
            text: Some(CREDS_JSON.to_string()),
            binary: Some(BASE64.encode(other).into_bytes()),
        };
        let bundle = decode_payload("s", &payload).unwrap();
        assert_eq!(bundle.host, "h");
    }

    #[test]
    fn test_decode_rejects_non_json_text() {
        let err = decode_payload("s", &text_payload("not json")).unwrap_err();
        assert!(matches!(
            err,
            SweepError::SecretFormatInvalid { .. }
        ));
    }

    #[test]
    fn test_decode_rejects_missing_required_field() {
        let missing_port = r#"{"host":"h","username":"u","password":"p","database":"d"}"#;
        let err = decode_payload("s", &text_payload(missing_port)).unwrap_err();
        assert!(matches!(err, SweepError::SecretFormatInvalid { .. }));
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let payload = SecretPayload {
            text: None,
            binary: Some(b"%%not-base64%%".to_vec()),
        };
        let err = decode_payload("s", &payload).unwrap_err();
        assert!(matches!(err, SweepError::SecretFormatInvalid { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        let payload = SecretPayload {
            text: None,
            binary: None,
        };
        let err = decode_payload("s", &payload).unwrap_err();
        assert!(matches!(err, SweepError::SecretFormatInvalid { .. }));
    }

    #[test]
    fn test_payload_debug_masks_content() {
        let debug = format!("{:?}", text_payload(CREDS_JSON));
        assert!(!debug.contains("5432"));
        assert!(debug.contains("****"));
    }
}

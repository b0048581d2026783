//! Secret resolution tests against an in-memory store.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tablesweep_core::{secrets, SecretPayload, SecretStore, SweepError};

const CREDS_JSON: &str =
    r#"{"host":"db.internal","port":5432,"username":"app","password":"p","database":"appdb"}"#;

/// In-memory secret store; either returns a fixed payload or fails.
struct FakeStore {
    payload: Option<SecretPayload>,
}

#[async_trait]
impl SecretStore for FakeStore {
    async fn fetch(&self, secret_name: &str) -> tablesweep_core::Result<SecretPayload> {
        match &self.payload {
            Some(payload) => Ok(payload.clone()),
            None => Err(SweepError::secret_unavailable(
                format!("retrieving secret '{}'", secret_name),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such secret"),
            )),
        }
    }
}

#[tokio::test]
async fn resolves_text_payload() {
    let store = FakeStore {
        payload: Some(SecretPayload {
            text: Some(CREDS_JSON.to_string()),
            binary: None,
        }),
    };

    let bundle = secrets::resolve(&store, "prod/appdb").await.unwrap();
    assert_eq!(bundle.host, "db.internal");
    assert_eq!(bundle.port, 5432);
    assert_eq!(bundle.username, "app");
    assert_eq!(bundle.database, "appdb");
}

#[tokio::test]
async fn binary_payload_yields_identical_bundle() {
    let text_store = FakeStore {
        payload: Some(SecretPayload {
            text: Some(CREDS_JSON.to_string()),
            binary: None,
        }),
    };
    let binary_store = FakeStore {
        payload: Some(SecretPayload {
            text: None,
            binary: Some(BASE64.encode(CREDS_JSON).into_bytes()),
        }),
    };

    let from_text = secrets::resolve(&text_store, "prod/appdb").await.unwrap();
    let from_binary = secrets::resolve(&binary_store, "prod/appdb").await.unwrap();

    assert_eq!(from_text.host, from_binary.host);
    assert_eq!(from_text.port, from_binary.port);
    assert_eq!(from_text.username, from_binary.username);
    assert_eq!(from_text.password, from_binary.password);
    assert_eq!(from_text.database, from_binary.database);
}

#[tokio::test]
async fn unavailable_store_is_fatal() {
    let store = FakeStore { payload: None };

    let err = secrets::resolve(&store, "prod/appdb").await.unwrap_err();
    assert!(matches!(err, SweepError::SecretUnavailable { .. }));
    assert!(err.to_string().contains("prod/appdb"));
}

#[tokio::test]
async fn malformed_payload_is_fatal_with_no_fallback() {
    let store = FakeStore {
        payload: Some(SecretPayload {
            text: Some("{\"host\": 42}".to_string()),
            binary: None,
        }),
    };

    let err = secrets::resolve(&store, "prod/appdb").await.unwrap_err();
    assert!(matches!(err, SweepError::SecretFormatInvalid { .. }));
}

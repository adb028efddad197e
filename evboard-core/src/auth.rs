//! Identity-toolkit auth client.
//!
//! Talks to the Firebase identity-toolkit REST API. Two sign-in paths exist:
//! anonymous sign-up and custom-token exchange. Both return an [`Identity`]
//! carrying the opaque uid and the bearer token the store client needs.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{BoardError, BoardResult};

const BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Opaque per-session user handle issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub id_token: String,
}

/// Sign-in operations the session bootstrapper depends on.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in_anonymously(&self) -> BoardResult<Identity>;
    async fn sign_in_with_token(&self, token: &str) -> BoardResult<Identity>;
}

/// REST client for the identity-toolkit API.
pub struct AuthClient {
    client: reqwest::Client,
    api_key: String,
}

impl AuthClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        AuthClient {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn sign_in(&self, endpoint: &str, body: serde_json::Value) -> BoardResult<Identity> {
        let url = format!("{}/accounts:{}?key={}", BASE_URL, endpoint, self.api_key);

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read error body".to_string());
            return Err(BoardError::Http {
                status: status.as_u16(),
                message: extract_auth_error(&message),
            });
        }

        let signin: SignInResponse = response
            .json()
            .await
            .map_err(|e| BoardError::Auth(format!("Malformed sign-in response: {}", e)))?;

        Ok(Identity {
            uid: signin.local_id,
            id_token: signin.id_token,
        })
    }
}

#[async_trait]
impl AuthService for AuthClient {
    async fn sign_in_anonymously(&self) -> BoardResult<Identity> {
        self.sign_in("signUp", serde_json::json!({ "returnSecureToken": true }))
            .await
    }

    async fn sign_in_with_token(&self, token: &str) -> BoardResult<Identity> {
        self.sign_in(
            "signInWithCustomToken",
            serde_json::json!({ "token": token, "returnSecureToken": true }),
        )
        .await
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
}

#[derive(Deserialize)]
struct AuthErrorWrapper {
    error: AuthErrorBody,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    message: Option<String>,
}

/// Pull the short error code out of the API's JSON error envelope, falling
/// back to the raw body when it isn't the expected shape.
fn extract_auth_error(body: &str) -> String {
    serde_json::from_str::<AuthErrorWrapper>(body)
        .ok()
        .and_then(|w| w.error.message)
        .unwrap_or_else(|| body.to_string())
}

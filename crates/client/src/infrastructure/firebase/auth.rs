//! Firebase Auth REST client (Identity Toolkit `accounts:signUp`).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use userdesk_domain::UserId;

use super::{endpoint, AuthSession, SessionSlot};
use crate::ports::{AuthError, IdentityProvider};

#[derive(Clone)]
pub struct FirebaseAuthClient {
    client: Client,
    base_url: Url,
    api_key: String,
    session: SessionSlot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    id_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuthClient {
    pub fn new(
        client: Client,
        base_url: Url,
        api_key: impl Into<String>,
        session: SessionSlot,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionSlot {
        &self.session
    }
}

/// Map an Identity Toolkit error code to an `AuthError`.
///
/// Codes look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be at
/// least 6 characters`.
fn classify(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };
    match code {
        "EMAIL_EXISTS" => AuthError::EmailAlreadyInUse,
        "INVALID_EMAIL" => AuthError::InvalidEmail,
        "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::rejected(message),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    fn current_user_id(&self) -> Option<UserId> {
        self.session.user_id()
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let url = endpoint(&self.base_url, &["v1", "accounts:signUp"])
            .ok_or_else(|| AuthError::rejected("auth base URL cannot carry a path"))?;

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&SignUpRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(AuthError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(AuthError::network)?;
            let error = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => classify(&envelope.error.message),
                Err(_) => AuthError::rejected(format!("HTTP {status}: {body}")),
            };
            tracing::debug!(status = %status, error = %error, "Sign-up rejected");
            return Err(error);
        }

        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|e| AuthError::rejected(format!("unreadable sign-up response: {e}")))?;
        let user_id = UserId::new(body.local_id).map_err(AuthError::rejected)?;

        self.session.set(AuthSession {
            user_id: user_id.clone(),
            id_token: body.id_token,
        });
        Ok(user_id)
    }

    /// Firebase sessions are client-side; signing out drops the tokens.
    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.session.clear() {
            tracing::debug!(user_id = %session.user_id, "Session cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::infrastructure::firebase::http_client;

    fn client_for(server: &MockServer) -> FirebaseAuthClient {
        FirebaseAuthClient::new(
            http_client(Duration::from_secs(5)).unwrap(),
            Url::parse(&server.uri()).unwrap(),
            "test-key",
            SessionSlot::new(),
        )
    }

    #[test]
    fn classify_known_codes() {
        assert_eq!(classify("EMAIL_EXISTS"), AuthError::EmailAlreadyInUse);
        assert_eq!(classify("INVALID_EMAIL"), AuthError::InvalidEmail);
        assert_eq!(
            classify("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::TooManyAttempts
        );
        assert_eq!(
            classify("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword("Password should be at least 6 characters".into())
        );
        assert_eq!(
            classify("OPERATION_NOT_ALLOWED"),
            AuthError::Rejected("OPERATION_NOT_ALLOWED".into())
        );
    }

    #[tokio::test]
    async fn sign_up_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "email": "user@example.com",
                "password": "Abc12345!",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#SignupNewUserResponse",
                "idToken": "id-token",
                "email": "user@example.com",
                "refreshToken": "refresh-token",
                "expiresIn": "3600",
                "localId": "uid-42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = client_for(&server);
        let user_id = auth
            .create_account("user@example.com", "Abc12345!")
            .await
            .unwrap();

        assert_eq!(user_id.as_str(), "uid-42");
        assert_eq!(auth.current_user_id(), Some(user_id));
        assert_eq!(auth.session().id_token().as_deref(), Some("id-token"));
    }

    #[tokio::test]
    async fn sign_up_error_codes_are_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "EMAIL_EXISTS",
                    "errors": [{
                        "message": "EMAIL_EXISTS",
                        "domain": "global",
                        "reason": "invalid"
                    }]
                }
            })))
            .mount(&server)
            .await;

        let auth = client_for(&server);
        let err = auth
            .create_account("user@example.com", "Abc12345!")
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::EmailAlreadyInUse);
        assert!(auth.current_user_id().is_none());
    }

    #[tokio::test]
    async fn non_json_error_body_is_reported_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_account("user@example.com", "Abc12345!")
            .await
            .unwrap_err();

        match err {
            AuthError::Rejected(message) => {
                assert!(message.contains("502"));
                assert!(message.contains("bad gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_out_clears_session() {
        let server = MockServer::start().await;
        let auth = client_for(&server);
        auth.session().set(AuthSession {
            user_id: UserId::new("uid-1").unwrap(),
            id_token: "t".into(),
        });

        auth.sign_out().await.unwrap();

        assert!(auth.current_user_id().is_none());
        assert!(auth.session().id_token().is_none());
    }
}

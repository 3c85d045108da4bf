use crate::auth::config::FirebaseConfig;
use crate::auth::subscription::{AuthCallback, AuthStateHub, Subscription};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email and password held only for the duration of one sign-in attempt.
pub struct Credential {
    pub email: String,
    password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct SignedIn {
    pub principal_id: String,
    pub email: Option<String>,
    pub id_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Rejected by the provider; carries the provider's message, possibly empty.
    #[error("{0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Transport(String),
    /// The provider answered with something that is not an error report.
    #[error("malformed response from the authentication provider")]
    Unexpected,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, credential: &Credential) -> Result<SignedIn, AuthError>;

    /// Calls `callback` on sign-in, sign-out and initial resolution until the
    /// returned handle is dropped.
    fn subscribe_auth_state(&self, callback: AuthCallback) -> Subscription;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Email/password sign-in against the Identity Toolkit REST API.
///
/// A session authenticator owns an auth-state hub and publishes every
/// sign-in to it. A stateless one, shared by all HTTP requests, only
/// exchanges credentials; its subscriptions are never called.
#[derive(Clone)]
pub struct FirebaseAuthenticator {
    client: reqwest::Client,
    sign_in_url: String,
    api_key: String,
    hub: Option<AuthStateHub>,
}

impl FirebaseAuthenticator {
    pub fn new(cfg: &FirebaseConfig, client: reqwest::Client) -> Self {
        Self::build(cfg, client, Some(AuthStateHub::new()))
    }

    pub fn stateless(cfg: &FirebaseConfig, client: reqwest::Client) -> Self {
        Self::build(cfg, client, None)
    }

    fn build(cfg: &FirebaseConfig, client: reqwest::Client, hub: Option<AuthStateHub>) -> Self {
        Self {
            client,
            sign_in_url: format!(
                "{}/v1/accounts:signInWithPassword",
                cfg.identity_toolkit_url.trim_end_matches('/')
            ),
            api_key: cfg.api_key.clone(),
            hub,
        }
    }

    /// A session authenticator sharing this one's HTTP client, with its own hub.
    pub fn session(&self) -> Self {
        Self {
            hub: Some(AuthStateHub::new()),
            ..self.clone()
        }
    }

    /// Initial resolution of the auth state, e.g. from a restored session.
    pub fn restore_session(&self, principal_id: Option<String>) {
        self.publish(principal_id);
    }

    pub fn sign_out(&self) {
        info!("sign_out: clearing current principal");
        self.publish(None);
    }

    fn publish(&self, principal_id: Option<String>) {
        if let Some(hub) = &self.hub {
            hub.publish(principal_id);
        }
    }
}

#[async_trait]
impl Authenticator for FirebaseAuthenticator {
    async fn sign_in(&self, credential: &Credential) -> Result<SignedIn, AuthError> {
        let resp = self
            .client
            .post(&self.sign_in_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email: &credential.email,
                password: credential.password(),
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                warn!("sign_in: request for '{}' failed: {}", credential.email, e);
                AuthError::Transport(provider_message("NETWORK_REQUEST_FAILED"))
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|_| AuthError::Transport(provider_message("NETWORK_REQUEST_FAILED")))?;

        if !status.is_success() {
            let envelope: ErrorEnvelope =
                serde_json::from_str(&body).map_err(|_| AuthError::Unexpected)?;
            debug!(
                "sign_in: provider rejected '{}' with {}: {}",
                credential.email, status, envelope.error.message
            );
            return Err(AuthError::InvalidCredential(provider_message(
                &envelope.error.message,
            )));
        }

        let signed_in: SignInResponse =
            serde_json::from_str(&body).map_err(|_| AuthError::Unexpected)?;
        info!("sign_in: '{}' signed in", credential.email);
        self.publish(Some(signed_in.local_id.clone()));
        Ok(SignedIn {
            principal_id: signed_in.local_id,
            email: signed_in.email,
            id_token: signed_in.id_token,
        })
    }

    fn subscribe_auth_state(&self, callback: AuthCallback) -> Subscription {
        match &self.hub {
            Some(hub) => hub.subscribe(callback),
            None => Subscription::detached(),
        }
    }
}

/// Turns a provider error code such as `INVALID_LOGIN_CREDENTIALS` (optionally
/// followed by ` : detail`) into the message shown on the sign-in form, e.g.
/// `Firebase: Error (auth/invalid-credential).`. An empty code yields "".
pub fn provider_message(raw: &str) -> String {
    let code = raw.split(" : ").next().unwrap_or_default().trim();
    if code.is_empty() {
        return String::new();
    }
    let slug = match code {
        "INVALID_LOGIN_CREDENTIALS" => "invalid-credential".to_string(),
        "EMAIL_NOT_FOUND" => "user-not-found".to_string(),
        "INVALID_PASSWORD" => "wrong-password".to_string(),
        "USER_DISABLED" => "user-disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too-many-requests".to_string(),
        other => other.to_lowercase().replace('_', "-"),
    };
    format!("Firebase: Error (auth/{slug}).")
}

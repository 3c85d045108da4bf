use crate::auth::identity::{AuthError, Authenticator, Credential, SignedIn};
use crate::auth::probe::IdentityProbe;
use crate::shell::Route;
use log::{info, warn};
use std::sync::Arc;

pub const SIGN_IN_FALLBACK: &str = "Failed to login. Check your credentials.";

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SignInError {
    /// The credential exchange failed; the message is shown as-is.
    #[error("{0}")]
    InvalidCredential(String),
    #[error("Access denied. You are not an admin.")]
    AccessDenied,
    #[error("unexpected error happened")]
    Unexpected,
}

impl From<AuthError> for SignInError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredential(msg) | AuthError::Transport(msg) => {
                if msg.trim().is_empty() {
                    SignInError::InvalidCredential(SIGN_IN_FALLBACK.to_string())
                } else {
                    SignInError::InvalidCredential(msg)
                }
            }
            AuthError::Unexpected => SignInError::Unexpected,
        }
    }
}

/// Denied and failed attempts land back in `Idle` with an error set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInState {
    Idle,
    Submitting,
    Admitted,
}

pub struct SignInFlow {
    authenticator: Arc<dyn Authenticator>,
    probe: IdentityProbe,
    state: SignInState,
    loading: bool,
    error: Option<String>,
    navigation: Option<Route>,
}

impl SignInFlow {
    pub fn new(authenticator: Arc<dyn Authenticator>, probe: IdentityProbe) -> Self {
        Self {
            authenticator,
            probe,
            state: SignInState::Idle,
            loading: false,
            error: None,
            navigation: None,
        }
    }

    pub fn state(&self) -> SignInState {
        self.state
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pending navigation, consumed by the caller.
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    /// One attempt, no retries. The credential is dropped when this returns.
    pub async fn submit(&mut self, credential: Credential) -> Result<SignedIn, SignInError> {
        self.error = None;
        self.loading = true;
        self.state = SignInState::Submitting;

        let result = self.exchange(&credential).await;

        self.loading = false;
        match &result {
            Ok(_) => {
                self.state = SignInState::Admitted;
                self.navigation = Some(Route::Admin);
            }
            Err(e) => {
                self.state = SignInState::Idle;
                self.error = Some(e.to_string());
            }
        }
        result
    }

    async fn exchange(&self, credential: &Credential) -> Result<SignedIn, SignInError> {
        let signed_in = self
            .authenticator
            .sign_in(credential)
            .await
            .map_err(|e| {
                warn!("submit: sign-in failed for '{}': {}", credential.email, e);
                SignInError::from(e)
            })?;

        if self.probe.is_admin(&signed_in.principal_id).await {
            info!("submit: admitted '{}'", signed_in.principal_id);
            Ok(signed_in)
        } else {
            info!("submit: '{}' is not an admin", signed_in.principal_id);
            Err(SignInError::AccessDenied)
        }
    }
}

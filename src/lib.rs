#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod shell;
pub mod test_utils;
pub mod view;

use std::sync::Arc;

use crate::auth::{
    AuthLayer, Authenticator, ConfigError, FirebaseAuthenticator, FirebaseConfig,
    FirebaseTokenVerifier, IdentityProbe, JwksCache, TokenVerifier,
};
use crate::db::{DocumentStore, FirestoreClient, RegistrantOperations};
use crate::services::SignInFlow;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unable to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Handles shared by every request; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(cfg: &FirebaseConfig) -> Result<Self, StartupError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        info!(
            "Using Firebase project '{}' (auth domain '{}', app '{}')",
            cfg.project_id, cfg.auth_domain, cfg.app_id
        );

        let jwks = JwksCache::new(client.clone(), cfg.jwks_url.clone(), cfg.cache_ttl_secs);
        Ok(Self {
            // Shared by every request, so sign-ins are not published anywhere.
            authenticator: Arc::new(FirebaseAuthenticator::stateless(cfg, client.clone())),
            store: Arc::new(FirestoreClient::new(cfg, client)),
            verifier: Arc::new(FirebaseTokenVerifier::new(cfg, jwks)),
        })
    }

    pub fn from_parts(
        authenticator: Arc<dyn Authenticator>,
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            authenticator,
            store,
            verifier,
        }
    }

    pub fn registrant_ops(&self) -> RegistrantOperations {
        RegistrantOperations::new(self.store.clone())
    }

    /// Probe used by the admin view: looks the principal up by its `uid` field.
    pub fn admin_probe(&self) -> IdentityProbe {
        IdentityProbe::new(self.store.clone())
    }

    /// A fresh sign-in form; the probe reads the user document keyed by the principal id.
    pub fn sign_in_flow(&self) -> SignInFlow {
        SignInFlow::new(
            self.authenticator.clone(),
            IdentityProbe::by_document(self.store.clone()),
        )
    }

    pub fn auth_layer(&self) -> AuthLayer {
        AuthLayer::new(self.verifier.clone(), self.admin_probe())
    }
}

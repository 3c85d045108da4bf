use crate::auth::config::FirebaseConfig;
use crate::auth::jwks::JwksCache;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum FirebaseAuthError {
    #[error("token header error: {0}")]
    Header(String),
    #[error("jwks error: {0}")]
    Jwks(String),
    #[error("verification error: {0}")]
    Verify(String),
    #[error("claim mismatch: {0}")]
    Claim(String),
}

#[derive(Deserialize, Debug)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedToken {
    pub uid: String,
    pub email: Option<String>,
}

/// Checks a Bearer token and names the principal it was issued to.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, FirebaseAuthError>;
}

#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    project_id: String,
    issuer: String,
    leeway_secs: u64,
    jwks: JwksCache,
}

impl FirebaseTokenVerifier {
    pub fn new(cfg: &FirebaseConfig, jwks: JwksCache) -> Self {
        Self {
            project_id: cfg.project_id.clone(),
            issuer: cfg.token_issuer(),
            leeway_secs: cfg.leeway_secs,
            jwks,
        }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, FirebaseAuthError> {
        let header =
            decode_header(token).map_err(|e| FirebaseAuthError::Header(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| FirebaseAuthError::Header("kid missing".to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(FirebaseAuthError::Claim("alg must be RS256".to_string()));
        }

        let key = self
            .jwks
            .get_key(&kid)
            .await
            .map_err(|e| FirebaseAuthError::Jwks(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.leeway = self.leeway_secs;

        let claims = decode::<IdTokenClaims>(token, &key, &validation)
            .map_err(|e| FirebaseAuthError::Verify(e.to_string()))?
            .claims;

        if claims.sub.is_empty() {
            return Err(FirebaseAuthError::Claim("empty subject".to_string()));
        }

        Ok(VerifiedToken {
            uid: claims.sub,
            email: claims.email,
        })
    }
}

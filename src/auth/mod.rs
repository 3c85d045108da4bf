pub mod config;
pub mod extractors;
pub mod firebase;
pub mod identity;
pub mod jwks;
pub mod middleware;
pub mod principal;
pub mod probe;
pub mod subscription;

pub use config::{ConfigError, FirebaseConfig, ServerConfig};
pub use extractors::{AdminGateError, AdminPrincipal};
pub use firebase::{FirebaseTokenVerifier, TokenVerifier, VerifiedToken};
pub use identity::{AuthError, Authenticator, Credential, FirebaseAuthenticator, SignedIn};
pub use jwks::JwksCache;
pub use middleware::AuthLayer;
pub use principal::{AuthState, Principal};
pub use probe::IdentityProbe;
pub use subscription::{AuthCallback, AuthStateHub, Subscription};

use dotenvy::var;

const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is not a valid number: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Connection parameters shared by the authenticator, the document store
/// client and the ID token verifier.
#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub app_id: String,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub identity_toolkit_url: String,
    pub firestore_url: String,
    pub firestore_bearer: Option<String>,
    pub jwks_url: String,
    pub leeway_secs: u64,
    pub cache_ttl_secs: u64,
}

impl FirebaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required("FIREBASE_API_KEY")?;
        let project_id = required("FIREBASE_PROJECT_ID")?;
        let auth_domain = var("FIREBASE_AUTH_DOMAIN")
            .unwrap_or_else(|_| format!("{project_id}.firebaseapp.com"));
        let app_id = required("FIREBASE_APP_ID")?;

        Ok(Self {
            api_key,
            auth_domain,
            project_id,
            app_id,
            storage_bucket: var("FIREBASE_STORAGE_BUCKET").ok(),
            messaging_sender_id: var("FIREBASE_MESSAGING_SENDER_ID").ok(),
            identity_toolkit_url: var("IDENTITY_TOOLKIT_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_TOOLKIT_URL.to_string()),
            firestore_url: var("FIRESTORE_URL")
                .unwrap_or_else(|_| DEFAULT_FIRESTORE_URL.to_string()),
            firestore_bearer: var("FIRESTORE_BEARER_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            jwks_url: var("FIREBASE_JWKS_URL").unwrap_or_else(|_| DEFAULT_JWKS_URL.to_string()),
            leeway_secs: number_or("FIREBASE_LEEWAY_SECS", 60)?,
            cache_ttl_secs: number_or("FIREBASE_JWKS_CACHE_TTL_SECS", 3600)?,
        })
    }

    /// Config pointing every remote endpoint at `base_url`, for local emulators and tests.
    pub fn local(project_id: &str, base_url: &str) -> Self {
        Self {
            api_key: "local-api-key".to_string(),
            auth_domain: format!("{project_id}.firebaseapp.com"),
            project_id: project_id.to_string(),
            app_id: "local-app".to_string(),
            storage_bucket: None,
            messaging_sender_id: None,
            identity_toolkit_url: base_url.to_string(),
            firestore_url: base_url.to_string(),
            firestore_bearer: None,
            jwks_url: format!("{base_url}/jwks"),
            leeway_secs: 60,
            cache_ttl_secs: 3600,
        }
    }

    /// Issuer every ID token for this project carries.
    pub fn token_issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: number_or("PORT", 8080)?,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn number_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

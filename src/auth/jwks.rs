use jsonwebtoken::DecodingKey;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("key not found for kid: {0}")]
    NotFound(String),
}

#[derive(Deserialize)]
struct Jwk {
    kid: String,
    #[serde(default)]
    kty: String,
    #[serde(default)]
    n: String,
    #[serde(default)]
    e: String,
}

#[derive(Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

struct KeySet {
    keys: HashMap<String, DecodingKey>,
    fresh_until: Instant,
}

/// Signing keys of the token issuer, refreshed when expired or when an
/// unknown key id shows up.
#[derive(Clone)]
pub struct JwksCache {
    url: String,
    client: reqwest::Client,
    set: Arc<RwLock<KeySet>>,
    default_ttl: Duration,
}

impl JwksCache {
    pub fn new(client: reqwest::Client, url: String, default_ttl_secs: u64) -> Self {
        Self {
            url,
            client,
            set: Arc::new(RwLock::new(KeySet {
                keys: HashMap::new(),
                fresh_until: Instant::now(),
            })),
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    async fn refresh(&self) -> Result<(), JwksError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| JwksError::Network(e.to_string()))?;

        let ttl = resp
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        let body = resp
            .text()
            .await
            .map_err(|e| JwksError::Network(e.to_string()))?;
        let jwks: JwkSet =
            serde_json::from_str(&body).map_err(|e| JwksError::Parse(e.to_string()))?;

        let keys: HashMap<String, DecodingKey> = jwks
            .keys
            .into_iter()
            .filter(|k| k.kty == "RSA")
            .filter_map(|k| {
                DecodingKey::from_rsa_components(&k.n, &k.e)
                    .ok()
                    .map(|key| (k.kid, key))
            })
            .collect();
        debug!("jwks: loaded {} signing keys, ttl {:?}", keys.len(), ttl);

        let mut set = self.set.write().await;
        set.keys = keys;
        set.fresh_until = Instant::now() + ttl;
        Ok(())
    }

    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        {
            let set = self.set.read().await;
            if Instant::now() < set.fresh_until {
                if let Some(key) = set.keys.get(kid) {
                    return Ok(key.clone());
                }
            }
        }

        if let Err(e) = self.refresh().await {
            warn!("jwks: refresh from '{}' failed: {}", self.url, e);
        }

        self.set
            .read()
            .await
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| JwksError::NotFound(kid.to_string()))
    }
}

fn parse_max_age(header: &str) -> Option<u64> {
    header
        .split(',')
        .filter_map(|part| part.trim().strip_prefix("max-age="))
        .find_map(|v| v.parse::<u64>().ok())
}

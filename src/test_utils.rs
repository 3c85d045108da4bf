use crate::auth::firebase::{FirebaseAuthError, TokenVerifier, VerifiedToken};
use crate::auth::identity::{AuthError, Authenticator, Credential, SignedIn};
use crate::auth::subscription::{AuthCallback, AuthStateHub, Subscription};
use crate::db::{Document, DocumentStore, StoreError, USERS_COLLECTION};
use crate::models::{RegisteredEvent, Registrant};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// Fixture strategy:
// - Users live in the in-memory store under the "users" collection, keyed by uid.
// - Stores and authenticators count calls so tests can assert which reads happened.

pub fn init_test_logger() {
    let _ = pretty_env_logger::try_init();
}

/// Document store kept in memory, with per-operation read counters and a
/// switch that makes every read fail like an unreachable backend.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failing: AtomicBool,
    failing_lists: AtomicBool,
    get_calls: AtomicUsize,
    list_calls: AtomicUsize,
    query_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<Document>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(USERS_COLLECTION, user);
        }
        store
    }

    pub fn insert(&self, collection: &str, doc: Document) {
        self.collections
            .lock()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Only `list_collection` fails; point reads and queries still succeed.
    pub fn set_failing_lists(&self, failing: bool) {
        self.failing_lists.store(failing, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn total_reads(&self) -> usize {
        self.get_calls() + self.list_calls() + self.query_calls()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Network("store unreachable".to_string()));
        }
        Ok(())
    }

    fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.documents(collection).into_iter().find(|d| d.id == id))
    }

    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.failing_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                message: "listing unavailable".to_string(),
            });
        }
        Ok(self.documents(collection))
    }

    async fn query_collection(
        &self,
        collection: &str,
        field: &str,
        eq: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|d| d.get(field).and_then(Value::as_str) == Some(eq))
            .collect())
    }
}

/// Authenticator backed by a fixed account table.
#[derive(Default)]
pub struct ScriptedAuthenticator {
    accounts: Mutex<HashMap<String, (String, String)>>,
    failure: Mutex<Option<AuthError>>,
    sign_in_calls: AtomicUsize,
    hub: AuthStateHub,
}

impl ScriptedAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str, uid: &str) -> Self {
        self.accounts
            .lock()
            .insert(email.to_string(), (password.to_string(), uid.to_string()));
        self
    }

    /// The next sign-in fails with `err` regardless of the credential.
    pub fn fail_next(&self, err: AuthError) {
        *self.failure.lock() = Some(err);
    }

    /// Publishes an auth state as the provider would on initial resolution.
    pub fn resolve(&self, uid: Option<&str>) {
        self.hub.publish(uid.map(str::to_string));
    }

    pub fn sign_out(&self) {
        self.hub.publish(None);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }
}

#[async_trait]
impl Authenticator for ScriptedAuthenticator {
    async fn sign_in(&self, credential: &Credential) -> Result<SignedIn, AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().take() {
            return Err(err);
        }
        let uid = match self.accounts.lock().get(&credential.email) {
            Some((password, uid)) if password == credential.password() => uid.clone(),
            _ => {
                return Err(AuthError::InvalidCredential(
                    "Firebase: Error (auth/invalid-credential).".to_string(),
                ))
            }
        };
        self.hub.publish(Some(uid.clone()));
        Ok(SignedIn {
            id_token: format!("token-{uid}"),
            principal_id: uid,
            email: Some(credential.email.clone()),
        })
    }

    fn subscribe_auth_state(&self, callback: AuthCallback) -> Subscription {
        self.hub.subscribe(callback)
    }
}

/// Accepts only the tokens it was given.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, VerifiedToken>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, uid: &str) -> Self {
        self.tokens.insert(
            token.to_string(),
            VerifiedToken {
                uid: uid.to_string(),
                email: Some(format!("{uid}@example.com")),
            },
        );
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, FirebaseAuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| FirebaseAuthError::Verify("unknown token".to_string()))
    }
}

/// A users-collection document keyed by `uid`, with `uid` also stored as a field.
pub fn user_doc(uid: &str, fields: Value) -> Document {
    let mut doc = Document::new(uid, fields);
    doc.fields
        .entry("uid".to_string())
        .or_insert_with(|| Value::String(uid.to_string()));
    doc
}

pub fn admin_doc(uid: &str, is_admin: bool) -> Document {
    user_doc(uid, json!({ "name": uid, "isAdmin": is_admin }))
}

pub fn registrant(uid: &str, name: Option<&str>, events: &[&str]) -> Registrant {
    Registrant {
        uid: uid.to_string(),
        name: name.map(str::to_string),
        registered_events: events
            .iter()
            .map(|e| RegisteredEvent {
                name: e.to_string(),
            })
            .collect(),
        ..Registrant::default()
    }
}

pub fn shared(store: MemoryStore) -> Arc<MemoryStore> {
    Arc::new(store)
}

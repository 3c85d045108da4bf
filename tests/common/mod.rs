//! Test conventions:
//! - The document store and the authenticator are the in-memory fakes from
//!   `zorphix_admin::test_utils`; nothing here talks to a real project.
//! - Requests to the provider's REST endpoints go through wiremock.
//! - Seed users through `seeded_users` and keep admin fixtures keyed by uid.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use serde_json::json;
use zorphix_admin::db::Document;
use zorphix_admin::test_utils::{
    admin_doc, init_test_logger, user_doc, MemoryStore, ScriptedAuthenticator, StaticTokenVerifier,
};
use zorphix_admin::AppState;

pub const ADMIN_UID: &str = "admin-1";
pub const ADMIN_EMAIL: &str = "admin@zorphix.com";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const ADMIN_TOKEN: &str = "admin-token";

pub const MEMBER_UID: &str = "member-1";
pub const MEMBER_EMAIL: &str = "member@zorphix.com";
pub const MEMBER_PASSWORD: &str = "member-pass";
pub const MEMBER_TOKEN: &str = "member-token";

/// One admin, one non-admin and two plain registrants.
pub fn seeded_users() -> Vec<Document> {
    vec![
        admin_doc(ADMIN_UID, true),
        admin_doc(MEMBER_UID, false),
        user_doc(
            "u-alice",
            json!({
                "name": "Alice",
                "email": "alice@college.edu",
                "contactNo": "9000000001",
                "collegeName": "Anna University",
                "department": "CSE",
                "registeredEvents": [{ "name": "Xcoders" }, { "name": "Coin-Quest" }]
            }),
        ),
        user_doc(
            "u-bob",
            json!({
                "name": "Bob",
                "collegeName": "PSG Tech",
                "registeredEvents": [{ "name": "coin quest" }]
            }),
        ),
    ]
}

pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub authenticator: Arc<ScriptedAuthenticator>,
    pub state: AppState,
}

pub fn setup_env(users: Vec<Document>) -> TestEnv {
    init_test_logger();
    let store = Arc::new(MemoryStore::with_users(users));
    let authenticator = Arc::new(
        ScriptedAuthenticator::new()
            .with_account(ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_UID)
            .with_account(MEMBER_EMAIL, MEMBER_PASSWORD, MEMBER_UID),
    );
    let verifier = StaticTokenVerifier::new()
        .with_token(ADMIN_TOKEN, ADMIN_UID)
        .with_token(MEMBER_TOKEN, MEMBER_UID);
    let state = AppState::from_parts(authenticator.clone(), store.clone(), Arc::new(verifier));
    TestEnv {
        store,
        authenticator,
        state,
    }
}

pub fn setup_seeded_env() -> TestEnv {
    setup_env(seeded_users())
}

pub fn auth_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

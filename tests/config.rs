// Environment is process-wide, so every case lives in a single test.

use std::env;

use zorphix_admin::auth::{ConfigError, FirebaseConfig, ServerConfig};

const KEYS: [&str; 6] = [
    "FIREBASE_API_KEY",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_APP_ID",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_LEEWAY_SECS",
    "PORT",
];

#[test]
fn config_reads_environment() {
    for key in KEYS {
        env::remove_var(key);
    }

    let err = FirebaseConfig::from_env().expect_err("api key missing");
    assert!(
        matches!(err, ConfigError::Missing("FIREBASE_API_KEY")),
        "got {:?}",
        err
    );

    env::set_var("FIREBASE_API_KEY", "key-123");
    env::set_var("FIREBASE_PROJECT_ID", "zorphix-demo");
    env::set_var("FIREBASE_APP_ID", "1:42:web:abc");
    let cfg = FirebaseConfig::from_env().expect("complete config");
    assert_eq!(cfg.api_key, "key-123");
    assert_eq!(cfg.auth_domain, "zorphix-demo.firebaseapp.com");
    assert_eq!(cfg.leeway_secs, 60);
    assert_eq!(
        cfg.token_issuer(),
        "https://securetoken.google.com/zorphix-demo"
    );

    env::set_var("FIREBASE_LEEWAY_SECS", "soon");
    let err = FirebaseConfig::from_env().expect_err("bad number");
    assert!(
        matches!(err, ConfigError::InvalidNumber { key: "FIREBASE_LEEWAY_SECS", .. }),
        "got {:?}",
        err
    );

    env::set_var("PORT", "9090");
    assert_eq!(ServerConfig::from_env().expect("server config").port, 9090);
}

// Exercises FirestoreClient over HTTP via wiremock; no project or emulator needed.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zorphix_admin::auth::FirebaseConfig;
use zorphix_admin::db::firestore::decode_value;
use zorphix_admin::db::{DocumentStore, FirestoreClient, StoreError};

const DOCS: &str = "/v1/projects/demo-project/databases/(default)/documents";

fn client_for(server: &MockServer) -> FirestoreClient {
    let cfg = FirebaseConfig::local("demo-project", &server.uri());
    FirestoreClient::new(&cfg, reqwest::Client::new())
}

fn raw_user(id: &str, name: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/demo-project/databases/(default)/documents/users/{id}"),
        "fields": {
            "uid": { "stringValue": id },
            "name": { "stringValue": name },
            "isAdmin": { "booleanValue": false },
            "contactNo": { "integerValue": "9876543210" },
            "registeredEvents": { "arrayValue": { "values": [
                { "mapValue": { "fields": { "name": { "stringValue": "Xcoders" } } } }
            ] } }
        }
    })
}

#[actix_rt::test]
async fn get_document_decodes_typed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users/u1")))
        .and(query_param("key", "local-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_user("u1", "Alice")))
        .mount(&server)
        .await;

    let doc = client_for(&server)
        .get_document("users", "u1")
        .await
        .expect("request ok")
        .expect("document exists");
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.get("name"), Some(&json!("Alice")));
    assert_eq!(doc.get("isAdmin"), Some(&json!(false)));
    assert_eq!(doc.get("contactNo"), Some(&json!(9876543210i64)));
    assert_eq!(
        doc.get("registeredEvents"),
        Some(&json!([{ "name": "Xcoders" }]))
    );
}

#[actix_rt::test]
async fn get_missing_document_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users/ghost")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Document not found", "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let doc = client_for(&server)
        .get_document("users", "ghost")
        .await
        .expect("request ok");
    assert_eq!(doc, None);
}

#[actix_rt::test]
async fn list_collection_follows_page_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users")))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [raw_user("u3", "Chen")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users")))
        .and(query_param("pageSize", "300"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [raw_user("u1", "Anu"), raw_user("u2", "Bala")],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let docs = client_for(&server)
        .list_collection("users")
        .await
        .expect("listing ok");
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2", "u3"]);
}

#[actix_rt::test]
async fn empty_collection_lists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let docs = client_for(&server)
        .list_collection("users")
        .await
        .expect("listing ok");
    assert!(docs.is_empty());
}

#[actix_rt::test]
async fn query_collection_sends_equality_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCS}:runQuery")))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "users" }],
                "where": { "fieldFilter": {
                    "field": { "fieldPath": "uid" },
                    "op": "EQUAL",
                    "value": { "stringValue": "u2" }
                } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "document": raw_user("u2", "Bala"), "readTime": "2024-01-01T00:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let docs = client_for(&server)
        .query_collection("users", "uid", "u2")
        .await
        .expect("query ok");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get("name"), Some(&json!("Bala")));
}

#[actix_rt::test]
async fn query_without_matches_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCS}:runQuery")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "readTime": "2024-01-01T00:00:00Z" }])),
        )
        .mount(&server)
        .await;

    let docs = client_for(&server)
        .query_collection("users", "uid", "nobody")
        .await
        .expect("query ok");
    assert!(docs.is_empty());
}

#[actix_rt::test]
async fn error_status_carries_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DOCS}/users")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_collection("users")
        .await
        .expect_err("permission denied");
    match err {
        StoreError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Missing or insufficient permissions.");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[actix_rt::test]
async fn unreachable_store_is_network_error() {
    let cfg = FirebaseConfig::local("demo-project", "http://127.0.0.1:1");
    let client = FirestoreClient::new(&cfg, reqwest::Client::new());

    let err = client
        .get_document("users", "u1")
        .await
        .expect_err("nothing listening");
    assert!(
        matches!(err, StoreError::Network(_)),
        "expected Network error, got {:?}",
        err
    );
}

#[test]
fn decode_value_handles_scalars_and_nesting() {
    assert_eq!(decode_value(&json!({ "nullValue": null })).ok(), Some(json!(null)));
    assert_eq!(decode_value(&json!({ "doubleValue": 2.5 })).ok(), Some(json!(2.5)));
    assert_eq!(decode_value(&json!({ "integerValue": "42" })).ok(), Some(json!(42)));
    assert_eq!(
        decode_value(&json!({ "timestampValue": "2024-01-01T00:00:00Z" })).ok(),
        Some(json!("2024-01-01T00:00:00Z"))
    );
    assert_eq!(decode_value(&json!({ "arrayValue": {} })).ok(), Some(json!([])));
    assert_eq!(
        decode_value(&json!({ "mapValue": { "fields": {
            "inner": { "arrayValue": { "values": [{ "booleanValue": true }] } }
        } } }))
        .ok(),
        Some(json!({ "inner": [true] }))
    );
}

#[test]
fn decode_value_rejects_untyped_input() {
    assert!(matches!(
        decode_value(&json!("plain")),
        Err(StoreError::Decode(_))
    ));
    assert!(matches!(
        decode_value(&json!({ "integerValue": "forty-two" })),
        Err(StoreError::Decode(_))
    ));
    assert!(matches!(
        decode_value(&json!({ "vectorValue": {} })),
        Err(StoreError::Decode(_))
    ));
}

use std::sync::Arc;

use serde_json::json;
use zorphix_admin::db::{Document, RegistrantOperations, RepositoryError};
use zorphix_admin::models::{RegisteredEvent, Registrant};
use zorphix_admin::services::workbook::export_rows;
use zorphix_admin::test_utils::{init_test_logger, user_doc, MemoryStore};

fn ops_over(users: Vec<Document>) -> (Arc<MemoryStore>, RegistrantOperations) {
    init_test_logger();
    let store = Arc::new(MemoryStore::with_users(users));
    (store.clone(), RegistrantOperations::new(store))
}

#[actix_rt::test]
async fn documents_are_normalized_in_store_order() {
    let (store, ops) = ops_over(vec![
        user_doc(
            "u1",
            json!({
                "name": "Divya",
                "email": "divya@college.edu",
                "contactNo": 9876543210u64,
                "collegeName": "CEG",
                "department": "",
                "registeredEvents": [{ "name": "Xcoders" }, { "name": "Virtuoso", "slot": 2 }],
                "isAdmin": false,
                "createdAt": "2024-01-01T00:00:00Z"
            }),
        ),
        user_doc("u2", json!({})),
    ]);

    let registrants = ops.list_registrants().await.expect("store reachable");
    assert_eq!(store.list_calls(), 1);
    assert_eq!(
        registrants,
        vec![
            Registrant {
                uid: "u1".to_string(),
                name: Some("Divya".to_string()),
                email: Some("divya@college.edu".to_string()),
                contact_no: Some("9876543210".to_string()),
                college_name: Some("CEG".to_string()),
                department: None,
                registered_events: vec![
                    RegisteredEvent {
                        name: "Xcoders".to_string()
                    },
                    RegisteredEvent {
                        name: "Virtuoso".to_string()
                    },
                ],
            },
            Registrant::new("u2"),
        ]
    );
}

#[actix_rt::test]
async fn uid_falls_back_to_document_id() {
    let (_, ops) = ops_over(vec![Document::new("doc-9", json!({ "name": "Ezhil" }))]);

    let registrants = ops.list_registrants().await.expect("store reachable");
    assert_eq!(registrants[0].uid, "doc-9");
}

#[actix_rt::test]
async fn malformed_events_yield_no_events() {
    let (_, ops) = ops_over(vec![
        user_doc("a", json!({ "registeredEvents": "Xcoders" })),
        user_doc("b", json!({ "registeredEvents": null })),
    ]);

    let registrants = ops.list_registrants().await.expect("store reachable");
    assert!(registrants.iter().all(|r| r.event_count() == 0));
}

#[actix_rt::test]
async fn repeated_uid_keeps_every_record() {
    let (_, ops) = ops_over(vec![
        Document::new("d1", json!({ "uid": "same", "name": "First" })),
        Document::new("d2", json!({ "uid": "same", "name": "Second" })),
        Document::new("d3", json!({ "uid": "other" })),
    ]);

    let registrants = ops.list_registrants().await.expect("store reachable");
    let names: Vec<Option<&str>> = registrants.iter().map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec![Some("First"), Some("Second"), None]);
}

#[actix_rt::test]
async fn document_id_clashing_with_uid_field_keeps_both() {
    let (_, ops) = ops_over(vec![
        Document::new("docA", json!({ "name": "Alice" })),
        Document::new("docB", json!({ "uid": "docA", "name": "Bob" })),
    ]);

    let registrants = ops.list_registrants().await.expect("store reachable");
    assert_eq!(registrants.len(), 2);
    assert!(registrants.iter().all(|r| r.uid == "docA"));

    let rows = export_rows(&registrants);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].name, "Bob");
}

#[actix_rt::test]
async fn unreachable_store_is_reported() {
    let (store, ops) = ops_over(vec![user_doc("u1", json!({ "name": "A" }))]);
    store.set_failing(true);

    let err = ops.list_registrants().await.expect_err("store down");
    assert!(
        matches!(err, RepositoryError::Unavailable(_)),
        "expected Unavailable, got {:?}",
        err
    );
    assert!(ops.list_registrants_or_empty().await.is_empty());
}

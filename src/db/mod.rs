use async_trait::async_trait;
use serde_json::{Map, Value};

mod errors;
pub mod firestore;
pub mod registrants;

pub use errors::{RepositoryError, StoreError};
pub use firestore::FirestoreClient;
pub use registrants::RegistrantOperations;

/// Collection holding one document per registered user.
pub const USERS_COLLECTION: &str = "users";

/// A dynamically shaped record read from the remote store.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Builds a document from a JSON object; any other JSON value yields no fields.
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Read-only view of the remote document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Documents whose `field` equals the string `eq`, in store order.
    async fn query_collection(
        &self,
        collection: &str,
        field: &str,
        eq: &str,
    ) -> Result<Vec<Document>, StoreError>;
}

use crate::db::{Document, DocumentStore, StoreError, USERS_COLLECTION};
use log::{debug, error};
use serde_json::Value;
use std::sync::Arc;

/// How the probe locates the user record of a principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeLookup {
    /// First document whose `uid` field equals the principal id.
    Query,
    /// The document whose id is the principal id.
    Document,
}

/// Resolves the admin capability of a principal. Fails closed.
#[derive(Clone)]
pub struct IdentityProbe {
    store: Arc<dyn DocumentStore>,
    lookup: ProbeLookup,
}

impl IdentityProbe {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            lookup: ProbeLookup::Query,
        }
    }

    pub fn by_document(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            lookup: ProbeLookup::Document,
        }
    }

    pub fn lookup(&self) -> ProbeLookup {
        self.lookup
    }

    pub async fn is_admin(&self, principal_id: &str) -> bool {
        match self.find_record(principal_id).await {
            Ok(Some(record)) => admin_flag(&record),
            Ok(None) => {
                debug!("is_admin: no user record for '{}'", principal_id);
                false
            }
            Err(e) => {
                error!(
                    "is_admin: error checking admin status for '{}': {}",
                    principal_id, e
                );
                false
            }
        }
    }

    async fn find_record(&self, principal_id: &str) -> Result<Option<Document>, StoreError> {
        match self.lookup {
            ProbeLookup::Query => Ok(self
                .store
                .query_collection(USERS_COLLECTION, "uid", principal_id)
                .await?
                .into_iter()
                .next()),
            ProbeLookup::Document => {
                self.store
                    .get_document(USERS_COLLECTION, principal_id)
                    .await
            }
        }
    }
}

/// Only a boolean `true` grants the capability.
pub fn admin_flag(record: &Document) -> bool {
    matches!(record.get("isAdmin"), Some(Value::Bool(true)))
}

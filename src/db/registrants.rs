use crate::db::{DocumentStore, RepositoryError, USERS_COLLECTION};
use crate::models::Registrant;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct RegistrantOperations {
    store: Arc<dyn DocumentStore>,
}

impl RegistrantOperations {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Reads the whole users collection in store order, one registrant per
    /// document. A repeated uid is logged; both records are kept.
    pub async fn list_registrants(&self) -> Result<Vec<Registrant>, RepositoryError> {
        let documents = self
            .store
            .list_collection(USERS_COLLECTION)
            .await
            .map_err(|e| {
                error!(
                    "list_registrants: error reading '{}' collection: {}",
                    USERS_COLLECTION, e
                );
                RepositoryError::Unavailable(e)
            })?;

        let mut seen = HashSet::with_capacity(documents.len());
        let registrants: Vec<Registrant> = documents
            .iter()
            .map(Registrant::from_document)
            .inspect(|r| {
                if !seen.insert(r.uid.clone()) {
                    warn!("list_registrants: uid '{}' appears more than once", r.uid);
                }
            })
            .collect();

        debug!(
            "list_registrants: normalized {} registrants from {} documents",
            registrants.len(),
            documents.len()
        );
        Ok(registrants)
    }

    /// Like [`list_registrants`](Self::list_registrants), but an unavailable
    /// store yields an empty snapshot after logging the cause.
    pub async fn list_registrants_or_empty(&self) -> Vec<Registrant> {
        self.list_registrants().await.unwrap_or_else(|e| {
            error!("list_registrants: rendering empty table: {}", e);
            Vec::new()
        })
    }
}

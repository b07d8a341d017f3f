//! Session lifecycle: owns the API client and the entity stores.

use std::sync::Arc;

use serde_json::Value;

use crate::client::ApiClient;
use crate::config::{Config, ConfigError};
use crate::error::FetchError;
use crate::model::{Collection, Document, EntityId};
use crate::store::EntityStore;

/// An explicitly owned browsing session.
///
/// Created at session start and dropped at session end; consumers
/// borrow the stores from it. There are no ambient singletons, and two
/// sessions are fully independent. In-flight fetch tasks hold their own
/// references into the stores, so results still apply if every consumer
/// handle is gone.
pub struct Session {
    client: ApiClient,
    documents: EntityStore<Document>,
    collections: EntityStore<Collection>,
}

impl Session {
    /// Validate the configuration and build a session from it.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = ApiClient::new(&config);
        tracing::info!(base_url = %config.api.base_url, "session started");

        Ok(Self {
            documents: EntityStore::new(Arc::new(client.clone())),
            collections: EntityStore::new(Arc::new(client.clone())),
            client,
        })
    }

    /// Document store for this session.
    pub fn documents(&self) -> &EntityStore<Document> {
        &self.documents
    }

    /// Collection store for this session.
    pub fn collections(&self) -> &EntityStore<Collection> {
        &self.collections
    }

    /// The underlying API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Ingest document metadata into a collection and merge the
    /// returned documents into the document store.
    ///
    /// Navigation straight after an upload hits the cache instead of
    /// re-fetching what the backend just returned.
    pub async fn ingest(
        &self,
        collection_id: &EntityId,
        meta: &Value,
    ) -> Result<Vec<Arc<Document>>, FetchError> {
        let documents = self.client.ingest(collection_id, meta).await?;
        tracing::info!(
            collection = %collection_id,
            count = documents.len(),
            "ingest complete"
        );
        Ok(documents
            .into_iter()
            .map(|doc| self.documents.insert(doc))
            .collect())
    }
}

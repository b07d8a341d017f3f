//! HTTP client for the archive API.
//!
//! One read endpoint per entity kind plus the ingest endpoint. All
//! failures are mapped into [`FetchError`] so the store can capture
//! them as record state; status codes and body messages are preserved
//! verbatim.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::Config;
use crate::error::FetchError;
use crate::model::{Document, Entity, EntityId};
use crate::store::{FetchFuture, Fetcher};

/// Header carrying the generated per-request id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response envelope for the ingest endpoint.
#[derive(Debug, Deserialize)]
struct IngestResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    documents: Vec<Document>,
}

/// Client for the archive HTTP API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_seconds))
            .build()
            .expect("failed to build http client");

        Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.api.timeout_seconds),
        }
    }

    /// Fetch one entity by id: `GET /api/2/{kind}/{id}`.
    ///
    /// A 404 maps to `NotFound`, any other non-2xx to `Server` with the
    /// response body preserved, transport failures and timeouts to
    /// `Network`. A decoded payload whose id does not match the
    /// requested id is a `Decode` failure.
    pub async fn get_entity<T: Entity>(&self, id: &EntityId) -> Result<T, FetchError> {
        match timeout(self.request_timeout, self.do_get_entity(id)).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout_error()),
        }
    }

    async fn do_get_entity<T: Entity>(&self, id: &EntityId) -> Result<T, FetchError> {
        let request_id = Uuid::new_v4();
        let url = format!("{}/api/2/{}/{}", self.base_url, T::kind(), id);
        tracing::debug!(
            request_id = %request_id,
            kind = T::kind(),
            entity = %id,
            "fetching entity"
        );

        let response = self
            .client
            .get(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| FetchError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { id: id.clone() });
        }
        if !status.is_success() {
            let message = response.text().await.map_err(|e| FetchError::Network {
                message: e.to_string(),
            })?;
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let payload: T = response.json().await.map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })?;

        if payload.id() != id {
            return Err(FetchError::Decode {
                message: format!(
                    "payload id '{}' does not match requested id '{}'",
                    payload.id(),
                    id
                ),
            });
        }
        Ok(payload)
    }

    /// Ingest document metadata into a collection:
    /// `POST /api/2/collections/{id}/ingest`.
    ///
    /// A metadata-only ingest is keyed by its `foreign_id`; requests
    /// without one are rejected before any network I/O. Returns the
    /// documents the backend created or updated.
    pub async fn ingest(
        &self,
        collection_id: &EntityId,
        meta: &serde_json::Value,
    ) -> Result<Vec<Document>, FetchError> {
        let foreign_id = meta.get("foreign_id").and_then(|v| v.as_str());
        if foreign_id.map_or(true, str::is_empty) {
            return Err(FetchError::InvalidRequest(
                "metadata-only ingest requires a foreign_id".to_string(),
            ));
        }

        match timeout(self.request_timeout, self.do_ingest(collection_id, meta)).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout_error()),
        }
    }

    async fn do_ingest(
        &self,
        collection_id: &EntityId,
        meta: &serde_json::Value,
    ) -> Result<Vec<Document>, FetchError> {
        let request_id = Uuid::new_v4();
        let url = format!("{}/api/2/collections/{}/ingest", self.base_url, collection_id);
        tracing::debug!(
            request_id = %request_id,
            collection = %collection_id,
            "ingesting document metadata"
        );

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(&serde_json::json!({ "meta": meta }))
            .send()
            .await
            .map_err(|e| FetchError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                id: collection_id.clone(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.map_err(|e| FetchError::Network {
                message: e.to_string(),
            })?;
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: IngestResponse = response.json().await.map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })?;

        if body.status != "ok" {
            return Err(FetchError::Decode {
                message: format!("unexpected ingest status '{}'", body.status),
            });
        }
        Ok(body.documents)
    }

    fn timeout_error(&self) -> FetchError {
        FetchError::Network {
            message: format!(
                "request timed out after {}s",
                self.request_timeout.as_secs()
            ),
        }
    }
}

impl<T: Entity> Fetcher<T> for ApiClient {
    fn fetch(&self, id: EntityId) -> FetchFuture<T> {
        let client = self.clone();
        Box::pin(async move { client.get_entity::<T>(&id).await })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityId};

/// Lifecycle state of a document on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    #[default]
    Active,
    Pending,
    Deleted,
}

/// A document record as returned by the archive API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: EntityId,
    /// Collection this document belongs to.
    #[serde(default)]
    pub collection_id: Option<EntityId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Client-supplied identifier, stable across re-ingests.
    #[serde(default)]
    pub foreign_id: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub state: DocumentState,
    /// Fields the store does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Document {
    fn kind() -> &'static str {
        "documents"
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

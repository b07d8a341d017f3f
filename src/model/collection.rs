use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityId};

/// A collection record as returned by the archive API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: EntityId,
    /// Human-readable collection name.
    #[serde(default)]
    pub label: String,
    /// Client-supplied identifier, stable across imports.
    #[serde(default)]
    pub foreign_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Number of searchable entities, as reported by the backend.
    #[serde(default)]
    pub count: Option<u64>,
    /// Fields the store does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Collection {
    fn kind() -> &'static str {
        "collections"
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

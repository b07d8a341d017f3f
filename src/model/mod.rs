//! Domain payload types for the archive API.

mod collection;
mod document;

pub use collection::Collection;
pub use document::{Document, DocumentState};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier for a domain object, assigned by the backend.
///
/// The backend uses text ids for some resources and numeric ids for
/// others; both deserialize into the same canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Num(serde_json::Number),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => Ok(EntityId(s)),
            Raw::Num(n) => Ok(EntityId(n.to_string())),
        }
    }
}

/// A domain object the store can cache.
///
/// Implementors tie a payload type to its API resource segment and
/// expose the backend-assigned id the store keys records by. Additional
/// payload fields are opaque to the store.
pub trait Entity:
    fmt::Debug + Clone + PartialEq + DeserializeOwned + Send + Sync + 'static
{
    /// Resource segment in API URLs (`documents`, `collections`).
    fn kind() -> &'static str;

    /// The backend-assigned identifier.
    fn id(&self) -> &EntityId;
}

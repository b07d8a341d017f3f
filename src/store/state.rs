//! Record and map state for the entity store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FetchError;
use crate::flux::State;
use crate::model::{Entity, EntityId};

/// Fetch status of a single entity record.
///
/// Loaded payloads are shared behind `Arc`, so every consumer observing
/// the same record sees the identical object.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState<T> {
    /// The id has never been requested this session.
    NotRequested,
    /// A network fetch is in flight for this id.
    Fetching,
    /// The last fetch completed with this payload.
    Loaded(Arc<T>),
    /// The last fetch failed; the next fetch will retry.
    Failed(FetchError),
}

impl<T> Default for EntityState<T> {
    fn default() -> Self {
        Self::NotRequested
    }
}

impl<T> EntityState<T> {
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The loaded payload, if any.
    pub fn payload(&self) -> Option<&Arc<T>> {
        match self {
            Self::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    /// The captured failure, if any.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Normalized map of entity records.
///
/// Flat id-to-record mapping plus a version counter bumped on every
/// mutation; consumers detect changes by watching the version. Records
/// are never deleted within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T: Entity> {
    records: HashMap<EntityId, EntityState<T>>,
    version: u64,
}

impl<T: Entity> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            version: 0,
        }
    }
}

impl<T: Entity> State for StoreState<T> {}

impl<T: Entity> StoreState<T> {
    /// Current state for an id; `NotRequested` for unseen ids.
    pub fn get(&self, id: &EntityId) -> EntityState<T> {
        self.records.get(id).cloned().unwrap_or_default()
    }

    /// Monotonically increasing mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of records ever created this session.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn set(&mut self, id: EntityId, state: EntityState<T>) {
        self.records.insert(id, state);
        self.version += 1;
    }
}

use std::sync::Arc;

use crate::error::FetchError;
use crate::flux::Intent;
use crate::model::{Entity, EntityId};

/// Record transition events for one entity kind.
#[derive(Debug, Clone)]
pub enum StoreIntent<T: Entity> {
    /// A network fetch was dispatched for this id.
    FetchStarted { id: EntityId },
    /// The fetch resolved with a payload.
    FetchSucceeded { id: EntityId, payload: Arc<T> },
    /// The fetch failed; the error is preserved for display.
    FetchFailed { id: EntityId, error: FetchError },
    /// An externally obtained payload is merged into the store.
    Inserted { id: EntityId, payload: Arc<T> },
}

impl<T: Entity> Intent for StoreIntent<T> {}

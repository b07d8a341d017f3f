//! Seam between the store and whatever performs network I/O.

use std::future::Future;
use std::pin::Pin;

use crate::error::FetchError;
use crate::model::EntityId;

/// Boxed future returned by [`Fetcher::fetch`].
pub type FetchFuture<T> =
    Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'static>>;

/// Performs the network read for one entity kind.
///
/// Object-safe so stores can hold `Arc<dyn Fetcher<T>>`. The API client
/// implements this for every entity type; tests inject scripted
/// fetchers.
pub trait Fetcher<T>: Send + Sync + 'static {
    /// Fetch the entity with the given id.
    fn fetch(&self, id: EntityId) -> FetchFuture<T>;
}

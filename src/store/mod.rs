//! Normalized entity cache with fetch deduplication.
//!
//! The store keeps one record per entity id, tracks its fetch status,
//! and guarantees at most one in-flight network fetch per id: callers
//! that request an id while a fetch is in flight join that operation
//! instead of issuing a second one.
//!
//! Record transitions are applied only by the pure [`StoreReducer`];
//! the store itself handles orchestration: the in-flight registry,
//! detached fetch tasks, and change notification. Fetch tasks run under
//! `tokio::spawn`, decoupled from every caller's lifetime, so a result
//! is still applied to the shared store if the consumer that requested
//! it was dropped mid-fetch.

mod fetcher;
mod intent;
mod reducer;
mod state;

pub use fetcher::{FetchFuture, Fetcher};
pub use intent::StoreIntent;
pub use reducer::StoreReducer;
pub use state::{EntityState, StoreState};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::flux::Reducer;
use crate::model::{Entity, EntityId};

/// Normalized, keyed cache of fetched entities with per-id status
/// tracking and fetch deduplication.
///
/// Cheap to clone; all clones share the same records. Reads are
/// non-blocking for concurrent callers, writes go through the reducer
/// and bump the store version exactly once per transition.
pub struct EntityStore<T: Entity> {
    inner: Arc<StoreInner<T>>,
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner<T: Entity> {
    state: RwLock<StoreState<T>>,
    /// One completion channel per id with a fetch in flight.
    inflight: Mutex<HashMap<EntityId, watch::Receiver<bool>>>,
    /// Version notifications for subscribers.
    version_tx: watch::Sender<u64>,
    fetcher: Arc<dyn Fetcher<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store backed by the given fetcher.
    pub fn new(fetcher: Arc<dyn Fetcher<T>>) -> Self {
        let (version_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState::default()),
                inflight: Mutex::new(HashMap::new()),
                version_tx,
                fetcher,
            }),
        }
    }

    /// Current state for an id.
    ///
    /// Returns `NotRequested` for ids never seen this session. This is
    /// fast and non-blocking for concurrent readers.
    pub fn get(&self, id: &EntityId) -> EntityState<T> {
        self.inner
            .state
            .read()
            .expect("store state lock poisoned")
            .get(id)
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.inner
            .state
            .read()
            .expect("store state lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .state
            .read()
            .expect("store state lock poisoned")
            .is_empty()
    }

    /// Subscribe to store mutations.
    ///
    /// The receiver yields the store version; every record transition
    /// bumps it exactly once. Re-read with [`get`](Self::get) after each
    /// change; no partial states are observable between notifications.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version_tx.subscribe()
    }

    /// Fetch an entity, deduplicating against any in-flight fetch.
    ///
    /// - `Loaded`: returns immediately, no network call. The store never
    ///   proactively invalidates; use [`refresh`](Self::refresh) to
    ///   force a re-fetch.
    /// - `Fetching`: joins the in-flight operation; exactly one network
    ///   round trip is made no matter how many callers are waiting.
    /// - `NotRequested` / `Failed`: dispatches a new fetch. A failed
    ///   record always retries.
    ///
    /// The returned state is the settled record: `Loaded` or `Failed`.
    pub async fn fetch(&self, id: &EntityId) -> EntityState<T> {
        let current = self.get(id);
        if current.is_loaded() {
            return current;
        }
        let done = self.ensure_fetch(id, false);
        Self::wait_settled(done).await;
        self.get(id)
    }

    /// Force a new network round trip for an id.
    ///
    /// Coalesces with an in-flight fetch; otherwise re-fetches even when
    /// the record is `Loaded` or `Failed`, transitioning it back to
    /// `Fetching` until the new result arrives.
    pub async fn refresh(&self, id: &EntityId) -> EntityState<T> {
        let done = self.ensure_fetch(id, true);
        Self::wait_settled(done).await;
        self.get(id)
    }

    /// Fetch several ids, starting all fetches before awaiting any.
    ///
    /// Duplicate ids share a single network call. Returned states are in
    /// the order of `ids`.
    pub async fn fetch_many(&self, ids: &[EntityId]) -> Vec<EntityState<T>> {
        let pending: Vec<(EntityId, Option<watch::Receiver<bool>>)> = ids
            .iter()
            .map(|id| {
                if self.get(id).is_loaded() {
                    (id.clone(), None)
                } else {
                    (id.clone(), Some(self.ensure_fetch(id, false)))
                }
            })
            .collect();

        let mut states = Vec::with_capacity(pending.len());
        for (id, done) in pending {
            if let Some(done) = done {
                Self::wait_settled(done).await;
            }
            states.push(self.get(&id));
        }
        states
    }

    /// Merge an externally obtained payload into the store.
    ///
    /// The record becomes `Loaded` without a network call and
    /// subscribers are notified. Returns the shared payload.
    pub fn insert(&self, payload: T) -> Arc<T> {
        let payload = Arc::new(payload);
        let id = payload.id().clone();
        Self::apply(
            &self.inner,
            StoreIntent::Inserted {
                id,
                payload: Arc::clone(&payload),
            },
        );
        payload
    }

    /// Begin a fetch for an id unless one is already in flight,
    /// returning the completion channel to wait on.
    fn ensure_fetch(&self, id: &EntityId, force: bool) -> watch::Receiver<bool> {
        let mut inflight = self.inner.inflight.lock();
        if let Some(done) = inflight.get(id) {
            return done.clone();
        }
        if !force && self.get(id).is_loaded() {
            // The fetch settled between the caller's read and here;
            // hand back an already-completed channel.
            let (_done_tx, done_rx) = watch::channel(true);
            return done_rx;
        }

        let (done_tx, done_rx) = watch::channel(false);
        inflight.insert(id.clone(), done_rx.clone());
        drop(inflight);

        Self::apply(&self.inner, StoreIntent::FetchStarted { id: id.clone() });

        let inner = Arc::clone(&self.inner);
        let id = id.clone();
        let future = inner.fetcher.fetch(id.clone());
        tokio::spawn(async move {
            let intent = match future.await {
                Ok(payload) => {
                    tracing::debug!(kind = T::kind(), entity = %id, "entity fetch resolved");
                    StoreIntent::FetchSucceeded {
                        id: id.clone(),
                        payload: Arc::new(payload),
                    }
                }
                Err(error) => {
                    tracing::debug!(
                        kind = T::kind(),
                        entity = %id,
                        error = %error,
                        error_kind = error.kind(),
                        "entity fetch failed"
                    );
                    StoreIntent::FetchFailed {
                        id: id.clone(),
                        error,
                    }
                }
            };
            // Settle the record before releasing joiners, so every
            // waiter wakes to a Loaded or Failed state.
            Self::apply(&inner, intent);
            inner.inflight.lock().remove(&id);
            let _ = done_tx.send(true);
        });

        done_rx
    }

    async fn wait_settled(mut done: watch::Receiver<bool>) {
        while !*done.borrow() {
            if done.changed().await.is_err() {
                break;
            }
        }
    }

    /// Run an intent through the reducer and notify subscribers if the
    /// state changed.
    fn apply(inner: &StoreInner<T>, intent: StoreIntent<T>) {
        let mut state = inner.state.write().expect("store state lock poisoned");
        let before = state.version();
        *state = StoreReducer::reduce(std::mem::take(&mut *state), intent);
        let version = state.version();
        drop(state);

        if version != before {
            let _ = inner.version_tx.send(version);
        }
    }
}

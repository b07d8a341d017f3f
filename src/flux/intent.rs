//! Base trait for intents (fetch lifecycle and merge events).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Fetch lifecycle events (dispatched, resolved, failed)
/// - External merges (write-through inserts)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}

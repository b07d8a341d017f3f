use std::marker::PhantomData;

use crate::flux::Reducer;
use crate::model::Entity;
use crate::store::intent::StoreIntent;
use crate::store::state::{EntityState, StoreState};

/// The only place entity records transition.
///
/// Completions arriving against a record that is no longer `Fetching`
/// (possible when an insert races a fetch) apply last-write-wins.
pub struct StoreReducer<T: Entity>(PhantomData<T>);

impl<T: Entity> Reducer for StoreReducer<T> {
    type State = StoreState<T>;
    type Intent = StoreIntent<T>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::FetchStarted { id } => {
                // Re-dispatch against an in-flight record is a no-op;
                // callers coalesce onto the existing operation.
                if state.get(&id).is_fetching() {
                    return state;
                }
                state.set(id, EntityState::Fetching);
                state
            }
            StoreIntent::FetchSucceeded { id, payload } => {
                if !state.get(&id).is_fetching() {
                    tracing::warn!(
                        entity = %id,
                        "fetch completion for a record that is not fetching"
                    );
                }
                state.set(id, EntityState::Loaded(payload));
                state
            }
            StoreIntent::FetchFailed { id, error } => {
                if !state.get(&id).is_fetching() {
                    tracing::warn!(
                        entity = %id,
                        error = %error,
                        "fetch failure for a record that is not fetching"
                    );
                }
                state.set(id, EntityState::Failed(error));
                state
            }
            StoreIntent::Inserted { id, payload } => {
                state.set(id, EntityState::Loaded(payload));
                state
            }
        }
    }
}

//! External store contract and an in-process implementation.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::action::{Action, INIT_ACTION_TYPE};
use crate::api::ApiError;
use crate::reducer::Reducer;
use crate::state::State;

/// A holder of one piece of state, updated only through a reducer.
pub trait Store: Send + Sync {
    /// The current state (`None` while undefined).
    fn get_state(&self) -> Option<State>;

    /// Run the reducer over the current state and keep the result.
    fn dispatch(&self, action: Action) -> Result<Action, ApiError>;
}

/// In-memory store.
///
/// Dispatch reads the current state, runs the reducer without holding the
/// lock, then swaps the result in. A failed reduce leaves the state as it
/// was. Dispatch is re-entrant but not concurrent: two threads dispatching
/// at once may lose one of the updates.
pub struct MemoryStore {
    reducer: Box<dyn Reducer>,
    state: RwLock<Option<State>>,
}

impl MemoryStore {
    /// Create a store with undefined state and dispatch the init action.
    pub fn new<R>(reducer: R) -> Result<Arc<Self>, ApiError>
    where
        R: Reducer + 'static,
    {
        Self::with_state(reducer, None)
    }

    /// Create a store from a preloaded state and dispatch the init action.
    pub fn with_state<R>(reducer: R, preloaded: Option<State>) -> Result<Arc<Self>, ApiError>
    where
        R: Reducer + 'static,
    {
        let store = Arc::new(Self {
            reducer: Box::new(reducer),
            state: RwLock::new(preloaded),
        });
        store.dispatch(Action::new(INIT_ACTION_TYPE))?;
        Ok(store)
    }
}

impl Store for MemoryStore {
    fn get_state(&self) -> Option<State> {
        self.state.read().clone()
    }

    fn dispatch(&self, action: Action) -> Result<Action, ApiError> {
        tracing::debug!(action_type = %action.action_type, "store dispatch");
        let current = self.state.read().clone();
        let next = self.reducer.reduce(current.as_ref(), &action)?;
        *self.state.write() = next;
        Ok(action)
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("state", &*self.state.read())
            .finish()
    }
}

//! Reducer contract between a tree and the store hosting its state.

use crate::action::Action;
use crate::api::{Api, ApiError};
use crate::link::{Link, StoreLink};
use crate::state::State;

/// Reducer transforms state based on actions.
///
/// It must be a pure function: (State, Action) -> State. `None` stands for
/// a state that is still undefined.
pub trait Reducer: Send + Sync {
    /// Process an action and return the new state.
    fn reduce(&self, state: Option<&State>, action: &Action) -> Result<Option<State>, ApiError>;
}

impl<F> Reducer for F
where
    F: Fn(Option<&State>, &Action) -> Result<Option<State>, ApiError> + Send + Sync,
{
    fn reduce(&self, state: Option<&State>, action: &Action) -> Result<Option<State>, ApiError> {
        self(state, action)
    }
}

/// Reducer over a whole API tree, created by
/// [`create_reducer`](crate::link::create_reducer).
#[derive(Debug, Clone)]
pub struct ApiReducer {
    root: Api,
}

impl ApiReducer {
    pub(crate) fn new(root: Api) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Api {
        &self.root
    }
}

impl Reducer for ApiReducer {
    fn reduce(&self, state: Option<&State>, action: &Action) -> Result<Option<State>, ApiError> {
        let slice = state.and_then(|s| StoreLink.read("", s));
        self.root.transition(slice.as_ref(), action)
    }
}

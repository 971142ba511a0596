//! Dispatching actions and effects into a tree.

use crate::action::Action;
use crate::api::error::ApiError;
use crate::api::node::{Api, Attachment};

/// A deferred unit of work run against the effective root of a tree.
///
/// The effect receives the root handle, whose `dispatch` and `get_state`
/// form the bound pair it may use. Its return value is handed back as-is,
/// which may be a future; the tree never awaits it.
pub type Effect<T> = Box<dyn FnOnce(&Api) -> T + Send>;

/// Something that can be dispatched.
pub enum Input<T> {
    Action(Action),
    Effect(Effect<T>),
}

impl<T> Input<T> {
    pub fn effect<F>(f: F) -> Self
    where
        F: FnOnce(&Api) -> T + Send + 'static,
    {
        Input::Effect(Box::new(f))
    }
}

impl<T> From<Action> for Input<T> {
    fn from(action: Action) -> Self {
        Input::Action(action)
    }
}

/// What dispatching an [`Input`] returned.
#[derive(Debug)]
pub enum Output<T> {
    /// The dispatched action, after the state was updated.
    Action(Action),
    /// The effect's own return value.
    Value(T),
}

impl<T> Output<T> {
    pub fn into_action(self) -> Option<Action> {
        match self {
            Output::Action(action) => Some(action),
            Output::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Output::Value(value) => Some(value),
            Output::Action(_) => None,
        }
    }
}

impl Api {
    /// Dispatch an action to the root of this tree.
    ///
    /// A linked node forwards to its parent, a store-bound node to its
    /// store. A root runs [`transition`](Api::transition) over its held
    /// state and stores the result only once the whole pass succeeded.
    ///
    /// Handlers must not dispatch into the same tree while a transition
    /// is running. Dispatches from several threads at once are not
    /// serialized, and one of the updates may be lost.
    pub fn dispatch(&self, action: Action) -> Result<Action, ApiError> {
        match self.attachment() {
            Attachment::Child { parent, .. } => match Api::from_weak(&parent) {
                Some(parent) => parent.dispatch(action),
                None => self.dispatch_local(action),
            },
            Attachment::Store(store) => {
                let store = store.upgrade().ok_or(ApiError::StoreDropped)?;
                store.dispatch(action)
            }
            Attachment::Detached => self.dispatch_local(action),
        }
    }

    fn dispatch_local(&self, action: Action) -> Result<Action, ApiError> {
        tracing::debug!(
            api = %self.inner.id,
            name = self.inner.name.as_deref().unwrap_or(""),
            action_type = %action.action_type,
            "dispatch"
        );

        let current = self.inner.held.read().clone();
        let next = self.transition(current.as_ref(), &action)?;
        *self.inner.held.write() = next;
        Ok(action)
    }

    /// Dispatch an action or run an effect.
    pub fn send<T>(&self, input: Input<T>) -> Result<Output<T>, ApiError> {
        match input {
            Input::Action(action) => self.dispatch(action).map(Output::Action),
            Input::Effect(effect) => Ok(Output::Value(self.run(effect))),
        }
    }

    /// Run an effect against the effective root and return its result.
    pub fn run<T, F>(&self, effect: F) -> T
    where
        F: FnOnce(&Api) -> T,
    {
        let root = self.root();
        tracing::debug!(api = %self.inner.id, root = %root.inner.id, "run effect");
        effect(&root)
    }

    /// Populate the whole tree by dispatching the init action once.
    ///
    /// Nodes whose state is already defined keep it, so calling this again
    /// does not re-run any `initial_state`.
    pub fn init(&self) -> Result<&Self, ApiError> {
        let init_type = self.tree_config().defaults.init_action_type.clone();
        self.dispatch(self.create_action(&init_type).empty())?;
        Ok(self)
    }
}

//! The composable API node.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::action::{Action, ActionCreator, ArgsBuilder};
use crate::config::Config;
use crate::link::{Link, StoreLink};
use crate::state::State;
use crate::store::Store;

/// A state transition registered for one action type.
pub type Handler = Arc<dyn Fn(&State, &Action) -> anyhow::Result<State> + Send + Sync>;

/// Produces a node's initial state.
pub type InitialStateFn = Arc<dyn Fn() -> State + Send + Sync>;

/// Where a node sits: nowhere, under another node, or on a store.
#[derive(Clone)]
pub(crate) enum Attachment {
    Detached,
    Child {
        parent: Weak<ApiInner>,
        key: String,
        link: Arc<dyn Link>,
    },
    Store(Weak<dyn Store>),
}

pub(crate) struct ApiInner {
    pub(crate) id: Uuid,
    pub(crate) name: Option<String>,
    /// State held by a root node that is not bound to a store.
    pub(crate) held: RwLock<Option<State>>,
    pub(crate) handlers: RwLock<HashMap<String, Handler>>,
    pub(crate) attachment: RwLock<Attachment>,
    /// Ordered list of attached children.
    pub(crate) children: RwLock<Vec<Api>>,
    pub(crate) initial: InitialStateFn,
    pub(crate) config: Arc<Config>,
}

/// One composable, namespaced state-and-action unit.
///
/// `Api` is a cheap handle; clones refer to the same node. Nodes form a
/// tree through [`link`](crate::link::link): a parent owns its children,
/// a child only keeps a weak reference back to its parent.
#[derive(Clone)]
pub struct Api {
    pub(crate) inner: Arc<ApiInner>,
}

/// Builder for [`Api`].
#[derive(Default)]
pub struct ApiBuilder {
    name: Option<String>,
    state: Option<State>,
    initial: Option<InitialStateFn>,
    config: Option<Arc<Config>>,
}

impl ApiBuilder {
    /// Label used in log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// State held by the node before any dispatch.
    ///
    /// Only meaningful while the node is a root; a linked node reads its
    /// slice through its parent.
    pub fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    /// Value returned by `initial_state()` for this node.
    pub fn initial_state(self, state: State) -> Self {
        self.initial_state_fn(move || state.clone())
    }

    /// Override `initial_state()` with a function.
    pub fn initial_state_fn<F>(mut self, f: F) -> Self
    where
        F: Fn() -> State + Send + Sync + 'static,
    {
        self.initial = Some(Arc::new(f));
        self
    }

    /// Tree settings. Only the root's config is consulted.
    pub fn config(mut self, config: Arc<Config>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Api {
        Api {
            inner: Arc::new(ApiInner {
                id: Uuid::new_v4(),
                name: self.name,
                held: RwLock::new(self.state),
                handlers: RwLock::new(HashMap::new()),
                attachment: RwLock::new(Attachment::Detached),
                children: RwLock::new(Vec::new()),
                initial: self.initial.unwrap_or_else(|| Arc::new(State::empty_map)),
                config: self.config.unwrap_or_default(),
            }),
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    /// A detached node with no held state and an empty-map initial state.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    /// Unique id of this node, used in log fields.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Whether two handles refer to the same node.
    pub fn ptr_eq(a: &Api, b: &Api) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub(crate) fn attachment(&self) -> Attachment {
        self.inner.attachment.read().clone()
    }

    pub(crate) fn from_weak(weak: &Weak<ApiInner>) -> Option<Api> {
        weak.upgrade().map(|inner| Api { inner })
    }

    /// The parent node and this node's attachment key, if linked to a live
    /// parent.
    pub(crate) fn parent_and_key(&self) -> Option<(Api, String)> {
        match self.attachment() {
            Attachment::Child { parent, key, .. } => {
                Api::from_weak(&parent).map(|parent| (parent, key))
            }
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<Api> {
        self.parent_and_key().map(|(parent, _)| parent)
    }

    /// The key this node is attached under in its parent.
    pub fn key(&self) -> Option<String> {
        match self.attachment() {
            Attachment::Child { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this node is bound to an external store.
    pub fn is_store_bound(&self) -> bool {
        matches!(self.attachment(), Attachment::Store(_))
    }

    /// The topmost node of this tree.
    pub fn root(&self) -> Api {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Attached children, in link order.
    pub fn children(&self) -> Vec<Api> {
        self.inner.children.read().clone()
    }

    /// The child attached under `key`.
    pub fn child(&self, key: &str) -> Option<Api> {
        self.children()
            .into_iter()
            .find(|child| child.key().as_deref() == Some(key))
    }

    /// The config of this tree's root.
    pub fn tree_config(&self) -> Arc<Config> {
        self.root().inner.config.clone()
    }

    /// Current state of this node.
    ///
    /// A linked node reads its slice out of its parent's state through its
    /// link; a store-bound node reads the store; a root returns the state
    /// it holds. `None` means the state is still undefined.
    pub fn get_state(&self) -> Option<State> {
        match self.attachment() {
            Attachment::Child { parent, key, link } => match Api::from_weak(&parent) {
                Some(parent) => parent.get_state().and_then(|s| link.read(&key, &s)),
                None => self.inner.held.read().clone(),
            },
            Attachment::Store(store) => match store.upgrade() {
                Some(store) => store.get_state().and_then(|s| StoreLink.read("", &s)),
                None => self.inner.held.read().clone(),
            },
            Attachment::Detached => self.inner.held.read().clone(),
        }
    }

    /// Register (or replace) the handler for an exact local action type.
    pub fn set_handler<F>(&self, action_type: impl Into<String>, handler: F)
    where
        F: Fn(&State, &Action) -> State + Send + Sync + 'static,
    {
        self.set_fallible_handler(action_type, move |state, action| Ok(handler(state, action)));
    }

    /// Register a handler that may fail.
    ///
    /// An error aborts the whole transition and reaches the dispatch call
    /// site as [`ApiError::Handler`](crate::ApiError::Handler).
    pub fn set_fallible_handler<F>(&self, action_type: impl Into<String>, handler: F)
    where
        F: Fn(&State, &Action) -> anyhow::Result<State> + Send + Sync + 'static,
    {
        let action_type = action_type.into();
        tracing::trace!(api = %self.inner.id, action_type = %action_type, "set handler");
        self.inner
            .handlers
            .write()
            .insert(action_type, Arc::new(handler));
    }

    /// Remove the handler for `action_type`, returning it if one existed.
    pub fn clear_handler(&self, action_type: &str) -> Option<Handler> {
        self.inner.handlers.write().remove(action_type)
    }

    pub fn has_handler(&self, action_type: &str) -> bool {
        self.inner.handlers.read().contains_key(action_type)
    }

    pub(crate) fn handler(&self, action_type: &str) -> Option<Handler> {
        self.inner.handlers.read().get(action_type).cloned()
    }

    /// The state this node starts from when its state is undefined.
    pub fn initial_state(&self) -> State {
        (self.inner.initial)()
    }

    /// Qualify a local action type with every ancestor's attachment key.
    ///
    /// A root (including a store-bound node) leaves the type unqualified.
    pub fn action_type(&self, local: &str) -> String {
        let mut keys = Vec::new();
        let mut node = self.clone();
        while let Some((parent, key)) = node.parent_and_key() {
            keys.push(key);
            node = parent;
        }
        if keys.is_empty() {
            return local.to_string();
        }

        let separator = node.inner.config.defaults.separator;
        let mut qualified = String::new();
        for key in keys.iter().rev() {
            qualified.push_str(key);
            qualified.push(separator);
        }
        qualified.push_str(local);
        qualified
    }

    /// An action creator for a local action type.
    pub fn create_action(&self, action_type: &str) -> ActionCreator {
        ActionCreator::new(self.action_type(action_type))
    }

    /// An action creator with optional payload and meta builders.
    pub fn create_action_with(
        &self,
        action_type: &str,
        payload: Option<ArgsBuilder>,
        meta: Option<ArgsBuilder>,
    ) -> ActionCreator {
        self.create_action(action_type).with_builders(payload, meta)
    }
}

impl PartialEq for Api {
    fn eq(&self, other: &Self) -> bool {
        Api::ptr_eq(self, other)
    }
}

impl Eq for Api {}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("key", &self.key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::link;
    use serde_json::json;

    #[test]
    fn new_api_has_undefined_state() {
        assert!(Api::new().get_state().is_none());
    }

    #[test]
    fn builder_state_is_held() {
        let api = Api::builder()
            .state(State::from(json!({"my": "state"})))
            .build();
        assert_eq!(api.get_state().unwrap()["my"].as_str(), Some("state"));
    }

    #[test]
    fn default_initial_state_is_a_fresh_empty_map() {
        let api = Api::new();
        let a = api.initial_state();
        let b = api.initial_state();
        assert!(a.is_map());
        assert!(a.is_empty());
        assert!(!State::same(&a, &b));
    }

    #[test]
    fn initial_state_can_be_overridden() {
        let api = Api::builder()
            .initial_state(State::from(json!({"custom": "state"})))
            .build();
        assert_eq!(api.initial_state()["custom"].as_str(), Some("state"));
    }

    #[test]
    fn clear_handler_returns_previous() {
        let api = Api::new();
        api.set_handler("TEST", |state, _| state.clone());
        assert!(api.has_handler("TEST"));
        assert!(api.clear_handler("TEST").is_some());
        assert!(!api.has_handler("TEST"));
        assert!(api.clear_handler("TEST").is_none());
    }

    #[test]
    fn root_action_type_is_unqualified() {
        let api = Api::new();
        assert_eq!(api.create_action("TEST").empty().action_type, "TEST");
    }

    #[test]
    fn nested_action_type_is_qualified_per_level() {
        let root = Api::new();
        let mid = link(&root, "mid", Api::new()).unwrap();
        let leaf = link(&mid, "leaf", Api::new()).unwrap();
        assert_eq!(leaf.action_type("GO"), "mid/leaf/GO");
        assert_eq!(mid.action_type("GO"), "mid/GO");
    }

    #[test]
    fn qualified_type_uses_root_separator() {
        let mut config = Config::default();
        config.defaults.separator = '.';
        let root = Api::builder().config(Arc::new(config)).build();
        let child = link(&root, "child", Api::new()).unwrap();
        assert_eq!(child.action_type("GO"), "child.GO");
    }

    #[test]
    fn root_and_parent_navigation() {
        let root = Api::builder().name("root").build();
        let child = link(&root, "child", Api::new()).unwrap();
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(child.root(), root);
        assert_eq!(child.key().as_deref(), Some("child"));
        assert_eq!(root.child("child"), Some(child));
        assert!(root.parent().is_none());
        assert_eq!(root.name(), Some("root"));
    }
}

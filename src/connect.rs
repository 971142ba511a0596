//! Projection of a node's state into view props.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::Api;
use crate::state::State;

/// Read-only props handed to a view.
#[derive(Debug)]
pub struct Props {
    /// The node's state fields, overlaid with the caller's own props.
    /// Child nodes' state sits under their state keys, as in the tree.
    pub values: State,
    /// The node the props were projected from.
    pub api: Api,
}

struct Cached {
    state: Option<State>,
    own: State,
    props: Arc<Props>,
}

/// Memoizing projection for one node.
///
/// Repeated calls return the same `Arc<Props>` for as long as both the
/// node's state and the own props are the same snapshots.
pub struct Connector {
    api: Api,
    cache: Mutex<Option<Cached>>,
}

impl Connector {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            cache: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Props for the current state and `own_props`.
    ///
    /// A map state contributes its fields; any other defined state is
    /// placed under `"state"`. Map own props are overlaid field by field;
    /// other non-null own props are placed under `"props"`.
    pub fn props(&self, own_props: &State) -> Arc<Props> {
        let state = self.api.get_state();

        let mut cache = self.cache.lock();
        if let Some(cached) = cache.as_ref() {
            if State::same_opt(cached.state.as_ref(), state.as_ref())
                && State::same(&cached.own, own_props)
            {
                return cached.props.clone();
            }
        }

        let props = Arc::new(Props {
            values: merge(state.as_ref(), own_props),
            api: self.api.clone(),
        });
        tracing::trace!(api = %self.api.id(), "props recomputed");
        *cache = Some(Cached {
            state,
            own: own_props.clone(),
            props: props.clone(),
        });
        props
    }
}

fn merge(state: Option<&State>, own_props: &State) -> State {
    let mut values = match state {
        Some(s @ State::Map(_)) => s.clone(),
        Some(other) => State::empty_map().with("state", other.clone()),
        None => State::empty_map(),
    };
    match own_props {
        State::Map(fields) => {
            for (key, value) in fields.iter() {
                values.set(key, value.clone());
            }
        }
        State::Null => {}
        other => values.set("props", other.clone()),
    }
    values
}

impl Api {
    /// A memoizing props projection for this node.
    pub fn connector(&self) -> Connector {
        Connector::new(self.clone())
    }
}

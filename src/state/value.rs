//! Immutable state snapshots.
//!
//! A [`State`] is a JSON-shaped value whose containers are shared through
//! `Arc`. Cloning a state is shallow: the clone points at the same
//! children, so an unchanged subtree keeps its identity across
//! transitions. [`State::same`] is the identity check the tree uses for
//! change detection.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use super::key::StateKey;

static NULL: State = State::Null;

/// One immutable node of the state tree.
#[derive(Clone, Default, PartialEq)]
pub enum State {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    List(Arc<Vec<State>>),
    Map(Arc<BTreeMap<String, State>>),
}

impl State {
    /// A new, empty keyed container.
    pub fn empty_map() -> Self {
        State::Map(Arc::new(BTreeMap::new()))
    }

    /// A new, empty ordered sequence.
    pub fn empty_list() -> Self {
        State::List(Arc::new(Vec::new()))
    }

    /// Identity comparison.
    ///
    /// Containers are the same only when they share the same allocation.
    /// Scalars have no identity of their own and compare by value.
    pub fn same(a: &State, b: &State) -> bool {
        match (a, b) {
            (State::List(x), State::List(y)) => Arc::ptr_eq(x, y),
            (State::Map(x), State::Map(y)) => Arc::ptr_eq(x, y),
            (State::List(_), _) | (State::Map(_), _) => false,
            (_, State::List(_)) | (_, State::Map(_)) => false,
            _ => a == b,
        }
    }

    /// Identity comparison over possibly undefined states.
    pub fn same_opt(a: Option<&State>, b: Option<&State>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => State::same(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Copy a container into a fresh allocation that shares its children.
    ///
    /// Lists stay lists. Scalars and `Null` become an empty map, which is
    /// what spreading them into a new object would produce.
    pub fn shallow_clone(&self) -> State {
        match self {
            State::List(items) => State::List(Arc::new(items.as_ref().clone())),
            State::Map(fields) => State::Map(Arc::new(fields.as_ref().clone())),
            _ => State::empty_map(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, State::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, State::Map(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, State::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            State::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            State::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            State::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            State::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[State]> {
        match self {
            State::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, State>> {
        match self {
            State::Map(fields) => Some(fields.as_ref()),
            _ => None,
        }
    }

    /// Number of entries in a container; scalars have none.
    pub fn len(&self) -> usize {
        match self {
            State::List(items) => items.len(),
            State::Map(fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the slot at `key`, if present.
    pub fn get<K: Into<StateKey>>(&self, key: K) -> Option<&State> {
        match (self, key.into()) {
            (State::Map(fields), StateKey::Field(name)) => fields.get(&name),
            (State::List(items), StateKey::Index(idx)) => items.get(idx),
            (State::List(items), StateKey::Field(name)) => {
                name.parse::<usize>().ok().and_then(|idx| items.get(idx))
            }
            (State::Map(fields), StateKey::Index(idx)) => fields.get(&idx.to_string()),
            _ => None,
        }
    }

    /// Write `value` into the slot at `key`.
    ///
    /// Copy-on-write: if this container's allocation is shared, it is
    /// cloned first, so other holders of the old snapshot never observe
    /// the write. A scalar is replaced by a map (or a list, for an index
    /// key). Writing past the end of a list pads with `Null`.
    pub fn set<K: Into<StateKey>>(&mut self, key: K, value: State) {
        let key = key.into();
        if !matches!(self, State::Map(_) | State::List(_)) {
            *self = match key {
                StateKey::Index(_) => State::empty_list(),
                StateKey::Field(_) => State::empty_map(),
            };
        }
        match (self, key) {
            (State::Map(fields), StateKey::Field(name)) => {
                Arc::make_mut(fields).insert(name, value);
            }
            (State::Map(fields), StateKey::Index(idx)) => {
                Arc::make_mut(fields).insert(idx.to_string(), value);
            }
            (State::List(items), key) => {
                let Some(idx) = key.as_index() else {
                    tracing::warn!(key = %key, "ignoring non-numeric key on a list slot");
                    return;
                };
                let items = Arc::make_mut(items);
                if idx >= items.len() {
                    items.resize(idx + 1, State::Null);
                }
                items[idx] = value;
            }
            _ => {}
        }
    }

    /// Builder form of [`State::set`].
    pub fn with<K: Into<StateKey>, V: Into<State>>(mut self, key: K, value: V) -> State {
        self.set(key, value.into());
        self
    }

    /// Remove the slot at `key`, returning its value.
    pub fn remove<K: Into<StateKey>>(&mut self, key: K) -> Option<State> {
        match (self, key.into()) {
            (State::Map(fields), StateKey::Field(name)) => Arc::make_mut(fields).remove(&name),
            (State::List(items), StateKey::Index(idx)) if idx < items.len() => {
                Some(Arc::make_mut(items).remove(idx))
            }
            _ => None,
        }
    }

    /// Convert to a plain JSON value (deep copy).
    pub fn to_json(&self) -> Value {
        match self {
            State::Null => Value::Null,
            State::Bool(b) => Value::Bool(*b),
            State::Number(n) => Value::Number(n.clone()),
            State::String(s) => Value::String(s.to_string()),
            State::List(items) => Value::Array(items.iter().map(State::to_json).collect()),
            State::Map(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Index<&str> for State {
    type Output = State;

    fn index(&self, key: &str) -> &State {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for State {
    type Output = State;

    fn index(&self, idx: usize) -> &State {
        self.get(idx).unwrap_or(&NULL)
    }
}

impl From<Value> for State {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => State::Null,
            Value::Bool(b) => State::Bool(b),
            Value::Number(n) => State::Number(n),
            Value::String(s) => State::String(Arc::from(s)),
            Value::Array(items) => State::List(Arc::new(items.into_iter().map(State::from).collect())),
            Value::Object(fields) => State::Map(Arc::new(
                fields.into_iter().map(|(k, v)| (k, State::from(v))).collect(),
            )),
        }
    }
}

impl From<&State> for Value {
    fn from(state: &State) -> Self {
        state.to_json()
    }
}

impl From<bool> for State {
    fn from(b: bool) -> Self {
        State::Bool(b)
    }
}

impl From<i64> for State {
    fn from(n: i64) -> Self {
        State::Number(n.into())
    }
}

impl From<i32> for State {
    fn from(n: i32) -> Self {
        State::Number(n.into())
    }
}

impl From<u64> for State {
    fn from(n: u64) -> Self {
        State::Number(n.into())
    }
}

impl From<f64> for State {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(State::Number).unwrap_or(State::Null)
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        State::String(Arc::from(s))
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        State::String(Arc::from(s))
    }
}

impl From<Vec<State>> for State {
    fn from(items: Vec<State>) -> Self {
        State::List(Arc::new(items))
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            State::Null => serializer.serialize_unit(),
            State::Bool(b) => serializer.serialize_bool(*b),
            State::Number(n) => n.serialize(serializer),
            State::String(s) => serializer.serialize_str(s),
            State::List(items) => items.as_ref().serialize(serializer),
            State::Map(fields) => fields.as_ref().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(State::from)
    }
}

use std::fmt;

/// Address of one slot inside a container state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// A named field of a keyed container.
    Field(String),
    /// A position in an ordered sequence.
    Index(usize),
}

impl StateKey {
    /// The numeric position this key denotes, if any.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            StateKey::Index(idx) => Some(*idx),
            StateKey::Field(name) => name.parse().ok(),
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Field(name) => f.write_str(name),
            StateKey::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        StateKey::Field(name.to_string())
    }
}

impl From<String> for StateKey {
    fn from(name: String) -> Self {
        StateKey::Field(name)
    }
}

impl From<&String> for StateKey {
    fn from(name: &String) -> Self {
        StateKey::Field(name.clone())
    }
}

impl From<usize> for StateKey {
    fn from(idx: usize) -> Self {
        StateKey::Index(idx)
    }
}

impl From<i32> for StateKey {
    fn from(idx: i32) -> Self {
        match usize::try_from(idx) {
            Ok(idx) => StateKey::Index(idx),
            Err(_) => StateKey::Field(idx.to_string()),
        }
    }
}

impl From<&StateKey> for StateKey {
    fn from(key: &StateKey) -> Self {
        key.clone()
    }
}

//! Immutable, structurally shared state values.

mod key;
mod value;

pub use key::StateKey;
pub use value::State;

//! Compose independent APIs into one namespaced state tree.
//!
//! Each [`Api`] owns a table of action handlers and a default state. Linked
//! together, the nodes of a tree produce a single immutable [`State`]:
//! dispatching at any node walks up to the root, and the root's
//! [`transition`](Api::transition) walks back down, letting every node
//! update its own slice. Action types are namespaced by tree position
//! (`"drawer/OPEN"`), and unchanged slices keep their identity so that
//! consumers can detect change with [`State::same`].
//!
//! ```text
//! dispatch ──→ parent ──→ … ──→ root / store
//!                                  │
//!             transition ←─────────┘
//!   root: handler(type) → children: strip "key/" on the active branch
//! ```

pub mod action;
pub mod api;
pub mod config;
pub mod connect;
pub mod link;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::{Action, ActionCreator, INIT_ACTION_TYPE};
pub use api::{Api, ApiBuilder, ApiError, Effect, Input, Output};
pub use config::{Config, ConfigError};
pub use connect::{Connector, Props};
pub use link::{create_reducer, link, link_store, link_with, named_link, Link};
pub use reducer::{ApiReducer, Reducer};
pub use state::{State, StateKey};
pub use store::{MemoryStore, Store};

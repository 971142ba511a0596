//! API nodes: local state, handlers, namespaced actions and the recursive
//! transition that stitches a tree of them into one state.

mod dispatch;
mod error;
mod node;
mod transition;

pub use dispatch::{Effect, Input, Output};
pub use error::ApiError;
pub use node::{Api, ApiBuilder, Handler, InitialStateFn};

pub(crate) use node::{ApiInner, Attachment};

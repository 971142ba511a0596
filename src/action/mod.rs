//! Actions and action creators.
//!
//! An action is a plain record with a `type` string; creators attach the
//! namespace of the node that produced them.

mod creator;
mod record;

pub use creator::{ActionCreator, ArgsBuilder};
pub use record::{split_type, Action, DEFAULT_SEPARATOR, INIT_ACTION_TYPE};

//! Error types for dispatch, transition and linking.

use thiserror::Error;

/// Errors surfaced by an API tree.
///
/// Nothing is retried or swallowed: every variant reaches the caller of
/// `dispatch`/`transition`/`link` unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The action's `type` is missing, not a string, or empty.
    #[error("Malformed action: {reason}")]
    MalformedAction { reason: String },

    /// A registered handler returned an error.
    #[error("Handler for '{action_type}' failed: {source}")]
    Handler {
        action_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// Linking would make a node its own ancestor.
    #[error("Cannot link '{key}': the child is the parent or one of its ancestors")]
    LinkCycle { key: String },

    /// A child's slice could not be stored in its parent's state, e.g. a
    /// named key under a list.
    #[error("Cannot store child '{key}' in its parent's state")]
    UnwritableSlot { key: String },

    /// The store a node was bound to no longer exists.
    #[error("Store was dropped while a node was still bound to it")]
    StoreDropped,
}

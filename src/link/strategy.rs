//! How a child's slice is read from and written into its parent's state.

use std::fmt;

use crate::state::{State, StateKey};

/// Projection of a child's slice within its parent's state.
///
/// `key` is the child's attachment key; strategies are free to ignore it.
/// `write` only ever receives a container the tree has just cloned for
/// this transition.
pub trait Link: Send + Sync {
    /// Read the child's slice out of the parent's state.
    fn read(&self, key: &str, parent: &State) -> Option<State>;

    /// Write the child's new slice into the parent's state.
    fn write(&self, key: &str, parent: &mut State, child: State);
}

/// Default strategy: the slot named by the child's attachment key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLink;

impl Link for KeyLink {
    fn read(&self, key: &str, parent: &State) -> Option<State> {
        parent.get(key).cloned()
    }

    fn write(&self, key: &str, parent: &mut State, child: State) {
        parent.set(key, child);
    }
}

/// A fixed slot, independent of the attachment key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLink {
    slot: StateKey,
}

impl NamedLink {
    pub fn slot(&self) -> &StateKey {
        &self.slot
    }
}

impl Link for NamedLink {
    fn read(&self, _key: &str, parent: &State) -> Option<State> {
        parent.get(&self.slot).cloned()
    }

    fn write(&self, _key: &str, parent: &mut State, child: State) {
        parent.set(&self.slot, child);
    }
}

/// Link that always uses `slot`, e.g. a field name that differs from the
/// attachment key, or a position in list-shaped state.
pub fn named_link(slot: impl Into<StateKey>) -> NamedLink {
    NamedLink { slot: slot.into() }
}

/// Pass-through: the slice is the whole state.
///
/// Used for nodes bound to a store and for reducers handed to a store.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreLink;

impl Link for StoreLink {
    fn read(&self, _key: &str, parent: &State) -> Option<State> {
        Some(parent.clone())
    }

    fn write(&self, _key: &str, parent: &mut State, child: State) {
        *parent = child;
    }
}

type ReadFn = Box<dyn Fn(&State) -> Option<State> + Send + Sync>;
type WriteFn = Box<dyn Fn(&mut State, State) + Send + Sync>;

/// Closure-backed strategy built by [`custom_link`].
pub struct CustomLink {
    read: ReadFn,
    write: WriteFn,
}

impl Link for CustomLink {
    fn read(&self, _key: &str, parent: &State) -> Option<State> {
        (self.read)(parent)
    }

    fn write(&self, _key: &str, parent: &mut State, child: State) {
        (self.write)(parent, child)
    }
}

impl fmt::Debug for CustomLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomLink")
    }
}

/// Link from a pair of closures.
pub fn custom_link<R, W>(read: R, write: W) -> CustomLink
where
    R: Fn(&State) -> Option<State> + Send + Sync + 'static,
    W: Fn(&mut State, State) + Send + Sync + 'static,
{
    CustomLink {
        read: Box::new(read),
        write: Box::new(write),
    }
}

//! Tree composition: attaching nodes and choosing how their state slices
//! are located inside their parent's state.

mod compose;
mod strategy;

pub use compose::{create_reducer, link, link_store, link_with, unlink};
pub use strategy::{custom_link, named_link, CustomLink, KeyLink, Link, NamedLink, StoreLink};

//! Attaching nodes to each other and to stores.

use std::sync::Arc;

use crate::api::{Api, ApiError, ApiInner, Attachment};
use crate::link::strategy::{KeyLink, Link};
use crate::reducer::ApiReducer;
use crate::store::Store;

/// Attach `child` under `parent` at `key`, using the default key link.
///
/// Returns the child so it can be kept next to the parent:
/// `let drawer = link(&root, "drawer", Api::new())?;`
pub fn link(parent: &Api, key: impl Into<String>, child: Api) -> Result<Api, ApiError> {
    link_with(parent, key, child, KeyLink)
}

/// Attach `child` under `parent` at `key` with a custom link strategy.
///
/// `key` is the namespace segment of the child's actions; `link` decides
/// where its slice lives in the parent's state. A child already linked
/// elsewhere is moved. An existing child under the same key is detached
/// and replaced.
///
/// # Errors
/// Returns [`ApiError::LinkCycle`] if `child` is `parent` or one of its
/// ancestors.
pub fn link_with<L>(parent: &Api, key: impl Into<String>, child: Api, link: L) -> Result<Api, ApiError>
where
    L: Link + 'static,
{
    let key = key.into();

    let mut node = Some(parent.clone());
    while let Some(current) = node {
        if Api::ptr_eq(&current, &child) {
            return Err(ApiError::LinkCycle { key });
        }
        node = current.parent();
    }

    unlink(&child);

    let replaced = parent.child(&key);
    if let Some(old) = &replaced {
        tracing::warn!(
            parent = %parent.id(),
            key = %key,
            old = %old.id(),
            new = %child.id(),
            "replacing linked child"
        );
        unlink(old);
    }

    *child.inner.attachment.write() = Attachment::Child {
        parent: Arc::downgrade(&parent.inner),
        key: key.clone(),
        link: Arc::new(link),
    };
    parent.inner.children.write().push(child.clone());

    tracing::debug!(parent = %parent.id(), child = %child.id(), key = %key, "linked");
    Ok(child)
}

/// Bind `child` to an external store.
///
/// The node's state is the store's whole state, and its dispatches go to
/// the store. Bound nodes do not qualify their action types.
pub fn link_store<S>(store: &Arc<S>, child: Api) -> Api
where
    S: Store + 'static,
{
    unlink(&child);
    let store: Arc<dyn Store> = store.clone();
    *child.inner.attachment.write() = Attachment::Store(Arc::downgrade(&store));
    tracing::debug!(child = %child.id(), "bound to store");
    child
}

/// Detach `child` from its parent or store.
///
/// A detached node falls back to the state it held before it was linked.
pub fn unlink(child: &Api) {
    let previous = std::mem::replace(&mut *child.inner.attachment.write(), Attachment::Detached);
    if let Attachment::Child { parent, key, .. } = previous {
        if let Some(parent) = parent.upgrade() {
            remove_child(&parent, child);
            tracing::debug!(child = %child.id(), key = %key, "unlinked");
        }
    }
}

fn remove_child(parent: &ApiInner, child: &Api) {
    parent
        .children
        .write()
        .retain(|existing| !Api::ptr_eq(existing, child));
}

/// A reducer over the whole tree rooted at `root`, for handing to a store.
pub fn create_reducer(root: &Api) -> ApiReducer {
    ApiReducer::new(root.clone())
}

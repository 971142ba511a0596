//! The recursive state transition of a tree.

use crate::action::{split_type, Action};
use crate::api::error::ApiError;
use crate::api::node::{Api, Attachment};
use crate::state::State;

impl Api {
    /// Compute the next state of the subtree rooted at this node.
    ///
    /// `state` is this node's current slice (`None` while undefined). The
    /// result is the same snapshot when nothing in the subtree reacted to
    /// the action, so callers can detect changes by identity.
    ///
    /// # Errors
    /// Fails on a malformed action type or when any handler in the
    /// subtree fails. Nothing is committed anywhere in that case.
    pub fn transition(
        &self,
        state: Option<&State>,
        action: &Action,
    ) -> Result<Option<State>, ApiError> {
        action.validate()?;
        let separator = self.tree_config().defaults.separator;
        self.transition_with(state, action, separator)
    }

    fn transition_with(
        &self,
        state: Option<&State>,
        action: &Action,
        separator: char,
    ) -> Result<Option<State>, ApiError> {
        let (branch, inner_type) = split_type(&action.action_type, separator);

        tracing::trace!(
            api = %self.inner.id,
            action_type = %action.action_type,
            defined = state.is_some(),
            "visit"
        );

        // Local handlers match the full type as seen at this level.
        let mut own = match self.handler(&action.action_type) {
            Some(handler) => {
                let input = state.cloned().unwrap_or_default();
                let next = handler(&input, action).map_err(|source| ApiError::Handler {
                    action_type: action.action_type.clone(),
                    source,
                })?;
                // A handler that hands back its input made no change.
                if State::same(&next, &input) {
                    None
                } else {
                    Some(next)
                }
            }
            None if state.is_none() => Some(self.initial_state()),
            None => None,
        };

        let children = self.inner.children.read().clone();
        let mut stripped = None;
        for child in &children {
            let Attachment::Child { key, link, .. } = child.attachment() else {
                continue;
            };

            // Only the child on the active branch loses a namespace level;
            // every other child still sees the full action.
            let child_action = if branch == Some(key.as_str()) {
                &*stripped.get_or_insert_with(|| action.retyped(inner_type))
            } else {
                action
            };

            let prev = state.and_then(|s| link.read(&key, s));
            let next = child.transition_with(prev.as_ref(), child_action, separator)?;

            let changed =
                state.is_none() || prev.is_none() || !State::same_opt(prev.as_ref(), next.as_ref());
            if !changed {
                continue;
            }

            let target = own.get_or_insert_with(|| match state {
                Some(s) => s.shallow_clone(),
                None => State::empty_map(),
            });
            if let Some(next) = next {
                tracing::trace!(api = %self.inner.id, key = %key, "write child slice");
                link.write(&key, target, next);
                // A list parent cannot hold a named slot; fail instead of
                // dropping the child's state.
                if link.read(&key, target).is_none() {
                    return Err(ApiError::UnwritableSlot { key });
                }
            }
        }

        Ok(own.or_else(|| state.cloned()))
    }
}

//! The plain action record that flows through a tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiError;

/// Reserved type dispatched by `Api::init`.
pub const INIT_ACTION_TYPE: &str = "@@redux/INIT";

/// Default separator between namespace segments of an action type.
pub const DEFAULT_SEPARATOR: char = '/';

/// An immutable, serializable action.
///
/// `action_type` follows the `segment/segment/.../LEAF_TYPE` convention;
/// each segment names the attachment key of one tree level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            meta: None,
            error: false,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Same action with a different type.
    pub fn retyped(&self, action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            ..self.clone()
        }
    }

    /// Parse an action from an untyped record.
    ///
    /// # Errors
    /// Returns [`ApiError::MalformedAction`] if `type` is missing, is not a
    /// string, or is empty.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value.get("type") {
            None => {
                return Err(ApiError::MalformedAction {
                    reason: "missing `type`".to_string(),
                })
            }
            Some(Value::String(t)) if t.is_empty() => {
                return Err(ApiError::MalformedAction {
                    reason: "empty `type`".to_string(),
                })
            }
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(ApiError::MalformedAction {
                    reason: format!("`type` must be a string, got {}", other),
                })
            }
        }

        serde_json::from_value(value).map_err(|e| ApiError::MalformedAction {
            reason: e.to_string(),
        })
    }

    /// Check the invariants a transition relies on.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.action_type.is_empty() {
            return Err(ApiError::MalformedAction {
                reason: "empty `type`".to_string(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Value> for Action {
    type Error = ApiError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Action::from_value(value)
    }
}

/// Split an action type on its first separator.
///
/// Returns the leading namespace segment (if any) and the remainder.
/// `"drawer/OPEN"` gives `(Some("drawer"), "OPEN")`; `"OPEN"` gives
/// `(None, "OPEN")`.
pub fn split_type(action_type: &str, separator: char) -> (Option<&str>, &str) {
    match action_type.split_once(separator) {
        Some((branch, inner)) => (Some(branch), inner),
        None => (None, action_type),
    }
}

//! Action creators bound to a qualified action type.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::record::Action;

/// Builds a payload or meta value from the creator's arguments.
pub type ArgsBuilder = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A reusable factory for actions of one (namespace-qualified) type.
#[derive(Clone)]
pub struct ActionCreator {
    action_type: String,
    payload: Option<ArgsBuilder>,
    meta: Option<ArgsBuilder>,
}

impl ActionCreator {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            meta: None,
        }
    }

    pub fn with_payload_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.payload = Some(Arc::new(builder));
        self
    }

    pub fn with_meta_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(builder));
        self
    }

    pub(crate) fn with_builders(
        mut self,
        payload: Option<ArgsBuilder>,
        meta: Option<ArgsBuilder>,
    ) -> Self {
        self.payload = payload;
        self.meta = meta;
        self
    }

    /// The fully qualified type every created action carries.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Build an action from `args`.
    ///
    /// The payload is the payload builder's result, or the first argument
    /// when no builder was given. Meta is only set with a meta builder.
    pub fn call(&self, args: &[Value]) -> Action {
        let payload = match &self.payload {
            Some(build) => Some(build(args)),
            None => args.first().cloned(),
        };
        Action {
            action_type: self.action_type.clone(),
            payload,
            meta: self.meta.as_ref().map(|build| build(args)),
            error: false,
        }
    }

    /// Build an action with no arguments.
    pub fn empty(&self) -> Action {
        self.call(&[])
    }

    /// Build an action carrying one argument as its payload.
    pub fn with(&self, arg: Value) -> Action {
        self.call(std::slice::from_ref(&arg))
    }

    /// Build an error action.
    ///
    /// The error's message is the single argument, and the action is
    /// flagged with `error: true`.
    pub fn fail(&self, err: &dyn fmt::Display) -> Action {
        let mut action = self.with(Value::String(err.to_string()));
        action.error = true;
        action
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("payload", &self.payload.is_some())
            .field("meta", &self.meta.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_argument_is_default_payload() {
        let creator = ActionCreator::new("TEST");
        let action = creator.with(json!({"my": "action"}));
        assert_eq!(action.action_type, "TEST");
        assert_eq!(action.payload, Some(json!({"my": "action"})));
        assert_eq!(action.meta, None);
        assert!(!action.error);
    }

    #[test]
    fn no_arguments_means_no_payload() {
        let action = ActionCreator::new("TEST").empty();
        assert_eq!(action.payload, None);
    }

    #[test]
    fn builders_receive_all_arguments() {
        let creator = ActionCreator::new("ADD")
            .with_payload_builder(|args| json!(args.len()))
            .with_meta_builder(|args| args.last().cloned().unwrap_or(Value::Null));
        let action = creator.call(&[json!(1), json!(2), json!("tag")]);
        assert_eq!(action.payload, Some(json!(3)));
        assert_eq!(action.meta, Some(json!("tag")));
    }

    #[test]
    fn fail_sets_error_flag() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let action = ActionCreator::new("LOAD").fail(&err);
        assert!(action.error);
        assert_eq!(action.payload, Some(json!("disk gone")));
    }

    #[test]
    fn fail_runs_payload_builder() {
        let creator =
            ActionCreator::new("LOAD").with_payload_builder(|args| json!({ "wrapped": args[0] }));
        let action = creator.fail(&"nope");
        assert!(action.error);
        assert_eq!(action.payload, Some(json!({"wrapped": "nope"})));
    }
}

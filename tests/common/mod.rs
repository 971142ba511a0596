//! Shared test fixtures: small domain APIs built on `Api`.

#![allow(dead_code, unused_imports)]

use redux_apis::config::LoggingConfig;
use redux_apis::{link, Action, Api, ApiError, State};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// A drawer that can be opened and closed.
#[derive(Clone)]
pub struct DrawerApi {
    api: Api,
}

impl DrawerApi {
    pub fn new() -> Self {
        Self::with_state(None)
    }

    /// A drawer holding `state` while it is a root.
    pub fn with_state(state: Option<State>) -> Self {
        let mut builder = Api::builder()
            .name("drawer")
            .initial_state(State::from(json!({"open": false})));
        if let Some(state) = state {
            builder = builder.state(state);
        }
        let api = builder.build();
        api.set_handler("OPEN", |state, _| state.clone().with("open", true));
        api.set_handler("CLOSE", |state, _| state.clone().with("open", false));
        Self { api }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn is_open(&self) -> bool {
        self.api
            .get_state()
            .and_then(|s| s["open"].as_bool())
            .unwrap_or(false)
    }

    pub fn open(&self) -> Result<Action, ApiError> {
        self.api.dispatch(self.api.create_action("OPEN").empty())
    }

    pub fn close(&self) -> Result<Action, ApiError> {
        self.api.dispatch(self.api.create_action("CLOSE").empty())
    }
}

/// An API with its own action that also listens to a nested drawer.
#[derive(Clone)]
pub struct AnotherApi {
    api: Api,
    pub drawer: DrawerApi,
}

impl AnotherApi {
    pub fn new() -> Self {
        let api = Api::builder()
            .name("another")
            .initial_state(State::from(json!({
                "drawerOpen": false,
                "anotherFired": false,
            })))
            .build();

        api.set_handler("ANOTHER_ACTION", |state, _| {
            state.clone().with("anotherFired", true)
        });

        let drawer = DrawerApi::new();
        link(&api, "drawer", drawer.api().clone()).expect("fresh drawer cannot form a cycle");

        // Listen for `OPEN` on the nested drawer.
        api.set_handler("drawer/OPEN", |state, _| state.clone().with("drawerOpen", true));

        Self { api, drawer }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn another_fired(&self) -> bool {
        flag(&self.api, "anotherFired")
    }

    pub fn drawer_open(&self) -> bool {
        flag(&self.api, "drawerOpen")
    }

    pub fn fire_another(&self) -> Result<Action, ApiError> {
        self.api
            .dispatch(self.api.create_action("ANOTHER_ACTION").empty())
    }

    /// Open the drawer by dispatching the qualified type from here.
    pub fn open_drawer(&self) -> Result<Action, ApiError> {
        self.api.dispatch(self.api.create_action("drawer/OPEN").empty())
    }
}

fn flag(api: &Api, name: &str) -> bool {
    api.get_state()
        .and_then(|s| s[name].as_bool())
        .unwrap_or(false)
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Route test logs to a temp file.
pub fn init_test_logging(dir: &TempDir) -> Option<PathBuf> {
    let config = LoggingConfig {
        level: "trace".to_string(),
        file: Some(dir.path().join("test.log")),
    };
    redux_apis::logging::init_tracing(&config)
}

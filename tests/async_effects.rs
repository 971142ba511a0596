mod common;

use std::time::Duration;

use common::DrawerApi;
use redux_apis::{link, Action, Api, ApiError, Input, State};

#[tokio::test]
async fn effect_may_return_a_future() {
    let root = Api::new();
    let drawer = DrawerApi::new();
    link(&root, "drawer", drawer.api().clone()).unwrap();
    root.init().unwrap();

    let open = drawer.api().create_action("OPEN");
    let close = drawer.api().create_action("CLOSE");

    let pending = drawer
        .api()
        .send(Input::effect(move |api: &Api| {
            let api = api.clone();
            async move {
                api.dispatch(open.empty())?;
                tokio::time::sleep(Duration::from_millis(5)).await;
                api.dispatch(close.empty())?;
                Ok::<Option<State>, ApiError>(api.get_state())
            }
        }))
        .unwrap()
        .into_value()
        .expect("effect output");

    // Nothing runs until the future is polled.
    assert!(!drawer.is_open());

    let state = pending.await.unwrap().unwrap();
    assert_eq!(state["drawer"]["open"].as_bool(), Some(false));
}

#[tokio::test]
async fn dispatches_interleave_across_await_points() {
    let root = Api::new();
    let drawer = DrawerApi::new();
    link(&root, "drawer", drawer.api().clone()).unwrap();
    root.init().unwrap();

    let task = {
        let api = root.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            api.dispatch(Action::new("drawer/OPEN"))
        })
    };

    assert!(!drawer.is_open());
    task.await.unwrap().unwrap();
    assert!(drawer.is_open());
}

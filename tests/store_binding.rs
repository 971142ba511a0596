mod common;

use common::{AnotherApi, DrawerApi};
use redux_apis::{create_reducer, link_store, Action, Api, ApiError, MemoryStore, Reducer, State, Store};
use serde_json::json;

fn bind(another: &AnotherApi) -> std::sync::Arc<MemoryStore> {
    let store = MemoryStore::new(create_reducer(another.api())).unwrap();
    link_store(&store, another.api().clone());
    store
}

#[test]
fn store_init_populates_tree() {
    let another = AnotherApi::new();
    let store = bind(&another);

    let state = store.get_state().unwrap();
    assert_eq!(state["anotherFired"].as_bool(), Some(false));
    assert_eq!(state["drawer"]["open"].as_bool(), Some(false));
    assert!(State::same(&state, &another.api().get_state().unwrap()));
}

#[test]
fn bound_api_dispatches_through_store() {
    let another = AnotherApi::new();
    let store = bind(&another);

    another.fire_another().unwrap();
    assert!(another.another_fired());
    assert_eq!(store.get_state().unwrap()["anotherFired"].as_bool(), Some(true));
}

#[test]
fn bound_api_types_are_unqualified() {
    let another = AnotherApi::new();
    let _store = bind(&another);
    assert!(another.api().is_store_bound());
    assert_eq!(
        another.drawer.api().create_action("OPEN").empty().action_type,
        "drawer/OPEN"
    );
    assert_eq!(
        another.api().create_action("ANOTHER_ACTION").empty().action_type,
        "ANOTHER_ACTION"
    );
}

#[test]
fn two_stores_stay_independent() {
    let first = AnotherApi::new();
    let second = AnotherApi::new();
    let store_one = bind(&first);
    let store_two = bind(&second);

    first.drawer.open().unwrap();

    assert!(first.drawer.is_open());
    assert!(first.drawer_open());
    assert!(!second.drawer.is_open());
    assert!(!second.drawer_open());
    assert_eq!(store_one.get_state().unwrap()["drawer"]["open"].as_bool(), Some(true));
    assert_eq!(store_two.get_state().unwrap()["drawer"]["open"].as_bool(), Some(false));
}

#[test]
fn reducer_is_transition_of_root() {
    let drawer = DrawerApi::new();
    let reducer = create_reducer(drawer.api());
    let state = reducer.reduce(None, &Action::new("INIT")).unwrap().unwrap();
    let opened = reducer.reduce(Some(&state), &Action::new("OPEN")).unwrap().unwrap();
    assert_eq!(state["open"].as_bool(), Some(false));
    assert_eq!(opened["open"].as_bool(), Some(true));
    assert!(Api::ptr_eq(reducer.root(), drawer.api()));
}

#[test]
fn preloaded_store_state_is_respected() {
    let drawer = DrawerApi::new();
    let store = MemoryStore::with_state(
        create_reducer(drawer.api()),
        Some(State::from(json!({"open": true}))),
    )
    .unwrap();
    link_store(&store, drawer.api().clone());
    assert!(drawer.is_open());
}

#[test]
fn dropped_store_is_reported() {
    let drawer = DrawerApi::new();
    let store = MemoryStore::new(create_reducer(drawer.api())).unwrap();
    link_store(&store, drawer.api().clone());
    drop(store);
    assert!(matches!(drawer.open(), Err(ApiError::StoreDropped)));
}

#[test]
fn effect_on_bound_api_uses_store() {
    let another = AnotherApi::new();
    let store = bind(&another);
    let fired = another.drawer.api().run(|root: &Api| {
        root.dispatch(root.create_action("ANOTHER_ACTION").empty())
            .map(|_| root.get_state().unwrap()["anotherFired"].as_bool())
    });
    assert_eq!(fired.unwrap(), Some(true));
    assert_eq!(store.get_state().unwrap()["anotherFired"].as_bool(), Some(true));
}

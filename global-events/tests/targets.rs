//! Target selection.

use global_events::{
    BindingConfig, BindingError, EventListenerOptions, ListenerOptions, TargetName, handler_map,
    testing::{CallCounter, TestEvent},
};

mod common;
use common::Fixture;

#[test]
fn test_supports_window_target() {
    let counter = CallCounter::new();
    let fixture = Fixture::mounted_with(
        handler_map! { "~!keydown" => counter.handler() },
        BindingConfig::new().with_target("window"),
    );

    assert!(fixture.env.document().calls().is_empty());
    let adds = fixture.env.window().adds();
    assert_eq!(adds.len(), 1);
    assert_eq!(adds[0].event, "keydown");
    assert_eq!(
        adds[0].options,
        ListenerOptions::Structured(EventListenerOptions {
            capture: true,
            once: true,
            passive: false,
        })
    );

    fixture.env.window().dispatch(&TestEvent::new("keydown"));
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_named_target() {
    let counter = CallCounter::new();
    let mut fixture = Fixture::new();
    let body = fixture.env.add_target("body");
    fixture
        .controller
        .mount(
            handler_map! { "click" => counter.handler() },
            BindingConfig::new().with_target("body"),
        )
        .unwrap();
    body.dispatch(&TestEvent::new("click"));
    assert_eq!(counter.count(), 1);

    fixture.controller.unmount().unwrap();
    assert_eq!(body.listener_count(), 0);
}

#[test]
fn test_unknown_target_is_an_error() {
    let counter = CallCounter::new();
    let mut fixture = Fixture::new();
    let err = fixture
        .controller
        .mount(
            handler_map! { "click" => counter.handler() },
            BindingConfig::new().with_target("nowhere"),
        )
        .unwrap_err();
    match err {
        BindingError::UnknownTarget(name) => assert_eq!(name, TargetName::from("nowhere")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(fixture.controller.bindings().is_empty());
}

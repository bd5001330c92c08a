#![allow(dead_code)]

use global_events::{
    BindingConfig, HandlerMap, LifecycleController,
    testing::{TestEnvironment, TestEvent},
};
use std::rc::Rc;

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    pub env: Rc<TestEnvironment<TestEvent>>,
    pub controller: LifecycleController<TestEvent>,
}

impl Fixture {
    pub fn new() -> Self {
        let env = Rc::new(TestEnvironment::new());
        let controller = LifecycleController::new(env.clone());
        Self { env, controller }
    }

    /// Mount with the default configuration.
    pub fn mounted(handlers: HandlerMap<TestEvent>) -> Self {
        Self::mounted_with(handlers, BindingConfig::new())
    }

    pub fn mounted_with(handlers: HandlerMap<TestEvent>, config: BindingConfig<TestEvent>) -> Self {
        let mut fixture = Self::new();
        fixture
            .controller
            .mount(handlers, config)
            .expect("mount should succeed");
        fixture
    }

    pub fn dispatch_document(&self, event_type: &str) -> usize {
        self.env.document().dispatch(&TestEvent::new(event_type))
    }
}

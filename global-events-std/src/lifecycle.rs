//! Component lifecycle state machine.
//!
//! The host framework calls one entry point per lifecycle signal:
//!
//! | Signal         | From                    | To            |
//! |----------------|-------------------------|---------------|
//! | [`mount`]      | `Unmounted`             | `Active`      |
//! | [`update`]     | `Active` / `Deactivated`| unchanged     |
//! | [`deactivate`] | `Active`                | `Deactivated` |
//! | [`activate`]   | `Deactivated`           | `Active`      |
//! | [`unmount`]    | `Active` / `Deactivated`| `Unmounted`   |
//!
//! Any other signal is ignored.
//!
//! [`mount`]: LifecycleController::mount
//! [`update`]: LifecycleController::update
//! [`deactivate`]: LifecycleController::deactivate
//! [`activate`]: LifecycleController::activate
//! [`unmount`]: LifecycleController::unmount

use crate::binding::BindingSet;
use global_events_core::{BindingConfig, BindingError, Environment, HandlerMap, NativeEvent};
use std::{fmt, rc::Rc};

/// Where a component is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Not mounted; nothing remembered.
    Unmounted,
    /// Mounted and listening.
    Active,
    /// Kept alive but hidden; configuration remembered, nothing attached.
    Deactivated,
}

/// Drives a component's bindings through its lifecycle.
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = LifecycleController::new(env);
/// controller.mount(handler_map! { "!keydown" => on_key }, BindingConfig::new())?;
/// controller.deactivate()?;
/// controller.activate()?;
/// controller.unmount()?;
/// ```
pub struct LifecycleController<E: NativeEvent> {
    env: Rc<dyn Environment<E>>,
    state: LifecycleState,
    handlers: HandlerMap<E>,
    config: BindingConfig<E>,
    bindings: BindingSet<E>,
}

impl<E: NativeEvent> LifecycleController<E> {
    /// Create an unmounted controller resolving targets through `env`.
    pub fn new(env: Rc<dyn Environment<E>>) -> Self {
        Self {
            env,
            state: LifecycleState::Unmounted,
            handlers: HandlerMap::new(),
            config: BindingConfig::new(),
            bindings: BindingSet::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The handler map last supplied.
    pub fn handlers(&self) -> &HandlerMap<E> {
        &self.handlers
    }

    /// The configuration last supplied.
    pub fn config(&self) -> &BindingConfig<E> {
        &self.config
    }

    /// Currently attached bindings.
    pub fn bindings(&self) -> &BindingSet<E> {
        &self.bindings
    }

    /// Attach every handler of `handlers` and become active.
    ///
    /// If an attach fails the controller is still active with the bindings
    /// attached so far, so a later [`unmount`](Self::unmount) releases them.
    pub fn mount(
        &mut self,
        handlers: HandlerMap<E>,
        config: BindingConfig<E>,
    ) -> Result<(), BindingError> {
        if self.state != LifecycleState::Unmounted {
            #[cfg(feature = "tracing")]
            tracing::debug!(state = ?self.state, "mount ignored");
            return Ok(());
        }
        self.handlers = handlers;
        self.config = config;
        self.state = LifecycleState::Active;

        #[cfg(feature = "tracing")]
        tracing::debug!(handlers = self.handlers.len(), target = %self.config.target(), "mounted");

        self.bindings
            .attach_all(&self.handlers, &self.config, self.env.as_ref())
    }

    /// Supply a new handler map and configuration.
    ///
    /// While active, a pure handler change is reconciled incrementally; a
    /// changed target, filter or delivery flag rebinds everything. While
    /// deactivated the new values are only remembered.
    pub fn update(
        &mut self,
        handlers: HandlerMap<E>,
        config: BindingConfig<E>,
    ) -> Result<(), BindingError> {
        match self.state {
            LifecycleState::Unmounted => {
                #[cfg(feature = "tracing")]
                tracing::debug!("update ignored while unmounted");
                Ok(())
            }
            LifecycleState::Deactivated => {
                self.handlers = handlers;
                self.config = config;
                Ok(())
            }
            LifecycleState::Active => {
                let old = std::mem::replace(&mut self.handlers, handlers);
                if config != self.config {
                    self.config = config;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        target = %self.config.target(),
                        "configuration changed, rebinding"
                    );
                    let detached = self.bindings.detach_all();
                    self.bindings
                        .attach_all(&self.handlers, &self.config, self.env.as_ref())?;
                    return detached;
                }
                self.bindings
                    .reconcile(&old, &self.handlers, &self.config, self.env.as_ref())
            }
        }
    }

    /// Detach everything but remember the configuration.
    pub fn deactivate(&mut self) -> Result<(), BindingError> {
        if self.state != LifecycleState::Active {
            #[cfg(feature = "tracing")]
            tracing::debug!(state = ?self.state, "deactivate ignored");
            return Ok(());
        }
        self.state = LifecycleState::Deactivated;

        #[cfg(feature = "tracing")]
        tracing::debug!(bindings = self.bindings.len(), "deactivated");

        self.bindings.detach_all()
    }

    /// Reattach the remembered handlers as if freshly mounted.
    pub fn activate(&mut self) -> Result<(), BindingError> {
        if self.state != LifecycleState::Deactivated {
            #[cfg(feature = "tracing")]
            tracing::debug!(state = ?self.state, "activate ignored");
            return Ok(());
        }
        self.state = LifecycleState::Active;

        #[cfg(feature = "tracing")]
        tracing::debug!(handlers = self.handlers.len(), "activated");

        self.bindings
            .attach_all(&self.handlers, &self.config, self.env.as_ref())
    }

    /// Detach everything and forget the configuration.
    pub fn unmount(&mut self) -> Result<(), BindingError> {
        if self.state == LifecycleState::Unmounted {
            #[cfg(feature = "tracing")]
            tracing::debug!("unmount ignored");
            return Ok(());
        }
        self.state = LifecycleState::Unmounted;
        self.handlers = HandlerMap::new();
        self.config = BindingConfig::new();

        #[cfg(feature = "tracing")]
        tracing::debug!(bindings = self.bindings.len(), "unmounted");

        self.bindings.detach_all()
    }
}

impl<E: NativeEvent> Drop for LifecycleController<E> {
    fn drop(&mut self) {
        if self.bindings.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            bindings = self.bindings.len(),
            "controller dropped with live bindings, detaching"
        );
        let result = self.bindings.detach_all();
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "detach failed during drop");
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = result;
        }
    }
}

impl<E: NativeEvent> fmt::Debug for LifecycleController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleController")
            .field("state", &self.state)
            .field("handlers", &self.handlers)
            .field("config", &self.config)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallCounter, TestEnvironment, TestEvent};
    use global_events_core::{Handler, handler_map};

    fn setup() -> (Rc<TestEnvironment<TestEvent>>, LifecycleController<TestEvent>) {
        let env = Rc::new(TestEnvironment::new());
        let controller = LifecycleController::new(env.clone());
        (env, controller)
    }

    #[test]
    fn test_mount_attaches() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        controller
            .mount(
                handler_map! { "keydown" => counter.handler() },
                BindingConfig::new(),
            )
            .unwrap();
        assert_eq!(controller.state(), LifecycleState::Active);
        assert_eq!(env.document().dispatch(&TestEvent::new("keydown")), 1);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_unmount_detaches_and_forgets() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        controller
            .mount(
                handler_map! { "keydown" => counter.handler() },
                BindingConfig::new().with_target("window"),
            )
            .unwrap();
        controller.unmount().unwrap();
        assert_eq!(controller.state(), LifecycleState::Unmounted);
        assert!(controller.handlers().is_empty());
        assert_eq!(controller.config(), &BindingConfig::new());
        assert_eq!(env.window().listener_count(), 0);
        assert_eq!(env.window().removes().len(), 1);
    }

    #[test]
    fn test_invalid_signals_are_noops() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();

        controller.activate().unwrap();
        controller.deactivate().unwrap();
        controller.unmount().unwrap();
        controller
            .update(handler_map! { "keydown" => counter.handler() }, BindingConfig::new())
            .unwrap();
        assert_eq!(controller.state(), LifecycleState::Unmounted);
        assert!(env.document().calls().is_empty());

        controller
            .mount(handler_map! { "keydown" => counter.handler() }, BindingConfig::new())
            .unwrap();
        controller.activate().unwrap();
        controller
            .mount(handler_map! { "keyup" => counter.handler() }, BindingConfig::new())
            .unwrap();
        assert_eq!(env.document().adds().len(), 1);

        controller.deactivate().unwrap();
        controller.deactivate().unwrap();
        assert_eq!(env.document().removes().len(), 1);
    }

    #[test]
    fn test_update_while_deactivated_is_remembered() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        controller
            .mount(handler_map! { "keydown" => counter.handler() }, BindingConfig::new())
            .unwrap();
        controller.deactivate().unwrap();
        env.document().clear_calls();

        controller
            .update(handler_map! { "keyup" => counter.handler() }, BindingConfig::new())
            .unwrap();
        assert!(env.document().calls().is_empty());

        controller.activate().unwrap();
        let adds = env.document().adds();
        assert_eq!(adds.len(), 1);
        assert_eq!(adds[0].event, "keyup");
    }

    #[test]
    fn test_config_change_rebinds_on_new_target() {
        let (env, mut controller) = setup();
        let handler: Handler<TestEvent> = CallCounter::new().handler();
        let handlers = handler_map! { "!keydown" => handler };
        controller
            .mount(handlers.clone(), BindingConfig::new())
            .unwrap();
        controller
            .update(handlers, BindingConfig::new().with_target("window"))
            .unwrap();

        assert_eq!(env.document().listener_count(), 0);
        assert_eq!(env.document().removes().len(), 1);
        assert_eq!(env.window().listener_count(), 1);
        let add = &env.window().adds()[0];
        assert_eq!(add.event, "keydown");
        assert!(add.options.capture());
    }

    #[test]
    fn test_same_config_does_not_rebind() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        let handlers = handler_map! { "keydown" => counter.handler() };
        let config = BindingConfig::new()
            .with_filter(|_: &TestEvent, _: &Handler<TestEvent>, _: &str| true);
        controller.mount(handlers.clone(), config.clone()).unwrap();
        controller.update(handlers, config).unwrap();
        assert_eq!(env.document().adds().len(), 1);
        assert!(env.document().removes().is_empty());
    }

    #[test]
    fn test_drop_detaches_live_bindings() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        controller
            .mount(
                handler_map! {
                    "keydown" => counter.handler(),
                    "keyup" => counter.handler(),
                },
                BindingConfig::new(),
            )
            .unwrap();
        drop(controller);
        assert_eq!(env.document().listener_count(), 0);
        let removed: Vec<_> = env.document().removes().into_iter().map(|c| c.event).collect();
        assert_eq!(removed, ["keydown", "keyup"]);
    }

    #[test]
    fn test_failed_mount_keeps_partial_bindings() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        env.document().fail_after(1, "quota exceeded");
        let err = controller
            .mount(
                handler_map! {
                    "keydown" => counter.handler(),
                    "keyup" => counter.handler(),
                },
                BindingConfig::new(),
            )
            .unwrap_err();
        assert!(matches!(err, BindingError::Attach { ref event, .. } if event == "keyup"));
        assert_eq!(controller.state(), LifecycleState::Active);
        assert_eq!(controller.bindings().len(), 1);

        controller.unmount().unwrap();
        assert_eq!(env.document().listener_count(), 0);
    }

    #[test]
    fn test_update_after_failed_mount_attaches_missing() {
        let (env, mut controller) = setup();
        let counter = CallCounter::new();
        let handlers = handler_map! {
            "keydown" => counter.handler(),
            "keyup" => counter.handler(),
        };
        env.document().fail_after(1, "quota exceeded");
        controller.mount(handlers.clone(), BindingConfig::new()).unwrap_err();
        assert_eq!(controller.bindings().len(), 1);

        controller.update(handlers, BindingConfig::new()).unwrap();
        assert_eq!(controller.bindings().len(), 2);
        assert_eq!(env.document().dispatch(&TestEvent::new("keyup")), 1);
        assert_eq!(counter.count(), 1);
    }
}

//! Testing utilities for global-events.
//!
//! # Features
//!
//! - [`RecordingTarget`]: A target that records every registration call and
//!   dispatches events to its live listeners
//! - [`TestEnvironment`]: A document and a window target with a switchable
//!   legacy-options flag
//! - [`TestEvent`]: A native event that remembers `prevent_default` and
//!   `stop_propagation`
//! - [`CallCounter`]: Produces handlers that count their invocations

use global_events_core::{
    BoxError, Environment, EventListener, EventTarget, Handler, ListenerOptions, NativeEvent,
    TargetName,
};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

// ============================================================================
// Test Event
// ============================================================================

/// A minimal native event.
#[derive(Debug, Clone)]
pub struct TestEvent {
    event_type: String,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl TestEvent {
    /// Create an event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Whether a listener called `prevent_default`.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Whether a listener called `stop_propagation`.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl NativeEvent for TestEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

// ============================================================================
// Recording Target
// ============================================================================

/// Kind of registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `add_event_listener`
    Add,
    /// `remove_event_listener`
    Remove,
}

/// One registration call, with its exact arguments.
pub struct RecordedCall<E> {
    /// Which method was called.
    pub kind: CallKind,
    /// Event name argument.
    pub event: String,
    /// Listener argument.
    pub listener: EventListener<E>,
    /// Options argument.
    pub options: ListenerOptions,
}

impl<E> Clone for RecordedCall<E> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            event: self.event.clone(),
            listener: self.listener.clone(),
            options: self.options,
        }
    }
}

impl<E> fmt::Debug for RecordedCall<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedCall")
            .field("kind", &self.kind)
            .field("event", &self.event)
            .field("listener", &self.listener)
            .field("options", &self.options)
            .finish()
    }
}

struct Registration<E> {
    event: String,
    listener: EventListener<E>,
    options: ListenerOptions,
}

impl<E> Registration<E> {
    // Registrations are keyed by event, listener identity and capture flag.
    fn matches(&self, event: &str, listener: &EventListener<E>, options: ListenerOptions) -> bool {
        self.event == event
            && self.listener.ptr_eq(listener)
            && self.options.capture() == options.capture()
    }
}

impl<E> Clone for Registration<E> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            listener: self.listener.clone(),
            options: self.options,
        }
    }
}

/// A target that records registration calls and dispatches synchronously.
///
/// # Example
///
/// ```rust,ignore
/// let document = RecordingTarget::<TestEvent>::new();
/// // ... mount a controller against it ...
/// document.dispatch(&TestEvent::new("keydown"));
/// assert_eq!(document.removes().len(), 0);
/// ```
pub struct RecordingTarget<E> {
    calls: RefCell<Vec<RecordedCall<E>>>,
    registrations: RefCell<Vec<Registration<E>>>,
    failure: RefCell<Option<(usize, String)>>,
}

impl<E: NativeEvent> RecordingTarget<E> {
    /// Create a target with no listeners.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            registrations: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
        }
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall<E>> {
        self.calls.borrow().clone()
    }

    /// Recorded `add_event_listener` calls.
    pub fn adds(&self) -> Vec<RecordedCall<E>> {
        self.calls_of(CallKind::Add)
    }

    /// Recorded `remove_event_listener` calls.
    pub fn removes(&self) -> Vec<RecordedCall<E>> {
        self.calls_of(CallKind::Remove)
    }

    /// Forget recorded calls; live listeners stay registered.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Make the next registration call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.fail_after(0, message);
    }

    /// Let `successes` registration calls through, then fail one with `message`.
    pub fn fail_after(&self, successes: usize, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some((successes, message.into()));
    }

    /// Deliver `event` to every live listener for its type.
    ///
    /// Returns the number of listeners invoked. Listeners removed by an
    /// earlier listener of the same dispatch are skipped.
    pub fn dispatch(&self, event: &E) -> usize {
        let matching: Vec<Registration<E>> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.event == event.event_type())
            .cloned()
            .collect();

        let mut invoked = 0;
        for registration in matching {
            let still_registered = self.registrations.borrow().iter().any(|r| {
                r.matches(
                    &registration.event,
                    &registration.listener,
                    registration.options,
                )
            });
            if !still_registered {
                continue;
            }
            if registration.options.once() {
                self.registrations.borrow_mut().retain(|r| {
                    !r.matches(&registration.event, &registration.listener, registration.options)
                });
            }
            registration.listener.call(event);
            invoked += 1;
        }
        invoked
    }

    fn calls_of(&self, kind: CallKind) -> Vec<RecordedCall<E>> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.kind == kind)
            .cloned()
            .collect()
    }

    fn take_failure(&self) -> Result<(), BoxError> {
        let mut failure = self.failure.borrow_mut();
        match failure.take() {
            Some((0, message)) => Err(message.into()),
            Some((remaining, message)) => {
                *failure = Some((remaining - 1, message));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record(
        &self,
        kind: CallKind,
        event: &str,
        listener: &EventListener<E>,
        options: ListenerOptions,
    ) {
        self.calls.borrow_mut().push(RecordedCall {
            kind,
            event: event.to_owned(),
            listener: listener.clone(),
            options,
        });
    }
}

impl<E: NativeEvent> Default for RecordingTarget<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NativeEvent> EventTarget<E> for RecordingTarget<E> {
    fn add_event_listener(
        &self,
        event: &str,
        listener: &EventListener<E>,
        options: ListenerOptions,
    ) -> Result<(), BoxError> {
        self.take_failure()?;
        self.record(CallKind::Add, event, listener, options);
        let mut registrations = self.registrations.borrow_mut();
        if !registrations
            .iter()
            .any(|r| r.matches(event, listener, options))
        {
            registrations.push(Registration {
                event: event.to_owned(),
                listener: listener.clone(),
                options,
            });
        }
        Ok(())
    }

    fn remove_event_listener(
        &self,
        event: &str,
        listener: &EventListener<E>,
        options: ListenerOptions,
    ) -> Result<(), BoxError> {
        self.take_failure()?;
        self.record(CallKind::Remove, event, listener, options);
        self.registrations
            .borrow_mut()
            .retain(|r| !r.matches(event, listener, options));
        Ok(())
    }
}

// ============================================================================
// Test Environment
// ============================================================================

/// An environment with a document, a window and optional named targets.
pub struct TestEnvironment<E> {
    document: Rc<RecordingTarget<E>>,
    window: Rc<RecordingTarget<E>>,
    named: RefCell<Vec<(String, Rc<RecordingTarget<E>>)>>,
    legacy: Cell<bool>,
    capability_queries: Cell<usize>,
}

impl<E: NativeEvent> TestEnvironment<E> {
    /// Create an environment supporting structured options.
    pub fn new() -> Self {
        Self {
            document: Rc::new(RecordingTarget::new()),
            window: Rc::new(RecordingTarget::new()),
            named: RefCell::new(Vec::new()),
            legacy: Cell::new(false),
            capability_queries: Cell::new(0),
        }
    }

    /// The document target.
    pub fn document(&self) -> Rc<RecordingTarget<E>> {
        Rc::clone(&self.document)
    }

    /// The window target.
    pub fn window(&self) -> Rc<RecordingTarget<E>> {
        Rc::clone(&self.window)
    }

    /// Register an extra target resolvable as `TargetName::Named(name)`.
    pub fn add_target(&self, name: impl Into<String>) -> Rc<RecordingTarget<E>> {
        let target = Rc::new(RecordingTarget::new());
        self.named
            .borrow_mut()
            .push((name.into(), Rc::clone(&target)));
        target
    }

    /// Switch legacy-options mode on or off.
    pub fn set_legacy(&self, legacy: bool) {
        self.legacy.set(legacy);
    }

    /// How many times the engine asked for option support.
    pub fn capability_queries(&self) -> usize {
        self.capability_queries.get()
    }
}

impl<E: NativeEvent> Default for TestEnvironment<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NativeEvent> Environment<E> for TestEnvironment<E> {
    fn resolve_target(&self, name: &TargetName) -> Option<Rc<dyn EventTarget<E>>> {
        let target: Rc<dyn EventTarget<E>> = match name {
            TargetName::Document => self.document.clone(),
            TargetName::Window => self.window.clone(),
            TargetName::Named(name) => self
                .named
                .borrow()
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, target)| Rc::clone(target))?,
        };
        Some(target)
    }

    fn supports_listener_options(&self) -> bool {
        self.capability_queries.set(self.capability_queries.get() + 1);
        !self.legacy.get()
    }
}

// ============================================================================
// Call Counter
// ============================================================================

/// Hands out handlers that increment a shared counter.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CallCounter::new();
/// let handlers = handler_map! { "keydown" => counter.handler() };
/// // ... dispatch ...
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<usize>>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new handler instance bumping this counter.
    pub fn handler<E: 'static>(&self) -> Handler<E> {
        let count = Rc::clone(&self.count);
        Handler::new(move |_: &E| count.set(count.get() + 1))
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset to zero.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use global_events_core::EventListenerOptions;

    fn capture() -> ListenerOptions {
        ListenerOptions::Structured(EventListenerOptions {
            capture: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let target = RecordingTarget::<TestEvent>::new();
        let listener = EventListener::new(|_: &TestEvent| {});
        target
            .add_event_listener("keydown", &listener, capture())
            .unwrap();
        target
            .add_event_listener("keydown", &listener, ListenerOptions::Legacy(true))
            .unwrap();
        assert_eq!(target.adds().len(), 2);
        assert_eq!(target.listener_count(), 1);
    }

    #[test]
    fn test_remove_requires_matching_capture() {
        let target = RecordingTarget::<TestEvent>::new();
        let listener = EventListener::new(|_: &TestEvent| {});
        target
            .add_event_listener("keydown", &listener, capture())
            .unwrap();
        target
            .remove_event_listener("keydown", &listener, ListenerOptions::Legacy(false))
            .unwrap();
        assert_eq!(target.listener_count(), 1);
        target
            .remove_event_listener("keydown", &listener, capture())
            .unwrap();
        assert_eq!(target.listener_count(), 0);
    }

    #[test]
    fn test_once_listener_runs_once() {
        let target = RecordingTarget::<TestEvent>::new();
        let counter = Rc::new(Cell::new(0));
        let listener = {
            let counter = counter.clone();
            EventListener::new(move |_: &TestEvent| counter.set(counter.get() + 1))
        };
        let once = ListenerOptions::Structured(EventListenerOptions {
            once: true,
            ..Default::default()
        });
        target.add_event_listener("click", &listener, once).unwrap();
        assert_eq!(target.dispatch(&TestEvent::new("click")), 1);
        assert_eq!(target.dispatch(&TestEvent::new("click")), 0);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_dispatch_only_matching_type() {
        let target = RecordingTarget::<TestEvent>::new();
        let listener = EventListener::new(|_: &TestEvent| {});
        target
            .add_event_listener("keydown", &listener, ListenerOptions::Legacy(false))
            .unwrap();
        assert_eq!(target.dispatch(&TestEvent::new("keyup")), 0);
        assert_eq!(target.dispatch(&TestEvent::new("keydown")), 1);
    }

    #[test]
    fn test_fail_next() {
        let target = RecordingTarget::<TestEvent>::new();
        let listener = EventListener::new(|_: &TestEvent| {});
        target.fail_next("boom");
        let err = target
            .add_event_listener("keydown", &listener, ListenerOptions::Legacy(false))
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(target.calls().is_empty());
        assert!(
            target
                .add_event_listener("keydown", &listener, ListenerOptions::Legacy(false))
                .is_ok()
        );
    }

    #[test]
    fn test_environment_resolution() {
        let env = TestEnvironment::<TestEvent>::new();
        let body = env.add_target("body");
        assert!(env.resolve_target(&TargetName::Document).is_some());
        assert!(env.resolve_target(&TargetName::Window).is_some());
        assert!(env.resolve_target(&TargetName::from("body")).is_some());
        assert!(env.resolve_target(&TargetName::from("missing")).is_none());
        assert_eq!(body.listener_count(), 0);

        assert!(env.supports_listener_options());
        env.set_legacy(true);
        assert!(!env.supports_listener_options());
        assert_eq!(env.capability_queries(), 2);
    }

    #[test]
    fn test_environment_resolves_shared_targets() {
        let env = TestEnvironment::<TestEvent>::new();
        let listener = EventListener::new(|_: &TestEvent| {});
        env.resolve_target(&TargetName::Window)
            .unwrap()
            .add_event_listener("resize", &listener, ListenerOptions::Legacy(false))
            .unwrap();
        assert_eq!(env.window().listener_count(), 1);
        assert_eq!(env.document().listener_count(), 0);
    }

    #[test]
    fn test_call_counter() {
        let counter = CallCounter::new();
        let a = counter.handler::<TestEvent>();
        let b = counter.handler::<TestEvent>();
        assert!(!a.ptr_eq(&b));
        a.call(&TestEvent::new("x"));
        b.call(&TestEvent::new("x"));
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}

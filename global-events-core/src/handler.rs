//! Handler, listener and filter function types.
//!
//! All three are reference-counted closures compared by identity: the
//! platform removes a listener only when handed the very function it
//! registered, and the engine diffs handler maps by handler identity.

use std::{fmt, rc::Rc};

/// A user handler declared in a handler map.
pub struct Handler<E>(Rc<dyn Fn(&E)>);

impl<E> Handler<E> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&E) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, event: &E) {
        (self.0)(event)
    }

    /// Whether both values refer to the same handler instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&Rc::as_ptr(&self.0)).finish()
    }
}

/// The function actually registered on a target.
///
/// Built once per binding and kept until the binding is detached.
pub struct EventListener<E>(Rc<dyn Fn(&E)>);

impl<E> EventListener<E> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&E) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the listener, as a target does on dispatch.
    pub fn call(&self, event: &E) {
        (self.0)(event)
    }

    /// Whether both values refer to the same listener instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<E> Clone for EventListener<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> fmt::Debug for EventListener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventListener")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

/// Predicate deciding whether an event reaches its handler.
///
/// Called with the native event, the handler exactly as declared, and the
/// event name with modifiers stripped.
pub struct Filter<E>(Rc<dyn Fn(&E, &Handler<E>, &str) -> bool>);

impl<E> Filter<E> {
    /// Wrap a predicate.
    pub fn new(f: impl Fn(&E, &Handler<E>, &str) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate the predicate.
    pub fn call(&self, event: &E, handler: &Handler<E>, event_name: &str) -> bool {
        (self.0)(event, handler, event_name)
    }

    /// Whether both values refer to the same predicate instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<E> Clone for Filter<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&Rc::as_ptr(&self.0)).finish()
    }
}

//! Attached listener registrations and their reconciliation.

use crate::gate::FilterGate;
use global_events_core::{
    BindingConfig, BindingError, Environment, EventListener, EventTarget, Handler, HandlerMap,
    ListenerOptions, NativeEvent, parse,
};
use std::{fmt, rc::Rc};

/// One listener registered on a target.
///
/// A binding keeps the exact target, listener and options used at attach
/// time; detaching reuses them verbatim.
pub struct Binding<E> {
    spec: String,
    handler: Handler<E>,
    target: Rc<dyn EventTarget<E>>,
    event: String,
    listener: EventListener<E>,
    options: ListenerOptions,
}

impl<E: NativeEvent> Binding<E> {
    /// Parse `spec`, wrap `handler` and register it on the configured target.
    ///
    /// The target and the options representation are resolved from `env` on
    /// every call.
    pub fn attach(
        spec: &str,
        handler: &Handler<E>,
        config: &BindingConfig<E>,
        env: &dyn Environment<E>,
    ) -> Result<Self, BindingError> {
        let target = env
            .resolve_target(config.target())
            .ok_or_else(|| BindingError::UnknownTarget(config.target().clone()))?;
        let parsed = parse(spec);
        let options = ListenerOptions::build(parsed.modifiers, !env.supports_listener_options());
        let listener = FilterGate::from_config(config).wrap(handler, &parsed.name);

        target
            .add_event_listener(&parsed.name, &listener, options)
            .map_err(|source| BindingError::Attach {
                event: parsed.name.clone(),
                source,
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            spec,
            event = %parsed.name,
            target = %config.target(),
            ?options,
            "listener attached"
        );

        Ok(Self {
            spec: spec.to_owned(),
            handler: handler.clone(),
            target,
            event: parsed.name,
            listener,
            options,
        })
    }

    /// Deregister the listener with the arguments used to register it.
    pub fn detach(&self) -> Result<(), BindingError> {
        self.target
            .remove_event_listener(&self.event, &self.listener, self.options)
            .map_err(|source| BindingError::Detach {
                event: self.event.clone(),
                source,
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(spec = %self.spec, event = %self.event, "listener detached");

        Ok(())
    }

    /// The event spec this binding was declared with.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// The event name registered on the target.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The handler as declared.
    pub fn handler(&self) -> &Handler<E> {
        &self.handler
    }

    /// The wrapped listener registered on the target.
    pub fn listener(&self) -> &EventListener<E> {
        &self.listener
    }

    /// The options registered with the listener.
    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    fn declared_as(&self, spec: &str, handler: &Handler<E>) -> bool {
        self.spec == spec && self.handler.ptr_eq(handler)
    }
}

impl<E> fmt::Debug for Binding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("spec", &self.spec)
            .field("event", &self.event)
            .field("listener", &self.listener)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The bindings currently attached for one component, in declaration order.
pub struct BindingSet<E> {
    bindings: Vec<Binding<E>>,
}

impl<E: NativeEvent> BindingSet<E> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Attach every entry of `handlers`.
    pub fn attach_all(
        &mut self,
        handlers: &HandlerMap<E>,
        config: &BindingConfig<E>,
        env: &dyn Environment<E>,
    ) -> Result<(), BindingError> {
        self.reconcile(&HandlerMap::new(), handlers, config, env)
    }

    /// Move from the bindings of `old` to those of `new`.
    ///
    /// Entries are compared by spec string and handler identity. Entries only
    /// in `old` are detached, entries only in `new` are attached, and entries
    /// in both keep their binding untouched. Afterwards the set follows the
    /// declaration order of `new`.
    ///
    /// The set itself is authoritative: a binding missing from `new` is
    /// detached even if `old` never declared it, and an entry of `new` that
    /// is not attached (for example after an earlier attach failure) is
    /// attached even if `old` declared it.
    ///
    /// Detach failures do not stop the pass; the first error is returned once
    /// every stale binding is gone. An attach failure returns immediately,
    /// keeping the bindings attached so far.
    pub fn reconcile(
        &mut self,
        old: &HandlerMap<E>,
        new: &HandlerMap<E>,
        config: &BindingConfig<E>,
        env: &dyn Environment<E>,
    ) -> Result<(), BindingError> {
        let mut first_error = None;

        for (spec, handler) in old.iter() {
            if new.contains(spec, handler) {
                continue;
            }
            let Some(index) = self
                .bindings
                .iter()
                .position(|b| b.declared_as(spec, handler))
            else {
                continue;
            };
            let binding = self.bindings.remove(index);
            if let Err(err) = binding.detach() {
                first_error.get_or_insert(err);
            }
        }

        let (kept, stale): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bindings)
            .into_iter()
            .partition(|b| new.contains(&b.spec, &b.handler));
        self.bindings = kept;
        for binding in stale {
            if let Err(err) = binding.detach() {
                first_error.get_or_insert(err);
            }
        }

        for (spec, handler) in new.iter() {
            if self.bindings.iter().any(|b| b.declared_as(spec, handler)) {
                continue;
            }
            let binding = Binding::attach(spec, handler, config, env)?;
            self.bindings.push(binding);
        }

        self.bindings
            .sort_by_key(|b| new.position(&b.spec).unwrap_or(usize::MAX));

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Detach everything in declaration order.
    ///
    /// The set is empty afterwards even if some detach calls failed; the first
    /// failure is returned.
    pub fn detach_all(&mut self) -> Result<(), BindingError> {
        let mut first_error = None;
        for binding in self.bindings.drain(..) {
            if let Err(err) = binding.detach() {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Iterate over attached bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<E>> {
        self.bindings.iter()
    }

    /// The binding declared with `spec`, if attached.
    pub fn get(&self, spec: &str) -> Option<&Binding<E>> {
        self.bindings.iter().find(|b| b.spec == spec)
    }

    /// Number of attached bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<E: NativeEvent> Default for BindingSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for BindingSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bindings.iter()).finish()
    }
}

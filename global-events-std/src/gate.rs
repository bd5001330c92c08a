//! Filter gate wrapping user handlers before registration.

use global_events_core::{BindingConfig, EventListener, Filter, Handler, NativeEvent};

/// Builds the listener registered on a target for one declared handler.
///
/// On every dispatch the listener evaluates the filter synchronously. When the
/// filter accepts the event (or there is none), the configured delivery flags
/// are applied and the handler runs. A rejected event is left untouched.
///
/// # Example
///
/// ```rust,ignore
/// let gate = FilterGate::new(Some(Filter::new(|e: &KeyEvent, _, _| !e.repeat)));
/// let listener = gate.wrap(&handler, "keydown");
/// document.add_event_listener("keydown", &listener, options)?;
/// ```
pub struct FilterGate<E> {
    filter: Option<Filter<E>>,
    prevent_default: bool,
    stop_propagation: bool,
}

impl<E: NativeEvent> FilterGate<E> {
    /// Create a gate with an optional filter and no delivery flags.
    pub fn new(filter: Option<Filter<E>>) -> Self {
        Self {
            filter,
            prevent_default: false,
            stop_propagation: false,
        }
    }

    /// Create a gate from a component's configuration.
    pub fn from_config(config: &BindingConfig<E>) -> Self {
        Self {
            filter: config.filter().cloned(),
            prevent_default: config.prevent_default(),
            stop_propagation: config.stop_propagation(),
        }
    }

    /// Call `prevent_default` on delivered events.
    pub fn with_prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Call `stop_propagation` on delivered events.
    pub fn with_stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    /// Wrap `handler` for `event_name`.
    ///
    /// The filter sees `handler` itself, never a previously wrapped listener.
    pub fn wrap(&self, handler: &Handler<E>, event_name: &str) -> EventListener<E> {
        let filter = self.filter.clone();
        let handler = handler.clone();
        let event_name = event_name.to_owned();
        let prevent_default = self.prevent_default;
        let stop_propagation = self.stop_propagation;

        EventListener::new(move |event: &E| {
            if let Some(filter) = &filter {
                if !filter.call(event, &handler, &event_name) {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(event = %event_name, "event suppressed by filter");
                    return;
                }
            }
            if stop_propagation {
                event.stop_propagation();
            }
            if prevent_default {
                event.prevent_default();
            }
            handler.call(event);
        })
    }
}

//! Event streams over a target.

use futures::{
    Stream, StreamExt,
    channel::mpsc::{self, UnboundedReceiver},
};
use global_events_core::{
    BindingError, Environment, EventListener, EventTarget, ListenerOptions, NativeEvent,
    TargetName, parse,
};
use std::{
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

/// Yields every event a target dispatches for one spec.
///
/// The listener stays registered while the stream is alive and is removed
/// when it is dropped. With the `~` modifier the stream ends after the first
/// event.
///
/// # Example
///
/// ```rust,ignore
/// let mut resizes = EventStream::from_environment(&env, &TargetName::Window, "&resize")?;
/// while let Some(event) = resizes.next().await {
///     relayout(&event);
/// }
/// ```
pub struct EventStream<E: NativeEvent> {
    receiver: UnboundedReceiver<E>,
    target: Rc<dyn EventTarget<E>>,
    event: String,
    listener: EventListener<E>,
    options: ListenerOptions,
}

impl<E: NativeEvent + Clone> EventStream<E> {
    /// Listen on `target` for `spec`.
    pub fn new(
        target: Rc<dyn EventTarget<E>>,
        spec: &str,
        legacy: bool,
    ) -> Result<Self, BindingError> {
        let parsed = parse(spec);
        let options = ListenerOptions::build(parsed.modifiers, legacy);
        let once = options.once();
        let (sender, receiver) = mpsc::unbounded();
        let listener = EventListener::new(move |event: &E| {
            // A closed channel means the stream was dropped mid-dispatch.
            let _ = sender.unbounded_send(event.clone());
            if once {
                sender.close_channel();
            }
        });

        target
            .add_event_listener(&parsed.name, &listener, options)
            .map_err(|source| BindingError::Attach {
                event: parsed.name.clone(),
                source,
            })?;

        Ok(Self {
            receiver,
            target,
            event: parsed.name,
            listener,
            options,
        })
    }

    /// Listen on the target `env` resolves for `target`.
    pub fn from_environment(
        env: &dyn Environment<E>,
        target: &TargetName,
        spec: &str,
    ) -> Result<Self, BindingError> {
        let resolved = env
            .resolve_target(target)
            .ok_or_else(|| BindingError::UnknownTarget(target.clone()))?;
        Self::new(resolved, spec, !env.supports_listener_options())
    }
}

impl<E: NativeEvent> EventStream<E> {
    /// The event name listened for.
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl<E: NativeEvent> Stream for EventStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<E: NativeEvent> Drop for EventStream<E> {
    fn drop(&mut self) {
        let result = self
            .target
            .remove_event_listener(&self.event, &self.listener, self.options);
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(
                    event = %self.event,
                    error = %err,
                    "failed to detach stream listener"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = result;
        }
    }
}

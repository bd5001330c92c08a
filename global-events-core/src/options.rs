//! Native listener-registration options.

use crate::modifier::Modifiers;

/// Structured options record accepted by targets that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventListenerOptions {
    /// Listen during the capture phase.
    pub capture: bool,
    /// Remove the listener after its first invocation.
    pub once: bool,
    /// The listener never cancels the event.
    pub passive: bool,
}

/// Options passed alongside a listener to `add`/`remove` calls.
///
/// Exactly one representation is used per binding. Legacy targets only accept
/// a capture boolean, so `once` and `passive` cannot be expressed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerOptions {
    /// Full options record.
    Structured(EventListenerOptions),
    /// Capture flag only.
    Legacy(bool),
}

impl ListenerOptions {
    /// Translate a modifier set into options for the given environment mode.
    pub fn build(modifiers: Modifiers, legacy: bool) -> Self {
        let capture = modifiers.contains(Modifiers::CAPTURE);
        if legacy {
            return ListenerOptions::Legacy(capture);
        }
        ListenerOptions::Structured(EventListenerOptions {
            capture,
            once: modifiers.contains(Modifiers::ONCE),
            passive: modifiers.contains(Modifiers::PASSIVE),
        })
    }

    /// The capture flag, which every representation carries.
    pub fn capture(&self) -> bool {
        match self {
            ListenerOptions::Structured(options) => options.capture,
            ListenerOptions::Legacy(capture) => *capture,
        }
    }

    /// Whether the target should drop the listener after one invocation.
    pub fn once(&self) -> bool {
        matches!(self, ListenerOptions::Structured(options) if options.once)
    }

    /// Whether the listener was registered as passive.
    pub fn passive(&self) -> bool {
        matches!(self, ListenerOptions::Structured(options) if options.passive)
    }
}

impl From<EventListenerOptions> for ListenerOptions {
    fn from(options: EventListenerOptions) -> Self {
        ListenerOptions::Structured(options)
    }
}

impl From<bool> for ListenerOptions {
    fn from(capture: bool) -> Self {
        ListenerOptions::Legacy(capture)
    }
}

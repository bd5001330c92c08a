//! Event targets and the environment that resolves them.

use crate::{error::BoxError, handler::EventListener, options::ListenerOptions};
use std::{fmt, rc::Rc};

/// Symbolic name of the object listeners are registered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TargetName {
    /// The document-like object.
    #[default]
    Document,
    /// The window-like object.
    Window,
    /// Any other object the environment knows by name.
    Named(String),
}

impl TargetName {
    /// The name as written in configuration.
    pub fn as_str(&self) -> &str {
        match self {
            TargetName::Document => "document",
            TargetName::Window => "window",
            TargetName::Named(name) => name,
        }
    }
}

impl From<&str> for TargetName {
    fn from(name: &str) -> Self {
        match name {
            "document" => TargetName::Document,
            "window" => TargetName::Window,
            other => TargetName::Named(other.to_owned()),
        }
    }
}

impl From<String> for TargetName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "document" => TargetName::Document,
            "window" => TargetName::Window,
            _ => TargetName::Named(name),
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform object accepting listener registrations.
///
/// Targets are shared: other code may register on the same object, and the
/// engine never assumes it owns the target.
pub trait EventTarget<E> {
    /// Register `listener` for `event`.
    fn add_event_listener(
        &self,
        event: &str,
        listener: &EventListener<E>,
        options: ListenerOptions,
    ) -> Result<(), BoxError>;

    /// Remove a registration made with the same event, listener and options.
    fn remove_event_listener(
        &self,
        event: &str,
        listener: &EventListener<E>,
        options: ListenerOptions,
    ) -> Result<(), BoxError>;
}

/// Host environment queried by the engine while building bindings.
///
/// Both methods are called per binding; implementations may change their
/// answers between calls.
pub trait Environment<E> {
    /// Resolve a symbolic target to a concrete object.
    fn resolve_target(&self, name: &TargetName) -> Option<Rc<dyn EventTarget<E>>>;

    /// Whether targets accept a structured options record.
    ///
    /// When `false`, options degrade to the capture boolean.
    fn supports_listener_options(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(TargetName::from("document"), TargetName::Document);
        assert_eq!(TargetName::from("window"), TargetName::Window);
        assert_eq!(
            TargetName::from("body"),
            TargetName::Named("body".to_string())
        );
        assert_eq!(TargetName::from(String::from("window")), TargetName::Window);
    }

    #[test]
    fn test_default_is_document() {
        assert_eq!(TargetName::default(), TargetName::Document);
        assert_eq!(TargetName::default().to_string(), "document");
    }
}

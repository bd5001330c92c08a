//! Error types for global-events.
//!
//! - [`BindingError`] - Errors raised while attaching or detaching listeners
//! - [`BoxError`] - Errors surfaced by platform collaborators

use crate::target::TargetName;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while managing listener registrations.
#[derive(Error, Debug)]
pub enum BindingError {
    /// The environment has no object registered under the symbolic target name.
    #[error("unknown event target: {0}")]
    UnknownTarget(TargetName),

    /// The target rejected a listener registration.
    #[error("failed to attach `{event}` listener")]
    Attach {
        /// Event name passed to the target.
        event: String,
        /// Error reported by the target.
        #[source]
        source: BoxError,
    },

    /// The target rejected a listener deregistration.
    #[error("failed to detach `{event}` listener")]
    Detach {
        /// Event name passed to the target.
        event: String,
        /// Error reported by the target.
        #[source]
        source: BoxError,
    },
}

impl BindingError {
    /// The event name involved in the failure, if any.
    pub fn event(&self) -> Option<&str> {
        match self {
            BindingError::UnknownTarget(_) => None,
            BindingError::Attach { event, .. } | BindingError::Detach { event, .. } => Some(event),
        }
    }
}

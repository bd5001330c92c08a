//! Per-component binding configuration.

use crate::{
    handler::{Filter, Handler},
    target::TargetName,
};
use std::fmt;

/// Configuration shared by every binding of one component.
///
/// # Example
///
/// ```rust,ignore
/// let config = BindingConfig::new()
///     .with_target("window")
///     .with_filter(|event: &KeyEvent, _, _| !event.repeat)
///     .with_prevent_default(true);
/// ```
pub struct BindingConfig<E> {
    filter: Option<Filter<E>>,
    target: TargetName,
    prevent_default: bool,
    stop_propagation: bool,
}

impl<E> BindingConfig<E> {
    /// Deliver everything, on the document, without touching events.
    pub fn new() -> Self {
        Self {
            filter: None,
            target: TargetName::Document,
            prevent_default: false,
            stop_propagation: false,
        }
    }

    /// Gate delivery behind a predicate.
    pub fn with_filter(
        mut self,
        filter: impl Fn(&E, &Handler<E>, &str) -> bool + 'static,
    ) -> Self {
        self.filter = Some(Filter::new(filter));
        self
    }

    /// Gate delivery behind an existing predicate instance.
    pub fn with_filter_fn(mut self, filter: Filter<E>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Select the target object.
    pub fn with_target(mut self, target: impl Into<TargetName>) -> Self {
        self.target = target.into();
        self
    }

    /// Cancel the default action of every delivered event.
    pub fn with_prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Stop propagation of every delivered event.
    pub fn with_stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    /// The delivery predicate, if any.
    pub fn filter(&self) -> Option<&Filter<E>> {
        self.filter.as_ref()
    }

    /// The symbolic target.
    pub fn target(&self) -> &TargetName {
        &self.target
    }

    /// Whether delivered events get `prevent_default`.
    pub fn prevent_default(&self) -> bool {
        self.prevent_default
    }

    /// Whether delivered events get `stop_propagation`.
    pub fn stop_propagation(&self) -> bool {
        self.stop_propagation
    }
}

impl<E> Default for BindingConfig<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for BindingConfig<E> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            target: self.target.clone(),
            prevent_default: self.prevent_default,
            stop_propagation: self.stop_propagation,
        }
    }
}

// Filters compare by identity.
impl<E> PartialEq for BindingConfig<E> {
    fn eq(&self, other: &Self) -> bool {
        let same_filter = match (&self.filter, &other.filter) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };
        same_filter
            && self.target == other.target
            && self.prevent_default == other.prevent_default
            && self.stop_propagation == other.stop_propagation
    }
}

impl<E> fmt::Debug for BindingConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingConfig")
            .field("filter", &self.filter)
            .field("target", &self.target)
            .field("prevent_default", &self.prevent_default)
            .field("stop_propagation", &self.stop_propagation)
            .finish()
    }
}

//! Ordered mapping from event spec to handler.

use crate::handler::Handler;
use std::fmt;

/// Handlers keyed by event spec, in declaration order.
///
/// Declaration order drives attach and detach order.
pub struct HandlerMap<E> {
    entries: Vec<(String, Handler<E>)>,
}

impl<E> HandlerMap<E> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a closure for `spec` (builder style).
    pub fn on(mut self, spec: impl Into<String>, f: impl Fn(&E) + 'static) -> Self {
        self.insert(spec, Handler::new(f));
        self
    }

    /// Declare `handler` for `spec`.
    ///
    /// An existing spec keeps its position and gets the new handler; the
    /// previous handler is returned.
    pub fn insert(&mut self, spec: impl Into<String>, handler: Handler<E>) -> Option<Handler<E>> {
        let spec = spec.into();
        match self.entries.iter_mut().find(|(key, _)| *key == spec) {
            Some((_, existing)) => Some(std::mem::replace(existing, handler)),
            None => {
                self.entries.push((spec, handler));
                None
            }
        }
    }

    /// Remove the handler declared for `spec`.
    pub fn remove(&mut self, spec: &str) -> Option<Handler<E>> {
        let index = self.position(spec)?;
        Some(self.entries.remove(index).1)
    }

    /// The handler declared for `spec`.
    pub fn get(&self, spec: &str) -> Option<&Handler<E>> {
        self.entries
            .iter()
            .find(|(key, _)| key == spec)
            .map(|(_, handler)| handler)
    }

    /// Whether `spec` is declared with this exact handler instance.
    pub fn contains(&self, spec: &str, handler: &Handler<E>) -> bool {
        self.get(spec).is_some_and(|h| h.ptr_eq(handler))
    }

    /// Declaration index of `spec`.
    pub fn position(&self, spec: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == spec)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler<E>)> {
        self.entries
            .iter()
            .map(|(spec, handler)| (spec.as_str(), handler))
    }

    /// Number of declared specs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no spec is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for HandlerMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for HandlerMap<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<E> fmt::Debug for HandlerMap<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<E, S: Into<String>> FromIterator<(S, Handler<E>)> for HandlerMap<E> {
    fn from_iter<I: IntoIterator<Item = (S, Handler<E>)>>(iter: I) -> Self {
        let mut map = HandlerMap::new();
        for (spec, handler) in iter {
            map.insert(spec, handler);
        }
        map
    }
}

/// Build a [`HandlerMap`] from `spec => handler` pairs.
///
/// # Example
/// ```ignore
/// let handlers = handler_map! {
///     "!keydown" => on_keydown.clone(),
///     "&scroll" => Handler::new(|_| {}),
/// };
/// ```
#[macro_export]
macro_rules! handler_map {
    () => { $crate::HandlerMap::new() };
    ($($spec:expr => $handler:expr),+ $(,)?) => {{
        let mut map = $crate::HandlerMap::new();
        $( map.insert($spec, $handler); )+
        map
    }};
}

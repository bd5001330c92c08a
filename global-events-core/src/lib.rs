//! # global-events-core
//!
//! Core types for binding a component's handlers to a global event target.
//!
//! A component declares its handlers as a [`HandlerMap`] keyed by event
//! specs (`"~!keydown"`). Each spec is split by [`parse`] into an event name
//! and [`Modifiers`], which [`ListenerOptions::build`] turns into the options
//! handed to an [`EventTarget`]. The [`Environment`] resolves the symbolic
//! [`TargetName`] and reports whether structured options are supported.
//!
//! The engine driving these types lives in `global-events-std`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod event;
mod handler;
mod handler_map;
mod modifier;
mod options;
mod target;

// Re-exports
pub use config::BindingConfig;
pub use error::{BindingError, BoxError};
pub use event::NativeEvent;
pub use handler::{EventListener, Filter, Handler};
pub use handler_map::HandlerMap;
pub use modifier::{Modifiers, ParsedEvent, parse};
pub use options::{EventListenerOptions, ListenerOptions};
pub use target::{Environment, EventTarget, TargetName};

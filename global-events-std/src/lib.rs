//! # global-events-std
//!
//! Listener lifecycle engine for the global-events framework.
//!
//! This crate provides:
//! - **Filter gate**: [`FilterGate`] wraps handlers behind an optional predicate
//! - **Bindings**: [`Binding`] and [`BindingSet`] attach, detach and reconcile
//!   listener registrations
//! - **Lifecycle**: [`LifecycleController`] reacts to mount, update, activate,
//!   deactivate and unmount signals
//! - **Streams**: [`EventStream`] relays a target's events as a `Stream`
//! - **Testing**: recording targets and environments in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use global_events_core;

// Modules
pub mod binding;
pub mod gate;
pub mod lifecycle;
pub mod stream;
pub mod testing;

pub use binding::{Binding, BindingSet};
pub use gate::FilterGate;
pub use lifecycle::{LifecycleController, LifecycleState};
pub use stream::EventStream;

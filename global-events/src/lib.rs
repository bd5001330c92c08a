//! # global-events - Component Handlers on Global Targets
//!
//! `global-events` binds a component's event handlers to an object outside
//! its own rendered surface (usually the document or the window) for as long
//! as the component lives, and removes them when it is deactivated or
//! unmounted.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use global_events::prelude::*;
//!
//! let mut controller = LifecycleController::new(env);
//! controller.mount(
//!     handler_map! {
//!         "!keydown" => Handler::new(|e: &KeyEvent| on_key(e)),
//!         "~&scroll" => Handler::new(|_| first_scroll()),
//!     },
//!     BindingConfig::new()
//!         .with_target("window")
//!         .with_filter(|e: &KeyEvent, _, _| !e.is_composing()),
//! )?;
//!
//! // Component hidden by a keep-alive container
//! controller.deactivate()?;
//! controller.activate()?;
//!
//! controller.unmount()?;
//! ```
//!
//! ## Event specs
//!
//! Handler-map keys are event names with optional modifier prefixes, in any
//! order: `!` capture, `~` once, `&` passive. Other prefix characters are not
//! modifiers and stay part of the event name.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Parsing
pub use global_events_core::{Modifiers, ParsedEvent, parse};

// Options
pub use global_events_core::{EventListenerOptions, ListenerOptions};

// Handlers
pub use global_events_core::{EventListener, Filter, Handler, HandlerMap, handler_map};

// Configuration
pub use global_events_core::BindingConfig;

// Targets
pub use global_events_core::{Environment, EventTarget, NativeEvent, TargetName};

// Errors
pub use global_events_core::{BindingError, BoxError};

// Engine
pub use global_events_std::{
    Binding, BindingSet, EventStream, FilterGate, LifecycleController, LifecycleState,
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use global_events_std::testing::*;
}

/// Prelude module - common imports for global-events.
///
/// # Usage
///
/// ```rust,ignore
/// use global_events::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BindingConfig, BindingError, Environment, EventTarget, Handler, HandlerMap,
        LifecycleController, LifecycleState, NativeEvent, TargetName, handler_map,
    };
}

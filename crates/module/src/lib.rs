//! Graphics module facade: the single object a host talks to.
//!
//! # Invariants
//! - Built-in plugins are registered before any host plugin.
//! - Rendering and keyboard dispatch run on the thread that owns the module.
//! - Keyboard handlers may add or remove bindings while an event is delivered.

mod module;

pub use module::{GraphicsModule, KeyboardHandle};

pub fn crate_info() -> &'static str {
    "prism-module v0.1.0"
}

//! Keyboard input routing: raw key events encoded into 64-bit masks and
//! fanned out to mask-matched subscriptions.
//!
//! # Invariants
//! - Event mask = `(key << 32) | mods`; mods = modifier flags | (event tag << 8).
//! - A subscription fires when all of its set bits are set in the event mask.
//! - Removal by mask is exact-equality, not containment.
//! - Handlers run synchronously, in registration order, on the event pump's thread.

pub mod mask;
pub mod table;
#[cfg(feature = "winit")]
pub mod winit_source;

pub use mask::{KeyEventKind, KeyMask, Modifiers, encode_mods};
pub use table::{
    KeyHandler, KeyInput, KeySink, KeyboardTable, Subscription, encode_char, handler,
};

pub fn crate_info() -> &'static str {
    "prism-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}

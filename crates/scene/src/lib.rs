//! In-memory host world: realms of entities that the render dispatcher can
//! bind and draw.
//!
//! # Invariants
//! - Realm and entity enumeration follow insertion order.
//! - Object types produce fresh render data on every query.

pub mod kinds;
pub mod world;

pub use kinds::{Hidden, Opaque, StaticMesh, kind};
pub use world::{Entity, Player, SceneRealm, SceneWorld};

pub fn crate_info() -> &'static str {
    "prism-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}

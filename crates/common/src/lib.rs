//! Shared types for the prism graphics module.
//!
//! # Invariants
//! - Matrices crossing the host boundary are 16-float arrays in OpenGL
//!   `glLoadMatrix` order (translation at indices 12..=14).
//! - Inside the workspace every matrix is a `glam::Mat4`.

mod types;

pub use types::{
    Color, EntityId, Primitive, Transform, mat4_from_array, mat4_to_array,
};

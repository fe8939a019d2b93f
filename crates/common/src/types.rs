use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in a host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform with only a translation component.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Whether rotation and scale are both identity.
    pub fn has_identity_basis(&self) -> bool {
        self.rotation == Quat::IDENTITY && self.scale == Vec3::ONE
    }

    /// Rotation and scale without the translation, as a host matrix array.
    ///
    /// Translation is carried separately by `position` so hosts can expose the
    /// two halves independently.
    pub fn basis_array(&self) -> [f32; 16] {
        mat4_to_array(&Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            Vec3::ZERO,
        ))
    }
}

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Kind of primitive batch opened by a geometry renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Points,
    Lines,
    Triangles,
}

/// Build a matrix from the 16-float host layout.
///
/// The layout is the one OpenGL's `glLoadMatrix` takes: row-major for row
/// vectors, so the translation sits at indices 12..=14. Returns `None` when
/// the slice is not exactly 16 elements long.
pub fn mat4_from_array(values: &[f32]) -> Option<Mat4> {
    let array: &[f32; 16] = values.try_into().ok()?;
    Some(Mat4::from_cols_array(array))
}

/// Flatten a matrix into the 16-float host layout.
pub fn mat4_to_array(m: &Mat4) -> [f32; 16] {
    m.to_cols_array()
}

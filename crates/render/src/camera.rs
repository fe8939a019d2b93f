use glam::{Mat4, Vec3};
use prism_common::mat4_from_array;

use crate::config::CameraConfig;
use crate::scene::PlayerBinding;

/// Derives the view matrix from the player's optional position and transform.
///
/// Nothing is stored between frames; the matrix is rebuilt from the player's
/// accessors every time.
#[derive(Debug, Clone, Default)]
pub struct CameraResolver {
    config: CameraConfig,
}

impl CameraResolver {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Rotation used when no usable player transform exists.
    pub fn default_rotation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.config.default_pitch_degrees.to_radians())
    }

    /// View matrix for this frame. An unbound player uses both fallbacks.
    pub fn resolve(&self, player: Option<&PlayerBinding>) -> Mat4 {
        let position = player.and_then(PlayerBinding::position);
        let transform = player.and_then(PlayerBinding::transform);
        self.compose(position, transform.as_deref())
    }

    /// `(transform or default rotation) * translate(position or default)`.
    ///
    /// Points are translated first, then transformed by the basis. A transform
    /// that is not exactly 16 floats counts as absent.
    pub fn compose(&self, position: Option<Vec3>, transform: Option<&[f32]>) -> Mat4 {
        let translation =
            Mat4::from_translation(position.unwrap_or(self.config.default_translation));
        let basis = transform
            .and_then(mat4_from_array)
            .unwrap_or_else(|| self.default_rotation());
        basis * translation
    }
}

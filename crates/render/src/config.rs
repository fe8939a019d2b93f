use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from loading a render configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Camera fallbacks used when the player does not supply a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Translation applied when the player has no position.
    pub default_translation: Vec3,
    /// Rotation about the X axis, in degrees, applied when the player has no
    /// usable transform.
    pub default_pitch_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_translation: Vec3::new(0.0, -5.0, -5.0),
            default_pitch_degrees: 45.0,
        }
    }
}

/// Render configuration, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    /// Draw the diagnostic triangle while no world is bound.
    pub diagnostic_triangle: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            diagnostic_triangle: true,
        }
    }
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn render_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.camera.default_translation, Vec3::new(0.0, -5.0, -5.0));
        assert_eq!(config.camera.default_pitch_degrees, 45.0);
        assert!(config.diagnostic_triangle);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = RenderConfig::from_json(r#"{ "diagnostic_triangle": false }"#).unwrap();
        assert!(!config.diagnostic_triangle);
        assert_eq!(config.camera, CameraConfig::default());

        let config =
            RenderConfig::from_json(r#"{ "camera": { "default_pitch_degrees": 30.0 } }"#).unwrap();
        assert_eq!(config.camera.default_pitch_degrees, 30.0);
        assert_eq!(config.camera.default_translation, Vec3::new(0.0, -5.0, -5.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            RenderConfig::from_json("{ camera"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "camera": {{ "default_translation": [1.0, 2.0, 3.0] }} }}"#
        )
        .unwrap();
        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.camera.default_translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RenderConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

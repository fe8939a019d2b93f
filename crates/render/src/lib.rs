//! Render dispatch: renderer plugins, camera resolution, per-frame drawing.
//!
//! # Invariants
//! - The dispatcher never interprets a payload; only plugins do.
//! - Renderer resolution is first-match in registration order.
//! - A missing renderer or missing render data skips that object only.
//! - Every call runs on the thread that owns the graphics context.

mod backend;
pub mod builtin;
mod camera;
mod config;
mod payload;
mod plugin;
mod registry;
mod renderer;
mod scene;

pub use backend::{DrawCall, GraphicsBackend, RecordingBackend};
pub use builtin::{ColorArrayRenderer, VertexArrayRenderer};
pub use camera::CameraResolver;
pub use config::{CameraConfig, ConfigError, RenderConfig};
pub use payload::{Payload, RenderData};
pub use plugin::{ColorHandle, ColorRenderer, GeometryHandle, GeometryRenderer, RendererPlugin};
pub use registry::RendererRegistry;
pub use renderer::{FrameRenderer, FrameStats};
pub use scene::{
    ObjectType, PlayerBinding, Realm, SceneBinding, SceneError, SceneObject, Spatial, World,
};

pub fn crate_info() -> &'static str {
    "prism-render v0.1.0"
}

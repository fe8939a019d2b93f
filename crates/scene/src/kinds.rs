use std::rc::Rc;

use prism_common::Color;
use prism_render::{ObjectType, Payload, RenderData, SceneObject};

/// A fixed triangle mesh with optional per-vertex colors.
///
/// Vertices are flat `x, y, z` triples in object space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticMesh {
    pub vertices: Vec<f32>,
    pub colors: Option<Vec<Color>>,
}

impl StaticMesh {
    pub fn new(vertices: Vec<f32>) -> Self {
        Self {
            vertices,
            colors: None,
        }
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Axis-aligned unit quad in the XY plane as two triangles.
    pub fn quad(size: f32) -> Self {
        let h = size * 0.5;
        Self::new(vec![
            -h, -h, 0.0, h, -h, 0.0, h, h, 0.0, //
            -h, -h, 0.0, h, h, 0.0, -h, h, 0.0,
        ])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl ObjectType for StaticMesh {
    fn render_data(&self, _object: &dyn SceneObject) -> Option<RenderData> {
        let data = RenderData::geometry(Payload::new(self.vertices.clone()));
        Some(match &self.colors {
            Some(colors) => data.with_color(Payload::new(colors.clone())),
            None => data,
        })
    }
}

/// An object type that never produces render data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hidden;

impl ObjectType for Hidden {
    fn render_data(&self, _object: &dyn SceneObject) -> Option<RenderData> {
        None
    }
}

/// Hands out a fixed payload. Useful for host-defined formats that only a
/// custom renderer plugin understands.
#[derive(Debug, Clone, Default)]
pub struct Opaque {
    data: RenderData,
}

impl Opaque {
    pub fn new(data: RenderData) -> Self {
        Self { data }
    }
}

impl ObjectType for Opaque {
    fn render_data(&self, _object: &dyn SceneObject) -> Option<RenderData> {
        Some(self.data.clone())
    }
}

/// Shorthand for sharing an object type between entities.
pub fn kind<T: ObjectType + 'static>(kind: T) -> Rc<dyn ObjectType> {
    Rc::new(kind)
}

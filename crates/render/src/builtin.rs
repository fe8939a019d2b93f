//! Plugins installed by default: packed xyz vertex arrays and per-vertex
//! color arrays.

use std::rc::Rc;

use glam::Vec3;
use prism_common::{Color, Primitive};

use crate::backend::GraphicsBackend;
use crate::payload::Payload;
use crate::plugin::{ColorRenderer, GeometryRenderer};

/// Draws a `Vec<f32>` of packed xyz triples as a triangle list.
#[derive(Debug, Default)]
pub struct VertexArrayRenderer {
    vertices: Option<Rc<Vec<f32>>>,
}

impl VertexArrayRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryRenderer for VertexArrayRenderer {
    fn can_render(&self, payload: Option<&Payload>) -> bool {
        payload.is_some_and(|p| p.is::<Vec<f32>>())
    }

    fn start(&mut self, payload: Option<&Payload>, gfx: &mut dyn GraphicsBackend) -> usize {
        self.vertices = payload.and_then(Payload::downcast::<Vec<f32>>);
        gfx.begin(Primitive::Triangles);
        // one vertex per whole xyz triple
        self.vertices.as_ref().map_or(0, |v| v.len() / 3)
    }

    fn vertex(&mut self, index: usize, gfx: &mut dyn GraphicsBackend) {
        let Some(vertices) = &self.vertices else {
            return;
        };
        if let Some(xyz) = vertices.get(3 * index..3 * index + 3) {
            gfx.vertex(Vec3::new(xyz[0], xyz[1], xyz[2]));
        }
    }

    fn end(&mut self, gfx: &mut dyn GraphicsBackend) {
        gfx.end();
        self.vertices = None;
    }
}

/// Emits one color per vertex from a `Vec<Color>`.
#[derive(Debug, Default)]
pub struct ColorArrayRenderer {
    colors: Option<Rc<Vec<Color>>>,
}

impl ColorArrayRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColorRenderer for ColorArrayRenderer {
    fn can_render(&self, payload: Option<&Payload>) -> bool {
        payload.is_some_and(|p| p.is::<Vec<Color>>())
    }

    fn start(&mut self, payload: Option<&Payload>) {
        self.colors = payload.and_then(Payload::downcast::<Vec<Color>>);
    }

    fn color(&mut self, index: usize, gfx: &mut dyn GraphicsBackend) {
        if let Some(color) = self.colors.as_ref().and_then(|c| c.get(index)) {
            gfx.color(*color);
        }
    }
}

use std::rc::Rc;

use crate::payload::Payload;
use crate::plugin::{ColorHandle, GeometryHandle, RendererPlugin};

/// Installed renderer plugins, one ordered list per role.
///
/// Insertion order is resolution order. Nothing is deduplicated and nothing is
/// ever removed: installing the same plugin twice makes it a candidate twice.
#[derive(Default)]
pub struct RendererRegistry {
    geometry: Vec<GeometryHandle>,
    color: Vec<ColorHandle>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the plugin to every role list it fills.
    pub fn register(&mut self, plugin: RendererPlugin) {
        if let Some(geometry) = plugin.geometry {
            tracing::debug!(
                renderer = geometry.borrow().name(),
                position = self.geometry.len(),
                "geometry renderer registered"
            );
            self.geometry.push(geometry);
        }
        if let Some(color) = plugin.color {
            tracing::debug!(
                renderer = color.borrow().name(),
                position = self.color.len(),
                "color renderer registered"
            );
            self.color.push(color);
        }
    }

    /// First geometry renderer, in registration order, that accepts the payload.
    pub fn resolve_geometry(&self, payload: Option<&Payload>) -> Option<GeometryHandle> {
        self.geometry
            .iter()
            .find(|r| r.borrow().can_render(payload))
            .map(Rc::clone)
    }

    /// First color renderer, in registration order, that accepts the payload.
    pub fn resolve_color(&self, payload: Option<&Payload>) -> Option<ColorHandle> {
        self.color
            .iter()
            .find(|r| r.borrow().can_render(payload))
            .map(Rc::clone)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometry.len()
    }

    pub fn color_count(&self) -> usize {
        self.color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty() && self.color.is_empty()
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::GraphicsBackend;
use crate::payload::Payload;

/// Geometry role of a renderer plugin.
///
/// Per object the frame renderer calls `start`, then `vertex` for every index
/// in `0..count` in increasing order, then `end`. `vertex` and `end` are never
/// called without a preceding `start` in the same object pass.
pub trait GeometryRenderer {
    /// Whether this renderer understands the payload. Must not mutate state.
    ///
    /// An absent payload should be rejected unless the plugin deliberately
    /// draws something without input.
    fn can_render(&self, payload: Option<&Payload>) -> bool;

    /// Bind the payload, open a primitive batch, and return the vertex count.
    fn start(&mut self, payload: Option<&Payload>, gfx: &mut dyn GraphicsBackend) -> usize;

    fn vertex(&mut self, index: usize, gfx: &mut dyn GraphicsBackend);

    /// Close the batch opened by `start`.
    fn end(&mut self, gfx: &mut dyn GraphicsBackend);

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Color role of a renderer plugin.
///
/// `start` binds a color source without opening a batch. `color(i)` is issued
/// right before the geometry renderer's `vertex(i)`.
pub trait ColorRenderer {
    fn can_render(&self, payload: Option<&Payload>) -> bool;

    fn start(&mut self, payload: Option<&Payload>);

    fn color(&mut self, index: usize, gfx: &mut dyn GraphicsBackend);

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub type GeometryHandle = Rc<RefCell<dyn GeometryRenderer>>;
pub type ColorHandle = Rc<RefCell<dyn ColorRenderer>>;

/// A plugin as installed into the registry: the set of roles it fills.
///
/// A plugin implementing both traits is shared between the two roles, so
/// state bound by one role's `start` is visible to the other.
#[derive(Clone, Default)]
pub struct RendererPlugin {
    pub(crate) geometry: Option<GeometryHandle>,
    pub(crate) color: Option<ColorHandle>,
}

impl RendererPlugin {
    pub fn geometry<G: GeometryRenderer + 'static>(renderer: G) -> Self {
        Self::shared_geometry(Rc::new(RefCell::new(renderer)))
    }

    pub fn color<C: ColorRenderer + 'static>(renderer: C) -> Self {
        Self::shared_color(Rc::new(RefCell::new(renderer)))
    }

    /// Plugin filling both roles with one instance.
    pub fn dual<P: GeometryRenderer + ColorRenderer + 'static>(renderer: P) -> Self {
        Self::shared_dual(Rc::new(RefCell::new(renderer)))
    }

    /// Geometry plugin whose instance the caller keeps a handle to.
    pub fn shared_geometry<G: GeometryRenderer + 'static>(renderer: Rc<RefCell<G>>) -> Self {
        let geometry: GeometryHandle = renderer;
        Self {
            geometry: Some(geometry),
            color: None,
        }
    }

    pub fn shared_color<C: ColorRenderer + 'static>(renderer: Rc<RefCell<C>>) -> Self {
        let color: ColorHandle = renderer;
        Self {
            geometry: None,
            color: Some(color),
        }
    }

    pub fn shared_dual<P: GeometryRenderer + ColorRenderer + 'static>(
        renderer: Rc<RefCell<P>>,
    ) -> Self {
        let geometry: GeometryHandle = renderer.clone();
        let color: ColorHandle = renderer;
        Self {
            geometry: Some(geometry),
            color: Some(color),
        }
    }
}

impl std::fmt::Debug for RendererPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererPlugin")
            .field("geometry", &self.geometry.as_ref().map(|g| g.borrow().name()))
            .field("color", &self.color.as_ref().map(|c| c.borrow().name()))
            .finish()
    }
}

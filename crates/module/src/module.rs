use std::cell::RefCell;
use std::rc::Rc;

use prism_input::{
    KeyEventKind, KeyHandler, KeyInput, KeyMask, KeySink, KeyboardTable, encode_char,
};
use prism_render::{
    ColorArrayRenderer, FrameRenderer, FrameStats, GraphicsBackend, PlayerBinding,
    RenderConfig, RendererPlugin, SceneError, Spatial, VertexArrayRenderer, World,
};

/// Shared handle to the module's keyboard table. Handlers capture a clone to
/// edit bindings from inside a dispatch.
pub type KeyboardHandle = Rc<RefCell<KeyboardTable>>;

/// Owns the frame renderer and the keyboard table.
pub struct GraphicsModule {
    renderer: FrameRenderer,
    keyboard: KeyboardHandle,
}

impl Default for GraphicsModule {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl GraphicsModule {
    /// Create a module with the built-in color and vertex array renderers.
    pub fn new(config: RenderConfig) -> Self {
        let mut renderer = FrameRenderer::new(config);
        renderer.add_renderer(RendererPlugin::color(ColorArrayRenderer::new()));
        renderer.add_renderer(RendererPlugin::geometry(VertexArrayRenderer::new()));
        tracing::debug!("graphics module created");
        Self {
            renderer,
            keyboard: Rc::new(RefCell::new(KeyboardTable::new())),
        }
    }

    /// Create a module with no renderer plugins at all.
    pub fn bare(config: RenderConfig) -> Self {
        Self {
            renderer: FrameRenderer::new(config),
            keyboard: Rc::new(RefCell::new(KeyboardTable::new())),
        }
    }

    pub fn add_renderer(&mut self, plugin: RendererPlugin) {
        self.renderer.add_renderer(plugin);
    }

    /// Subscribe `handler` to events containing every bit of `mask`.
    /// `KeyMask::ANY` subscribes to everything.
    pub fn add_keyboard_binding(&self, handler: KeyHandler, mask: KeyMask) {
        self.keyboard.borrow_mut().add(handler, mask);
    }

    /// Remove bindings whose mask equals `mask`; `None` matches any handler.
    pub fn remove_keyboard_binding(&self, handler: Option<&KeyHandler>, mask: KeyMask) -> usize {
        self.keyboard.borrow_mut().remove(handler, mask)
    }

    pub fn keyboard_handle(&self) -> KeyboardHandle {
        Rc::clone(&self.keyboard)
    }

    /// Bind realm 0 of `world`. A world without realms keeps the previous
    /// binding.
    pub fn load_world(&mut self, world: &dyn World) -> Result<(), SceneError> {
        self.renderer.load_world(world)?;
        tracing::debug!("world loaded");
        Ok(())
    }

    pub fn set_player(&mut self, player: Rc<dyn Spatial>) {
        self.renderer.set_player(PlayerBinding::capture(player));
    }

    pub fn render_frame(&self, gfx: &mut dyn GraphicsBackend) -> FrameStats {
        self.renderer.render_frame(gfx)
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Deliver an encoded event. The table borrow ends before any handler runs.
    pub fn dispatch(&self, key: u32, mods: u32) -> usize {
        KeyboardTable::dispatch_shared(&self.keyboard, key, mods)
    }
}

impl KeySink for GraphicsModule {
    fn key_down(&self, input: &KeyInput) -> usize {
        let (key, mods) = input.encode(KeyEventKind::KeyDown);
        self.dispatch(key, mods)
    }

    fn key_up(&self, input: &KeyInput) -> usize {
        let (key, mods) = input.encode(KeyEventKind::KeyUp);
        self.dispatch(key, mods)
    }

    fn key_press(&self, ch: char) -> usize {
        let (key, mods) = encode_char(ch);
        self.dispatch(key, mods)
    }
}

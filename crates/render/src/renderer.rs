use glam::Vec3;
use prism_common::{Color, Primitive, mat4_from_array};

use crate::backend::GraphicsBackend;
use crate::camera::CameraResolver;
use crate::config::RenderConfig;
use crate::payload::RenderData;
use crate::plugin::{ColorHandle, GeometryHandle, RendererPlugin};
use crate::registry::RendererRegistry;
use crate::scene::{PlayerBinding, SceneBinding, SceneError, SceneObject, World};

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects_seen: usize,
    pub objects_drawn: usize,
    pub skipped_no_data: usize,
    pub skipped_no_renderer: usize,
    pub vertices: usize,
    /// The diagnostic triangle was drawn instead of the scene.
    pub diagnostic: bool,
}

/// Orchestrates one frame: camera, object iteration, renderer resolution and
/// per-object draw sequencing.
///
/// Objects without render data or without a matching geometry renderer are
/// skipped silently; they never affect other objects' output.
pub struct FrameRenderer {
    registry: RendererRegistry,
    scene: SceneBinding,
    player: Option<PlayerBinding>,
    camera: CameraResolver,
    diagnostic_triangle: bool,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl FrameRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            registry: RendererRegistry::new(),
            scene: SceneBinding::new(),
            player: None,
            camera: CameraResolver::new(config.camera),
            diagnostic_triangle: config.diagnostic_triangle,
        }
    }

    pub fn add_renderer(&mut self, plugin: RendererPlugin) {
        self.registry.register(plugin);
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    pub fn load_world(&mut self, world: &dyn World) -> Result<(), SceneError> {
        self.scene.bind_world(world).inspect_err(|e| {
            tracing::warn!("world not bound: {e}");
        })
    }

    /// Replace any previously captured player accessors.
    pub fn set_player(&mut self, player: PlayerBinding) {
        self.player = Some(player);
        tracing::debug!("player bound");
    }

    pub fn camera(&self) -> &CameraResolver {
        &self.camera
    }

    /// Render one frame into `gfx`.
    pub fn render_frame(&self, gfx: &mut dyn GraphicsBackend) -> FrameStats {
        let _span = tracing::debug_span!("render_frame").entered();
        let mut stats = FrameStats::default();

        let Some(objects) = self.scene.objects() else {
            if self.diagnostic_triangle {
                draw_diagnostic_triangle(gfx);
                stats.diagnostic = true;
                stats.vertices = 3;
            }
            return stats;
        };

        gfx.push_matrix();
        gfx.load_matrix(&self.camera.resolve(self.player.as_ref()));

        for object in &objects {
            stats.objects_seen += 1;
            let Some(data) = object.object_type().render_data(&**object) else {
                stats.skipped_no_data += 1;
                tracing::trace!("object has no render data");
                continue;
            };
            let Some(geometry) = self.registry.resolve_geometry(data.geometry.as_ref()) else {
                stats.skipped_no_renderer += 1;
                tracing::trace!("no geometry renderer for payload");
                continue;
            };
            let color = self.registry.resolve_color(data.color.as_ref());

            gfx.push_matrix();
            stats.vertices += render_object(&**object, &data, &geometry, color.as_ref(), gfx);
            gfx.pop_matrix();
            stats.objects_drawn += 1;
        }

        gfx.pop_matrix();

        tracing::trace!(
            seen = stats.objects_seen,
            drawn = stats.objects_drawn,
            vertices = stats.vertices,
            "frame rendered"
        );
        stats
    }
}

/// Apply the object's placement and run the geometry/color protocol.
/// Returns the vertex count reported by the geometry renderer.
fn render_object(
    object: &dyn SceneObject,
    data: &RenderData,
    geometry: &GeometryHandle,
    color: Option<&ColorHandle>,
    gfx: &mut dyn GraphicsBackend,
) -> usize {
    apply_placement(object, gfx);

    let count = geometry.borrow_mut().start(data.geometry.as_ref(), gfx);
    match color {
        Some(color) => {
            color.borrow_mut().start(data.color.as_ref());
            for i in 0..count {
                color.borrow_mut().color(i, gfx);
                geometry.borrow_mut().vertex(i, gfx);
            }
        }
        None => {
            for i in 0..count {
                geometry.borrow_mut().vertex(i, gfx);
            }
        }
    }
    geometry.borrow_mut().end(gfx);
    count
}

/// Translation first, then the object's own matrix.
fn apply_placement(object: &dyn SceneObject, gfx: &mut dyn GraphicsBackend) {
    if let Some(position) = object.position() {
        gfx.translate(position);
    }
    if let Some(matrix) = object.transform().as_deref().and_then(mat4_from_array) {
        gfx.mul_matrix(&matrix);
    }
}

/// Fixed colored triangle proving the pipeline is alive with no world bound.
fn draw_diagnostic_triangle(gfx: &mut dyn GraphicsBackend) {
    gfx.begin(Primitive::Triangles);
    gfx.color(Color::RED);
    gfx.vertex(Vec3::new(-1.0, 1.0, -5.0));
    gfx.color(Color::GREEN);
    gfx.vertex(Vec3::new(0.0, -1.0, -5.0));
    gfx.color(Color::BLUE);
    gfx.vertex(Vec3::new(1.0, 1.0, -5.0));
    gfx.end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingBackend};
    use crate::payload::Payload;
    use crate::plugin::{ColorRenderer, GeometryRenderer};
    use crate::scene::{ObjectType, Realm, Spatial};
    use glam::Mat4;
    use prism_common::mat4_to_array;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Geometry stub accepting `u32` payloads, which carry the vertex count.
    struct RecordingGeometry {
        log: Log,
    }

    impl GeometryRenderer for RecordingGeometry {
        fn can_render(&self, payload: Option<&Payload>) -> bool {
            payload.is_some_and(|p| p.is::<u32>())
        }

        fn start(&mut self, payload: Option<&Payload>, _: &mut dyn GraphicsBackend) -> usize {
            self.log.borrow_mut().push("start(geom)".into());
            payload.and_then(|p| p.downcast_ref::<u32>()).map_or(0, |&n| n as usize)
        }

        fn vertex(&mut self, index: usize, gfx: &mut dyn GraphicsBackend) {
            self.log.borrow_mut().push(format!("vertex({index})"));
            gfx.vertex(Vec3::ZERO);
        }

        fn end(&mut self, _: &mut dyn GraphicsBackend) {
            self.log.borrow_mut().push("end".into());
        }
    }

    /// Color stub accepting `&'static str` payloads.
    struct RecordingColor {
        log: Log,
    }

    impl ColorRenderer for RecordingColor {
        fn can_render(&self, payload: Option<&Payload>) -> bool {
            payload.is_some_and(|p| p.is::<&'static str>())
        }

        fn start(&mut self, _: Option<&Payload>) {
            self.log.borrow_mut().push("start(color)".into());
        }

        fn color(&mut self, index: usize, _: &mut dyn GraphicsBackend) {
            self.log.borrow_mut().push(format!("color({index})"));
        }
    }

    struct Fixed(RenderData);

    impl ObjectType for Fixed {
        fn render_data(&self, _: &dyn SceneObject) -> Option<RenderData> {
            Some(self.0.clone())
        }
    }

    struct Missing;

    impl ObjectType for Missing {
        fn render_data(&self, _: &dyn SceneObject) -> Option<RenderData> {
            None
        }
    }

    struct Obj {
        position: Option<Vec3>,
        transform: Option<Vec<f32>>,
        kind: Rc<dyn ObjectType>,
    }

    impl Obj {
        fn new(kind: impl ObjectType + 'static) -> Self {
            Self {
                position: None,
                transform: None,
                kind: Rc::new(kind),
            }
        }
    }

    impl Spatial for Obj {
        fn position(&self) -> Option<Vec3> {
            self.position
        }

        fn transform(&self) -> Option<Vec<f32>> {
            self.transform.clone()
        }
    }

    impl SceneObject for Obj {
        fn object_type(&self) -> Rc<dyn ObjectType> {
            Rc::clone(&self.kind)
        }
    }

    struct OneRealm(Vec<Rc<dyn SceneObject>>);

    impl Realm for OneRealm {
        fn objects(&self) -> Vec<Rc<dyn SceneObject>> {
            self.0.clone()
        }
    }

    struct OneWorld(Rc<dyn Realm>);

    impl World for OneWorld {
        fn realms(&self) -> Vec<Rc<dyn Realm>> {
            vec![Rc::clone(&self.0)]
        }
    }

    fn renderer_with_stubs(log: &Log) -> FrameRenderer {
        let mut renderer = FrameRenderer::default();
        renderer.add_renderer(RendererPlugin::geometry(RecordingGeometry { log: log.clone() }));
        renderer.add_renderer(RendererPlugin::color(RecordingColor { log: log.clone() }));
        renderer
    }

    fn bind(renderer: &mut FrameRenderer, objects: Vec<Obj>) {
        let objects = objects
            .into_iter()
            .map(|o| Rc::new(o) as Rc<dyn SceneObject>)
            .collect();
        let world = OneWorld(Rc::new(OneRealm(objects)));
        renderer.load_world(&world).unwrap();
    }

    fn colored(n: u32) -> Obj {
        Obj::new(Fixed(
            RenderData::geometry(Payload::new(n)).with_color(Payload::new("rgb")),
        ))
    }

    #[test]
    fn unbound_world_draws_diagnostic_triangle() {
        let renderer = FrameRenderer::default();
        let mut gfx = RecordingBackend::new();
        let stats = renderer.render_frame(&mut gfx);

        assert!(stats.diagnostic);
        assert_eq!(
            gfx.calls(),
            &[
                DrawCall::Begin(Primitive::Triangles),
                DrawCall::Color(Color::RED),
                DrawCall::Vertex(Vec3::new(-1.0, 1.0, -5.0)),
                DrawCall::Color(Color::GREEN),
                DrawCall::Vertex(Vec3::new(0.0, -1.0, -5.0)),
                DrawCall::Color(Color::BLUE),
                DrawCall::Vertex(Vec3::new(1.0, 1.0, -5.0)),
                DrawCall::End,
            ]
        );
    }

    #[test]
    fn diagnostic_triangle_can_be_disabled() {
        let renderer = FrameRenderer::new(RenderConfig {
            diagnostic_triangle: false,
            ..RenderConfig::default()
        });
        let mut gfx = RecordingBackend::new();
        let stats = renderer.render_frame(&mut gfx);
        assert!(!stats.diagnostic);
        assert!(gfx.calls().is_empty());
    }

    #[test]
    fn color_and_geometry_interleave() {
        for n in [0_u32, 1, 3] {
            let log: Log = Rc::default();
            let mut renderer = renderer_with_stubs(&log);
            bind(&mut renderer, vec![colored(n)]);
            renderer.render_frame(&mut RecordingBackend::new());

            let mut expected = vec!["start(geom)".to_string(), "start(color)".to_string()];
            for i in 0..n {
                expected.push(format!("color({i})"));
                expected.push(format!("vertex({i})"));
            }
            expected.push("end".into());
            assert_eq!(*log.borrow(), expected, "n = {n}");
        }
    }

    #[test]
    fn missing_color_renderer_draws_geometry_only() {
        let log: Log = Rc::default();
        let mut renderer = renderer_with_stubs(&log);
        // color payload of a type no color renderer accepts
        let obj = Obj::new(Fixed(
            RenderData::geometry(Payload::new(2_u32)).with_color(Payload::new(0.5_f64)),
        ));
        bind(&mut renderer, vec![obj]);
        renderer.render_frame(&mut RecordingBackend::new());
        assert_eq!(
            *log.borrow(),
            vec!["start(geom)", "vertex(0)", "vertex(1)", "end"]
        );
    }

    #[test]
    fn unrenderable_objects_are_skipped_without_side_effects() {
        let log: Log = Rc::default();

        let mut alone = renderer_with_stubs(&log);
        bind(&mut alone, vec![colored(3)]);
        let mut gfx_alone = RecordingBackend::new();
        alone.render_frame(&mut gfx_alone);

        let mut mixed = renderer_with_stubs(&log);
        bind(
            &mut mixed,
            vec![
                Obj::new(Fixed(RenderData::geometry(Payload::new("no geometry plugin")))),
                colored(3),
                Obj::new(Missing),
                Obj::new(Fixed(RenderData::default())),
            ],
        );
        let mut gfx_mixed = RecordingBackend::new();
        let stats = mixed.render_frame(&mut gfx_mixed);

        assert_eq!(gfx_mixed.calls(), gfx_alone.calls());
        assert_eq!(stats.objects_seen, 4);
        assert_eq!(stats.objects_drawn, 1);
        assert_eq!(stats.skipped_no_data, 1);
        assert_eq!(stats.skipped_no_renderer, 2);
        assert_eq!(stats.vertices, 3);
    }

    #[test]
    fn camera_then_object_scope() {
        let log: Log = Rc::default();
        let mut renderer = renderer_with_stubs(&log);
        let mut obj = Obj::new(Fixed(RenderData::geometry(Payload::new(0_u32))));
        obj.position = Some(Vec3::new(1.0, 2.0, 3.0));
        let scale = Mat4::from_scale(Vec3::splat(2.0));
        obj.transform = Some(mat4_to_array(&scale).to_vec());
        bind(&mut renderer, vec![obj]);

        let mut gfx = RecordingBackend::new();
        renderer.render_frame(&mut gfx);

        let view = renderer.camera().resolve(None);
        assert_eq!(
            gfx.calls(),
            &[
                DrawCall::PushMatrix,
                DrawCall::LoadMatrix(view),
                DrawCall::PushMatrix,
                DrawCall::Translate(Vec3::new(1.0, 2.0, 3.0)),
                DrawCall::MulMatrix(scale),
                DrawCall::PopMatrix,
                DrawCall::PopMatrix,
            ]
        );
        assert_eq!(gfx.depth(), 1);
    }

    #[test]
    fn object_without_placement_only_pushes_and_pops() {
        let log: Log = Rc::default();
        let mut renderer = renderer_with_stubs(&log);
        let mut obj = Obj::new(Fixed(RenderData::geometry(Payload::new(0_u32))));
        // malformed matrix is ignored
        obj.transform = Some(vec![1.0; 4]);
        bind(&mut renderer, vec![obj]);

        let mut gfx = RecordingBackend::new();
        renderer.render_frame(&mut gfx);
        assert!(
            !gfx
                .calls()
                .iter()
                .any(|c| matches!(c, DrawCall::Translate(_) | DrawCall::MulMatrix(_)))
        );
    }

    #[test]
    fn player_drives_view_matrix() {
        let log: Log = Rc::default();
        let mut renderer = renderer_with_stubs(&log);
        bind(&mut renderer, Vec::new());
        renderer.set_player(PlayerBinding::from_fns(
            || Some(Vec3::new(0.0, 0.0, -2.0)),
            || Some(mat4_to_array(&Mat4::IDENTITY).to_vec()),
        ));

        let mut gfx = RecordingBackend::new();
        let stats = renderer.render_frame(&mut gfx);
        assert!(!stats.diagnostic);
        assert_eq!(
            gfx.calls()[1],
            DrawCall::LoadMatrix(Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)))
        );
    }

    #[test]
    fn dual_plugin_serves_both_roles() {
        struct Both {
            colors: usize,
        }

        impl GeometryRenderer for Both {
            fn can_render(&self, payload: Option<&Payload>) -> bool {
                payload.is_some_and(|p| p.is::<u8>())
            }

            fn start(&mut self, _: Option<&Payload>, _: &mut dyn GraphicsBackend) -> usize {
                2
            }

            fn vertex(&mut self, _: usize, gfx: &mut dyn GraphicsBackend) {
                gfx.vertex(Vec3::ONE);
            }

            fn end(&mut self, _: &mut dyn GraphicsBackend) {}
        }

        impl ColorRenderer for Both {
            fn can_render(&self, payload: Option<&Payload>) -> bool {
                payload.is_some_and(|p| p.is::<u8>())
            }

            fn start(&mut self, _: Option<&Payload>) {}

            fn color(&mut self, _: usize, gfx: &mut dyn GraphicsBackend) {
                self.colors += 1;
                gfx.color(Color::WHITE);
            }
        }

        let both = Rc::new(RefCell::new(Both { colors: 0 }));
        let mut renderer = FrameRenderer::default();
        renderer.add_renderer(RendererPlugin::shared_dual(both.clone()));
        let obj = Obj::new(Fixed(
            RenderData::geometry(Payload::new(1_u8)).with_color(Payload::new(2_u8)),
        ));
        bind(&mut renderer, vec![obj]);

        let stats = renderer.render_frame(&mut RecordingBackend::new());
        assert_eq!(stats.vertices, 2);
        assert_eq!(both.borrow().colors, 2);
    }
}

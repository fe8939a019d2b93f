use std::rc::Rc;

use glam::Vec3;

use crate::payload::RenderData;

/// Anything with an optional position and optional 16-float transform.
///
/// Objects and the player share this shape.
pub trait Spatial {
    fn position(&self) -> Option<Vec3>;

    /// 16 floats, translation at indices 12..=14. Other lengths are treated
    /// as absent.
    fn transform(&self) -> Option<Vec<f32>>;
}

/// Host-side type of a scene object; produces its render payloads.
pub trait ObjectType {
    fn render_data(&self, object: &dyn SceneObject) -> Option<RenderData>;
}

/// An object in the host's world graph.
pub trait SceneObject: Spatial {
    fn object_type(&self) -> Rc<dyn ObjectType>;
}

/// Sub-partition of a world with its own object enumeration.
pub trait Realm {
    fn objects(&self) -> Vec<Rc<dyn SceneObject>>;
}

pub trait World {
    fn realms(&self) -> Vec<Rc<dyn Realm>>;
}

/// Errors from binding host objects.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("world has no realm to enumerate objects from")]
    NoRealms,
}

type ObjectSource = Box<dyn Fn() -> Vec<Rc<dyn SceneObject>>>;

/// Object enumeration captured from the first realm of a bound world.
///
/// Binding is a one-shot capture: realms added to or removed from the world
/// afterwards are not seen until the world is bound again.
#[derive(Default)]
pub struct SceneBinding {
    source: Option<ObjectSource>,
}

impl SceneBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture realm 0's enumerator. On error the previous capture is kept.
    pub fn bind_world(&mut self, world: &dyn World) -> Result<(), SceneError> {
        let realm = world.realms().into_iter().next().ok_or(SceneError::NoRealms)?;
        self.source = Some(Box::new(move || realm.objects()));
        tracing::debug!("world bound");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Enumerate the current objects, or `None` when nothing is bound.
    pub fn objects(&self) -> Option<Vec<Rc<dyn SceneObject>>> {
        self.source.as_ref().map(|source| source())
    }
}

type PositionFn = Box<dyn Fn() -> Option<Vec3>>;
type TransformFn = Box<dyn Fn() -> Option<Vec<f32>>>;

/// Position and transform accessors captured from the player.
pub struct PlayerBinding {
    position: PositionFn,
    transform: TransformFn,
}

impl PlayerBinding {
    /// Capture the accessors of a host player object.
    pub fn capture(player: Rc<dyn Spatial>) -> Self {
        let for_transform = Rc::clone(&player);
        Self {
            position: Box::new(move || player.position()),
            transform: Box::new(move || for_transform.transform()),
        }
    }

    pub fn from_fns(
        position: impl Fn() -> Option<Vec3> + 'static,
        transform: impl Fn() -> Option<Vec<f32>> + 'static,
    ) -> Self {
        Self {
            position: Box::new(position),
            transform: Box::new(transform),
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        (self.position)()
    }

    pub fn transform(&self) -> Option<Vec<f32>> {
        (self.transform)()
    }
}

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Type-erased render payload handed from a host object type to renderer plugins.
///
/// The dispatcher never looks inside a payload. Plugins inspect the concrete
/// type in their `can_render` probe and keep a cheap clone once started.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Whether the payload holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Shared handle to the inner value, if it is a `T`.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.0).downcast::<T>().ok()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&(*self.0).type_id()).finish()
    }
}

/// The pair of payloads an object type produces for one object in one frame.
#[derive(Debug, Clone, Default)]
pub struct RenderData {
    pub geometry: Option<Payload>,
    pub color: Option<Payload>,
}

impl RenderData {
    pub fn new(geometry: Option<Payload>, color: Option<Payload>) -> Self {
        Self { geometry, color }
    }

    /// Geometry only, no color payload.
    pub fn geometry(geometry: Payload) -> Self {
        Self {
            geometry: Some(geometry),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Payload) -> Self {
        self.color = Some(color);
        self
    }
}

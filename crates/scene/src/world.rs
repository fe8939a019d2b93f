use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;
use prism_common::{EntityId, Transform, mat4_to_array};
use prism_render::{ObjectType, Realm, SceneObject, Spatial, World};

/// An object living in a realm.
///
/// Position and basis come from its [`Transform`]; an explicit 16-float
/// matrix, when set, replaces the basis.
pub struct Entity {
    id: EntityId,
    transform: Cell<Transform>,
    matrix: RefCell<Option<Vec<f32>>>,
    kind: Rc<dyn ObjectType>,
}

impl Entity {
    pub fn new(transform: Transform, kind: Rc<dyn ObjectType>) -> Self {
        Self {
            id: EntityId::new(),
            transform: Cell::new(transform),
            matrix: RefCell::new(None),
            kind,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn get_transform(&self) -> Transform {
        self.transform.get()
    }

    pub fn set_transform(&self, transform: Transform) {
        self.transform.set(transform);
    }

    pub fn set_position(&self, position: Vec3) {
        let mut t = self.transform.get();
        t.position = position;
        self.transform.set(t);
    }

    /// Override the basis with a raw 16-float matrix; `None` restores it.
    ///
    /// The values are passed through unchecked so hosts can exercise the
    /// renderer's handling of malformed matrices.
    pub fn set_matrix(&self, matrix: Option<Vec<f32>>) {
        *self.matrix.borrow_mut() = matrix;
    }
}

impl Spatial for Entity {
    fn position(&self) -> Option<Vec3> {
        Some(self.transform.get().position)
    }

    fn transform(&self) -> Option<Vec<f32>> {
        if let Some(matrix) = self.matrix.borrow().as_ref() {
            return Some(matrix.clone());
        }
        let t = self.transform.get();
        (!t.has_identity_basis()).then(|| t.basis_array().to_vec())
    }
}

impl SceneObject for Entity {
    fn object_type(&self) -> Rc<dyn ObjectType> {
        Rc::clone(&self.kind)
    }
}

/// A realm: an ordered list of entities. Enumeration follows spawn order.
#[derive(Default)]
pub struct SceneRealm {
    name: String,
    entities: RefCell<Vec<Rc<Entity>>>,
}

impl SceneRealm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawn an entity of the given type. Returns a handle to it.
    pub fn spawn(&self, transform: Transform, kind: Rc<dyn ObjectType>) -> Rc<Entity> {
        let entity = Rc::new(Entity::new(transform, kind));
        self.entities.borrow_mut().push(Rc::clone(&entity));
        tracing::debug!(realm = %self.name, id = %entity.id().0, "entity spawned");
        entity
    }

    /// Remove an entity. Returns it if it existed.
    pub fn despawn(&self, id: EntityId) -> Option<Rc<Entity>> {
        let mut entities = self.entities.borrow_mut();
        let index = entities.iter().position(|e| e.id() == id)?;
        Some(entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<Rc<Entity>> {
        self.entities.borrow().iter().find(|e| e.id() == id).cloned()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.borrow().len()
    }
}

impl Realm for SceneRealm {
    fn objects(&self) -> Vec<Rc<dyn SceneObject>> {
        self.entities
            .borrow()
            .iter()
            .map(|e| Rc::clone(e) as Rc<dyn SceneObject>)
            .collect()
    }
}

/// Host world: an ordered list of realms.
#[derive(Default)]
pub struct SceneWorld {
    realms: RefCell<Vec<Rc<SceneRealm>>>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a realm and return it.
    pub fn add_realm(&self, name: impl Into<String>) -> Rc<SceneRealm> {
        let realm = Rc::new(SceneRealm::new(name));
        self.realms.borrow_mut().push(Rc::clone(&realm));
        realm
    }

    /// Insert a realm in front, making it the one a renderer binds.
    pub fn push_front_realm(&self, name: impl Into<String>) -> Rc<SceneRealm> {
        let realm = Rc::new(SceneRealm::new(name));
        self.realms.borrow_mut().insert(0, Rc::clone(&realm));
        realm
    }

    pub fn realm_count(&self) -> usize {
        self.realms.borrow().len()
    }

    pub fn entity_count(&self) -> usize {
        self.realms.borrow().iter().map(|r| r.entity_count()).sum()
    }
}

impl World for SceneWorld {
    fn realms(&self) -> Vec<Rc<dyn Realm>> {
        self.realms
            .borrow()
            .iter()
            .map(|r| Rc::clone(r) as Rc<dyn Realm>)
            .collect()
    }
}

/// Player with an optional explicit view transform.
#[derive(Default)]
pub struct Player {
    position: Cell<Option<Vec3>>,
    view: RefCell<Option<Vec<f32>>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3) -> Self {
        let player = Self::default();
        player.set_position(Some(position));
        player
    }

    pub fn set_position(&self, position: Option<Vec3>) {
        self.position.set(position);
    }

    /// Set the view as a matrix; stored in the host array layout.
    pub fn set_view(&self, view: Option<glam::Mat4>) {
        *self.view.borrow_mut() = view.map(|m| mat4_to_array(&m).to_vec());
    }

    pub fn set_view_raw(&self, view: Option<Vec<f32>>) {
        *self.view.borrow_mut() = view;
    }
}

impl Spatial for Player {
    fn position(&self) -> Option<Vec3> {
        self.position.get()
    }

    fn transform(&self) -> Option<Vec<f32>> {
        self.view.borrow().clone()
    }
}

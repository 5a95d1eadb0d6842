//! In-memory scene host: entities, the two editor cameras, projection and
//! screen-space picking.

pub mod camera;
pub mod picking;

use glam::{Vec2, Vec3};
use shared::{CameraKind, EntityId, Transform};

use crate::host::{EntityRecord, SceneHost};
use crate::state::settings::ViewportSettings;
use camera::{SceneCamera, ScreenPoint};
use picking::{pick_nearest, Aabb, ScreenRect};

/// Scene graph kept in memory, used headless and in tests
#[derive(Debug, Clone)]
pub struct MemoryScene {
    entities: Vec<EntityRecord>,
    normal_camera: SceneCamera,
    free_camera: SceneCamera,
    active: CameraKind,
    width: f32,
    height: f32,
}

impl MemoryScene {
    pub fn new(viewport: &ViewportSettings) -> Self {
        let eye = Vec3::new(0.0, 50.0, 30.0);
        Self {
            entities: Vec::new(),
            normal_camera: SceneCamera::new(eye, Vec3::ZERO, viewport.fov_degrees),
            free_camera: SceneCamera::new(eye, Vec3::ZERO, viewport.fov_degrees),
            active: CameraKind::Normal,
            width: viewport.width.max(1) as f32,
            height: viewport.height.max(1) as f32,
        }
    }

    /// Add an editable unit-box entity and return its generated ID
    pub fn spawn(&mut self, name: &str, transform: Transform) -> EntityId {
        let id = uuid::Uuid::new_v4().to_string();
        self.entities.push(EntityRecord::new(id.clone(), name, transform));
        id
    }

    /// Add a fully specified entity. An existing entity with the same ID is replaced.
    pub fn add(&mut self, record: EntityRecord) {
        self.entities.retain(|e| e.id != record.id);
        self.entities.push(record);
    }

    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn camera(&self, kind: CameraKind) -> &SceneCamera {
        match kind {
            CameraKind::Normal => &self.normal_camera,
            CameraKind::Free => &self.free_camera,
        }
    }

    fn camera_mut(&mut self, kind: CameraKind) -> &mut SceneCamera {
        match kind {
            CameraKind::Normal => &mut self.normal_camera,
            CameraKind::Free => &mut self.free_camera,
        }
    }

    /// Project a world point through the active camera
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        self.camera(self.active).project(point, self.width, self.height)
    }

    /// Screen position of an entity's center, rounded to whole pixels
    pub fn screen_position(&self, id: &str) -> Option<(i32, i32)> {
        let entity = self.get(id)?;
        let center = Aabb::from_transform(&entity.transform, entity.half_extents).center();
        let p = self.project(center)?;
        Some((p.x.round() as i32, p.y.round() as i32))
    }
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new(&ViewportSettings::default())
    }
}

impl SceneHost for MemoryScene {
    fn transform(&self, id: &str) -> Option<Transform> {
        self.get(id).map(|e| e.transform)
    }

    fn set_transform(&mut self, id: &str, transform: Transform) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.transform = transform;
                true
            }
            None => false,
        }
    }

    fn remove_entity(&mut self, id: &str) -> Option<EntityRecord> {
        let pos = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(pos))
    }

    fn insert_entity(&mut self, record: EntityRecord) {
        self.add(record);
    }

    fn camera_position(&self, camera: CameraKind) -> Vec3 {
        self.camera(camera).position
    }

    fn set_camera_position(&mut self, camera: CameraKind, position: Vec3) {
        self.camera_mut(camera).position = position;
    }

    fn camera_target(&self, camera: CameraKind) -> Vec3 {
        self.camera(camera).target
    }

    fn set_camera_target(&mut self, camera: CameraKind, target: Vec3) {
        self.camera_mut(camera).target = target;
    }

    fn set_active_camera(&mut self, camera: CameraKind) {
        self.active = camera;
    }

    fn active_camera(&self) -> CameraKind {
        self.active
    }

    fn set_input_receiver_enabled(&mut self, camera: CameraKind, enabled: bool) {
        self.camera_mut(camera).input_enabled = enabled;
    }

    fn pick(&self, x: i32, y: i32, tolerance_px: f32) -> Option<EntityId> {
        let camera = self.camera(self.active);
        let rects = self.entities.iter().filter(|e| e.editable).filter_map(|e| {
            let aabb = Aabb::from_transform(&e.transform, e.half_extents);
            ScreenRect::project(&aabb, camera, self.width, self.height).map(|r| (&e.id, r))
        });
        pick_nearest(Vec2::new(x as f32, y as f32), tolerance_px, rects)
    }
}

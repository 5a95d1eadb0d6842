//! Capabilities the editor needs from the scene-graph host.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{CameraKind, EntityId, Transform};

/// Everything the host knows about one editable entity.
///
/// Returned by [`SceneHost::remove_entity`] so a removal can be reverted
/// with [`SceneHost::insert_entity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
    pub transform: Transform,
    /// Half extents of the untransformed bounding box
    pub half_extents: [f64; 3],
    /// Only editable entities can be picked
    pub editable: bool,
}

impl EntityRecord {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, transform: Transform) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transform,
            half_extents: [1.0; 3],
            editable: true,
        }
    }
}

/// Scene graph, camera and picking facilities of the host engine.
pub trait SceneHost {
    /// Current transform of an entity, `None` if it is not in the scene
    fn transform(&self, id: &str) -> Option<Transform>;

    /// Overwrite an entity's transform. Returns `false` for unknown ids.
    fn set_transform(&mut self, id: &str, transform: Transform) -> bool;

    /// Detach an entity from the scene and hand back its record
    fn remove_entity(&mut self, id: &str) -> Option<EntityRecord>;

    /// Put a previously removed entity back into the scene
    fn insert_entity(&mut self, record: EntityRecord);

    fn camera_position(&self, camera: CameraKind) -> Vec3;
    fn set_camera_position(&mut self, camera: CameraKind, position: Vec3);
    fn camera_target(&self, camera: CameraKind) -> Vec3;
    fn set_camera_target(&mut self, camera: CameraKind, target: Vec3);

    fn set_active_camera(&mut self, camera: CameraKind);
    fn active_camera(&self) -> CameraKind;

    /// Enable or disable the host-driven input receiver of a camera
    fn set_input_receiver_enabled(&mut self, camera: CameraKind, enabled: bool);

    /// Nearest editable entity under a screen point, widened by
    /// `tolerance_px` pixels on every side of its screen-space bounds
    fn pick(&self, x: i32, y: i32, tolerance_px: f32) -> Option<EntityId>;
}

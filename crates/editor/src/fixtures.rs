//! Factory functions for scenes and entity records used by tests, the
//! script runner and the demo start-up scene.

use shared::{EntityId, Transform};

use crate::host::EntityRecord;
use crate::viewport::MemoryScene;

/// Number of entities in the demo scene
pub const DEMO_ENTITY_COUNT: usize = 9;

/// Spacing between demo entities in world units
pub const DEMO_SPACING: f64 = 10.0;

/// Editable entity record with unit half extents.
pub fn entity(id: &str, name: &str, position: [f64; 3]) -> EntityRecord {
    EntityRecord::new(id, name, Transform::at(position))
}

/// Editable entity record with custom half extents.
pub fn box_entity(id: &str, name: &str, position: [f64; 3], half_extents: [f64; 3]) -> EntityRecord {
    EntityRecord {
        half_extents,
        ..entity(id, name, position)
    }
}

/// Non-editable entity (ignored by picking).
pub fn static_entity(id: &str, name: &str, position: [f64; 3]) -> EntityRecord {
    EntityRecord {
        editable: false,
        ..entity(id, name, position)
    }
}

/// Populate a scene with the start-up set: nine editable entities on a
/// 3x3 grid around the origin. Returns their IDs in grid order.
pub fn populate_demo_scene(scene: &mut MemoryScene) -> Vec<EntityId> {
    (0..DEMO_ENTITY_COUNT)
        .map(|i| {
            let col = (i % 3) as f64 - 1.0;
            let row = (i / 3) as f64 - 1.0;
            let position = [col * DEMO_SPACING, 0.0, row * DEMO_SPACING];
            scene.spawn(&format!("Cat {}", i + 1), Transform::at(position))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SceneHost;

    #[test]
    fn test_demo_scene() {
        let mut scene = MemoryScene::default();
        let ids = populate_demo_scene(&mut scene);
        assert_eq!(ids.len(), DEMO_ENTITY_COUNT);
        assert_eq!(scene.entity_count(), DEMO_ENTITY_COUNT);
        assert_eq!(scene.transform(&ids[4]).unwrap().position, [0.0, 0.0, 0.0]);
        assert_eq!(scene.get(&ids[0]).unwrap().name, "Cat 1");
    }

    #[test]
    fn test_demo_entities_pickable() {
        let mut scene = MemoryScene::default();
        let ids = populate_demo_scene(&mut scene);
        for id in &ids {
            let (x, y) = scene.screen_position(id).unwrap();
            assert_eq!(scene.pick(x, y, 0.0).as_ref(), Some(id));
        }
    }

    #[test]
    fn test_record_factories() {
        let r = box_entity("b", "Box", [1.0, 2.0, 3.0], [2.0, 2.0, 2.0]);
        assert_eq!(r.half_extents, [2.0; 3]);
        assert!(r.editable);
        assert!(!static_entity("s", "Ground", [0.0; 3]).editable);
    }
}

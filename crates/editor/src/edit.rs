//! Reversible edit commands over a selection.
//!
//! Transform commands keep the pre-edit transform of every target, so
//! [`EditCommand::undo`] restores it exactly and [`EditCommand::redo`] always
//! recomputes the result from that base plus the current delta.

use shared::{EntityId, Transform};

use crate::host::{EntityRecord, SceneHost};
use crate::state::selection::SelectionState;
use crate::state::settings::EditSettings;

/// Move/Rotate/Scale payload: targets with their base transforms and the
/// current delta in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEdit {
    targets: Vec<(EntityId, Transform)>,
    uniform: bool,
    delta: [f64; 3],
    settings: EditSettings,
}

impl TransformEdit {
    fn capture<H: SceneHost + ?Sized>(
        host: &H,
        selection: &[EntityId],
        uniform: bool,
        settings: EditSettings,
    ) -> Self {
        let targets = selection
            .iter()
            .filter_map(|id| host.transform(id).map(|t| (id.clone(), t)))
            .collect();
        Self {
            targets,
            uniform,
            delta: [0.0; 3],
            settings,
        }
    }

    fn restore<H: SceneHost + ?Sized>(&self, host: &mut H) {
        for (id, base) in &self.targets {
            host.set_transform(id, *base);
        }
    }

    fn apply_with<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        f: impl Fn(&Transform, [f64; 3]) -> Transform,
    ) {
        for (id, base) in &self.targets {
            host.set_transform(id, f(base, self.delta));
        }
    }
}

/// Keep only the component with the largest magnitude
fn dominant_axis(d: [f64; 3]) -> [f64; 3] {
    let mut axis = 0;
    for i in 1..3 {
        if d[i].abs() > d[axis].abs() {
            axis = i;
        }
    }
    let mut out = [0.0; 3];
    out[axis] = d[axis];
    out
}

fn moved(base: &Transform, d: [f64; 3], uniform: bool, s: &EditSettings) -> Transform {
    let d = if uniform { dominant_axis(d) } else { d };
    let mut t = *base;
    for i in 0..3 {
        t.position[i] = base.position[i] + d[i] * s.move_per_pixel;
    }
    t
}

fn rotated(base: &Transform, d: [f64; 3], uniform: bool, s: &EditSettings) -> Transform {
    let d = if uniform { dominant_axis(d) } else { d };
    let mut t = *base;
    for i in 0..3 {
        t.rotation[i] = base.rotation[i] + d[i] * s.rotate_degrees_per_pixel;
    }
    t
}

fn scaled(base: &Transform, d: [f64; 3], uniform: bool, s: &EditSettings) -> Transform {
    let factor = |v: f64| (1.0 + v * s.scale_per_pixel).max(s.min_scale_factor);
    let mut t = *base;
    if uniform {
        let f = factor(dominant_axis(d).iter().sum());
        for i in 0..3 {
            t.scale[i] = base.scale[i] * f;
        }
    } else {
        for i in 0..3 {
            t.scale[i] = base.scale[i] * factor(d[i]);
        }
    }
    t
}

/// Delete payload: ids captured at creation, records held while deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteEdit {
    ids: Vec<EntityId>,
    removed: Vec<EntityRecord>,
}

impl DeleteEdit {
    /// Whether the entities are currently out of the scene
    pub fn is_applied(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// One reversible edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Move(TransformEdit),
    Rotate(TransformEdit),
    Scale(TransformEdit),
    Delete(DeleteEdit),
}

impl EditCommand {
    pub fn translate<H: SceneHost + ?Sized>(
        host: &H,
        selection: &[EntityId],
        uniform: bool,
        settings: EditSettings,
    ) -> Self {
        EditCommand::Move(TransformEdit::capture(host, selection, uniform, settings))
    }

    pub fn rotate<H: SceneHost + ?Sized>(
        host: &H,
        selection: &[EntityId],
        uniform: bool,
        settings: EditSettings,
    ) -> Self {
        EditCommand::Rotate(TransformEdit::capture(host, selection, uniform, settings))
    }

    pub fn scale<H: SceneHost + ?Sized>(
        host: &H,
        selection: &[EntityId],
        uniform: bool,
        settings: EditSettings,
    ) -> Self {
        EditCommand::Scale(TransformEdit::capture(host, selection, uniform, settings))
    }

    pub fn delete(selection: &[EntityId]) -> Self {
        EditCommand::Delete(DeleteEdit {
            ids: selection.to_vec(),
            removed: Vec::new(),
        })
    }

    /// Apply the command with its current delta
    pub fn redo<H: SceneHost + ?Sized>(&mut self, host: &mut H, selection: &mut SelectionState) {
        match self {
            EditCommand::Move(e) => {
                let (uniform, s) = (e.uniform, e.settings);
                e.apply_with(host, |b, d| moved(b, d, uniform, &s));
            }
            EditCommand::Rotate(e) => {
                let (uniform, s) = (e.uniform, e.settings);
                e.apply_with(host, |b, d| rotated(b, d, uniform, &s));
            }
            EditCommand::Scale(e) => {
                let (uniform, s) = (e.uniform, e.settings);
                e.apply_with(host, |b, d| scaled(b, d, uniform, &s));
            }
            EditCommand::Delete(e) => {
                if e.is_applied() {
                    return;
                }
                for id in &e.ids {
                    if let Some(record) = host.remove_entity(id) {
                        e.removed.push(record);
                    }
                    selection.remove(id);
                }
            }
        }
    }

    /// Revert the last `redo`
    pub fn undo<H: SceneHost + ?Sized>(&mut self, host: &mut H, selection: &mut SelectionState) {
        match self {
            EditCommand::Move(e) | EditCommand::Rotate(e) | EditCommand::Scale(e) => {
                e.restore(host);
            }
            EditCommand::Delete(e) => {
                for record in e.removed.drain(..) {
                    let id = record.id.clone();
                    host.insert_entity(record);
                    selection.select(id);
                }
            }
        }
    }

    /// Replace the delta used by the next `redo`
    pub fn update(&mut self, dx: f64, dy: f64, dz: f64) {
        match self {
            EditCommand::Move(e) | EditCommand::Rotate(e) | EditCommand::Scale(e) => {
                e.delta = [dx, dy, dz];
            }
            EditCommand::Delete(_) => {}
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditCommand::Move(_) => "move",
            EditCommand::Rotate(_) => "rotate",
            EditCommand::Scale(_) => "scale",
            EditCommand::Delete(_) => "delete",
        }
    }

    /// Number of entities the command touches
    pub fn target_count(&self) -> usize {
        match self {
            EditCommand::Move(e) | EditCommand::Rotate(e) | EditCommand::Scale(e) => {
                e.targets.len()
            }
            EditCommand::Delete(e) => e.ids.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::MemoryScene;

    fn scene_with(transforms: &[Transform]) -> (MemoryScene, Vec<EntityId>) {
        let mut scene = MemoryScene::default();
        let ids = transforms
            .iter()
            .enumerate()
            .map(|(i, t)| scene.spawn(&format!("e{i}"), *t))
            .collect();
        (scene, ids)
    }

    fn odd_transform() -> Transform {
        Transform {
            position: [0.1, -3.7, 1e-9],
            rotation: [33.3, 0.7, -181.0],
            scale: [0.3, 1.7, 2.2],
        }
    }

    #[test]
    fn test_redo_undo_bit_identical() {
        let base = odd_transform();
        let makers: [fn(&MemoryScene, &[EntityId], bool, EditSettings) -> EditCommand; 3] =
            [EditCommand::translate, EditCommand::rotate, EditCommand::scale];
        for make in makers {
            for uniform in [false, true] {
                let (mut scene, ids) = scene_with(&[base]);
                let mut sel = SelectionState::default();
                let mut cmd = make(&scene, &ids, uniform, EditSettings::default());
                cmd.update(-7.0, 0.3, 13.0);
                cmd.redo(&mut scene, &mut sel);
                assert_ne!(scene.transform(&ids[0]), Some(base));
                cmd.undo(&mut scene, &mut sel);
                let t = scene.transform(&ids[0]).unwrap();
                for i in 0..3 {
                    assert_eq!(t.position[i].to_bits(), base.position[i].to_bits());
                    assert_eq!(t.rotation[i].to_bits(), base.rotation[i].to_bits());
                    assert_eq!(t.scale[i].to_bits(), base.scale[i].to_bits());
                }
            }
        }
    }

    #[test]
    fn test_undo_update_redo_does_not_accumulate() {
        let (mut scene, ids) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let mut cmd = EditCommand::translate(&scene, &ids, false, EditSettings::default());
        for _ in 0..5 {
            cmd.undo(&mut scene, &mut sel);
            cmd.update(10.0, 0.0, 0.0);
            cmd.redo(&mut scene, &mut sel);
        }
        let t = scene.transform(&ids[0]).unwrap();
        assert_eq!(t.position, [10.0 * 0.1, 0.0, 0.0]);
    }

    #[test]
    fn test_move_applies_scaled_delta() {
        let (mut scene, ids) = scene_with(&[Transform::at([1.0, 2.0, 3.0])]);
        let mut sel = SelectionState::default();
        let settings = EditSettings {
            move_per_pixel: 0.5,
            ..EditSettings::default()
        };
        let mut cmd = EditCommand::translate(&scene, &ids, false, settings);
        cmd.update(-10.0, 0.0, 4.0);
        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.transform(&ids[0]).unwrap().position, [-4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_uniform_move_locks_dominant_axis() {
        let (mut scene, ids) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let settings = EditSettings {
            move_per_pixel: 1.0,
            ..EditSettings::default()
        };
        let mut cmd = EditCommand::translate(&scene, &ids, true, settings);
        cmd.update(-3.0, 0.0, 8.0);
        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.transform(&ids[0]).unwrap().position, [0.0, 0.0, 8.0]);
    }

    #[test]
    fn test_rotate_adds_degrees() {
        let (mut scene, ids) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let mut cmd = EditCommand::rotate(&scene, &ids, false, EditSettings::default());
        cmd.update(0.0, -15.0, 0.0);
        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.transform(&ids[0]).unwrap().rotation, [0.0, -15.0, 0.0]);
    }

    #[test]
    fn test_uniform_scale_same_factor_all_axes() {
        let base = Transform {
            scale: [1.0, 2.0, 4.0],
            ..Transform::new()
        };
        let (mut scene, ids) = scene_with(&[base]);
        let mut sel = SelectionState::default();
        let settings = EditSettings {
            scale_per_pixel: 0.5,
            ..EditSettings::default()
        };
        let mut cmd = EditCommand::scale(&scene, &ids, true, settings);
        cmd.update(0.0, 2.0, 0.0);
        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.transform(&ids[0]).unwrap().scale, [2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_scale_never_collapses() {
        let (mut scene, ids) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let mut cmd = EditCommand::scale(&scene, &ids, false, EditSettings::default());
        cmd.update(-10_000.0, 0.0, 0.0);
        cmd.redo(&mut scene, &mut sel);
        let s = scene.transform(&ids[0]).unwrap().scale;
        assert!(s[0] > 0.0);
        assert_eq!(s[1], 1.0);
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let (mut scene, _) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let mut cmd = EditCommand::translate(&scene, &[], false, EditSettings::default());
        cmd.update(5.0, 5.0, 5.0);
        cmd.redo(&mut scene, &mut sel);
        cmd.undo(&mut scene, &mut sel);
        assert_eq!(cmd.target_count(), 0);
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let (scene, mut ids) = scene_with(&[Transform::new()]);
        ids.push("missing".to_string());
        let cmd = EditCommand::translate(&scene, &ids, false, EditSettings::default());
        assert_eq!(cmd.target_count(), 1);
    }

    #[test]
    fn test_delete_redo_undo_restores_entities_and_selection() {
        let (mut scene, ids) = scene_with(&[odd_transform(), Transform::new()]);
        let mut sel = SelectionState::default();
        sel.select(ids[0].clone());

        let mut cmd = EditCommand::delete(&[ids[0].clone()]);
        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.entity_count(), 1);
        assert!(scene.transform(&ids[0]).is_none());
        assert!(!sel.is_selected(&ids[0]));

        cmd.undo(&mut scene, &mut sel);
        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.transform(&ids[0]), Some(odd_transform()));
        assert!(sel.is_selected(&ids[0]));

        cmd.redo(&mut scene, &mut sel);
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_delete_redo_twice_is_idempotent() {
        let (mut scene, ids) = scene_with(&[Transform::new()]);
        let mut sel = SelectionState::default();
        let mut cmd = EditCommand::delete(&ids);
        cmd.redo(&mut scene, &mut sel);
        cmd.redo(&mut scene, &mut sel);
        cmd.undo(&mut scene, &mut sel);
        assert_eq!(scene.entity_count(), 1);
    }
}

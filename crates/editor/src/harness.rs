//! Headless test harness driving the editor over an in-memory scene.
//!
//! Wraps a [`Track`] and offers frame-by-frame mouse and keyboard helpers, so
//! tests and the script runner can replay what a user does in the viewport.

use shared::{EditMode, EntityId, Transform};

use crate::host::SceneHost;
use crate::input::{KeyCode, MouseEvent};
use crate::state::settings::EditorSettings;
use crate::track::Track;
use crate::viewport::MemoryScene;

/// Frame time used by the helpers, in milliseconds
pub const FRAME_MS: f32 = 16.0;

/// Headless test harness: owns the editor and its in-memory scene
pub struct TestHarness {
    pub track: Track<MemoryScene>,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let scene = MemoryScene::new(&settings.viewport);
        Self {
            track: Track::new(scene, settings),
        }
    }

    // ── Scene ─────────────────────────────────────────────────

    /// Add an entity at a position and return its ID
    pub fn spawn(&mut self, name: &str, position: [f64; 3]) -> EntityId {
        self.track.host_mut().spawn(name, Transform::at(position))
    }

    pub fn scene(&self) -> &MemoryScene {
        self.track.host()
    }

    pub fn entity_count(&self) -> usize {
        self.scene().entity_count()
    }

    pub fn transform_of(&self, id: &str) -> Option<Transform> {
        self.scene().transform(id)
    }

    /// Screen position of an entity's center through the active camera
    pub fn screen_pos(&self, id: &str) -> Option<(i32, i32)> {
        self.scene().screen_position(id)
    }

    // ── Input ─────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: EditMode) {
        self.track.set_state(mode);
    }

    pub fn key(&mut self, code: KeyCode, pressed: bool) {
        self.track.key_event(code, pressed);
    }

    pub fn mouse(&mut self, event: MouseEvent) {
        self.track.mouse_event(event);
    }

    pub fn move_mouse(&mut self, x: i32, y: i32) {
        self.mouse(MouseEvent::Moved { x, y });
    }

    /// Move the cursor by a relative amount
    pub fn nudge_mouse(&mut self, dx: i32, dy: i32) {
        let m = self.track.input().mouse();
        let (x, y) = (m.x + dx, m.y + dy);
        self.move_mouse(x, y);
    }

    /// Advance one frame
    pub fn frame(&mut self) {
        self.track.animate(FRAME_MS);
    }

    pub fn frame_dt(&mut self, dt: f32) {
        self.track.animate(dt);
    }

    /// Press the left button and process the frame
    pub fn press_left(&mut self) {
        self.mouse(MouseEvent::LeftDown);
        self.frame();
    }

    pub fn release_left(&mut self) {
        self.mouse(MouseEvent::LeftUp);
        self.frame();
    }

    pub fn press_right(&mut self) {
        self.mouse(MouseEvent::RightDown);
        self.frame();
    }

    pub fn release_right(&mut self) {
        self.mouse(MouseEvent::RightUp);
        self.frame();
    }

    /// Move over an entity and click it. Returns `false` if it is off screen.
    pub fn click_entity(&mut self, id: &str) -> bool {
        let Some((x, y)) = self.screen_pos(id) else {
            return false;
        };
        self.move_mouse(x, y);
        self.press_left();
        self.release_left();
        true
    }

    /// Press left, move by `(dx, dy)` in one frame, release
    pub fn drag_left(&mut self, dx: i32, dy: i32) {
        self.press_left();
        self.nudge_mouse(dx, dy);
        self.frame();
        self.release_left();
    }

    /// Press right, move by `(dx, dy)` in one frame, release
    pub fn drag_right(&mut self, dx: i32, dy: i32) {
        self.press_right();
        self.nudge_mouse(dx, dy);
        self.frame();
        self.release_right();
    }

    // ── Editor ────────────────────────────────────────────────

    pub fn selected(&self) -> &[EntityId] {
        self.track.selection().all()
    }

    pub fn select(&mut self, id: &str) {
        self.track.selection_mut().select(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.track.selection_mut().clear();
    }

    pub fn history_len(&self) -> usize {
        self.track.history().len()
    }

    pub fn delete_selected(&mut self) -> bool {
        self.track.delete_selection()
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.track.undo()
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.track.redo()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

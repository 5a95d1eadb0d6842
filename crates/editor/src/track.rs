//! Interaction state machine of the track editor.
//!
//! [`Track`] owns the input snapshot, the selection, the undo history and the
//! in-flight edit command. The host calls [`Track::key_event`] and
//! [`Track::mouse_event`] as events arrive and [`Track::animate`] once per
//! frame.

use shared::{CameraKind, EditMode};

use crate::edit::EditCommand;
use crate::host::SceneHost;
use crate::input::{InputTracker, KeyCode, MouseEvent, TrackedKey};
use crate::navigation;
use crate::state::history::CommandHistory;
use crate::state::selection::SelectionState;
use crate::state::settings::EditorSettings;

/// Editing session over a host scene
pub struct Track<H: SceneHost> {
    host: H,
    settings: EditorSettings,
    input: InputTracker,
    selection: SelectionState,
    history: CommandHistory,
    /// Command being dragged; committed on release, undone on cancel
    active_cmd: Option<EditCommand>,
    state: EditMode,
    grid_on: bool,
    grid_spacing: f64,
}

impl<H: SceneHost> Track<H> {
    pub fn new(mut host: H, settings: EditorSettings) -> Self {
        host.set_input_receiver_enabled(CameraKind::Free, false);
        host.set_active_camera(CameraKind::Normal);

        Self {
            host,
            input: InputTracker::new(),
            selection: SelectionState::default(),
            history: CommandHistory::new(settings.history.limit),
            active_cmd: None,
            state: EditMode::Select,
            grid_on: settings.grid.visible,
            grid_spacing: settings.grid.spacing,
            settings,
        }
    }

    // ── Mode ──────────────────────────────────────────────────

    /// Switch editor mode. A command still being dragged is cancelled.
    pub fn set_state(&mut self, state: EditMode) {
        if state == self.state {
            return;
        }
        if self.active_cmd.is_some() {
            self.cancel_active();
        }

        if self.state == EditMode::FreeCamera {
            self.host.set_input_receiver_enabled(CameraKind::Free, false);
            self.host.set_active_camera(CameraKind::Normal);
        } else if state == EditMode::FreeCamera {
            self.host.set_input_receiver_enabled(CameraKind::Free, true);
            self.host.set_active_camera(CameraKind::Free);
        }

        tracing::debug!(
            "Editor mode {} -> {}",
            self.state.display_name(),
            state.display_name()
        );
        self.state = state;
    }

    pub fn state(&self) -> EditMode {
        self.state
    }

    // ── Events ────────────────────────────────────────────────

    pub fn key_event(&mut self, code: KeyCode, pressed: bool) {
        self.input.key_event(code, pressed);
    }

    pub fn mouse_event(&mut self, event: MouseEvent) {
        self.input.mouse_event(event);
    }

    // ── Frame ─────────────────────────────────────────────────

    /// Advance one frame; `dt` is the elapsed time in milliseconds
    pub fn animate(&mut self, dt: f32) {
        if self.state == EditMode::FreeCamera {
            // wheel input belongs to the free camera's own receiver here
            self.input.take_wheel();
        } else {
            self.animate_normal_camera(dt);
            if self.state.is_edit() {
                // holding ctrl lets you select in the edit modes
                if self.input.is_down(TrackedKey::Ctrl) {
                    self.settle_active();
                    self.animate_selection();
                } else {
                    self.animate_editing();
                }
            } else if self.state == EditMode::Select {
                self.animate_selection();
            }
        }
        self.input.end_frame();
    }

    fn animate_normal_camera(&mut self, dt: f32) {
        let offset = navigation::pan_offset(self.input.keys(), dt, &self.settings.camera);
        if offset != glam::Vec3::ZERO {
            let pos = self.host.camera_position(CameraKind::Normal);
            self.host.set_camera_position(CameraKind::Normal, pos + offset);
            let target = self.host.camera_target(CameraKind::Normal);
            self.host.set_camera_target(CameraKind::Normal, target + offset);
        }

        if self.input.mouse().wheel != 0.0 {
            let wheel = self.input.take_wheel();
            let mut pos = self.host.camera_position(CameraKind::Normal);
            pos.y = navigation::wheel_height(pos.y, dt, wheel, self.settings.camera.min_height);
            self.host.set_camera_position(CameraKind::Normal, pos);
        }
    }

    fn animate_editing(&mut self) {
        let mouse = self.input.mouse().clone();

        if let Some(cmd) = self.active_cmd.as_mut() {
            if mouse.left_btn_down {
                cmd.undo(&mut self.host, &mut self.selection);
                cmd.update(-f64::from(mouse.dx()), 0.0, f64::from(mouse.dy()));
                cmd.redo(&mut self.host, &mut self.selection);
            }
            if mouse.right_btn_down {
                cmd.undo(&mut self.host, &mut self.selection);
                cmd.update(0.0, -f64::from(mouse.dy()), 0.0);
                cmd.redo(&mut self.host, &mut self.selection);
            }
            self.input.store_point();

            if (mouse.right_pressed && mouse.left_btn_down)
                || (mouse.left_pressed && mouse.right_btn_down)
            {
                self.cancel_active();
                return;
            }
        }

        if mouse.any_released() {
            self.commit_active();
        }

        if mouse.any_pressed() && self.active_cmd.is_none() {
            let uniform = self.input.is_down(TrackedKey::Shift);
            let targets = self.selection.all();
            let edit = self.settings.edit;
            let cmd = match self.state {
                EditMode::Move => EditCommand::translate(&self.host, targets, uniform, edit),
                EditMode::Rotate => EditCommand::rotate(&self.host, targets, uniform, edit),
                EditMode::Scale => EditCommand::scale(&self.host, targets, uniform, edit),
                EditMode::Select | EditMode::FreeCamera => return,
            };
            tracing::debug!("Started {} (uniform: {uniform})", cmd.label());
            self.active_cmd = Some(cmd);
            self.input.store_point();
        }
    }

    fn animate_selection(&mut self) {
        let mouse = self.input.mouse();
        if !mouse.left_pressed {
            return;
        }
        let (x, y) = (mouse.x, mouse.y);

        if !self.input.is_down(TrackedKey::Ctrl) {
            self.selection.clear();
        }

        let tolerance = self.settings.picking.tolerance_px;
        if let Some(id) = self.selection.pick(&self.host, x, y, tolerance) {
            tracing::debug!("Picked {id} at ({x}, {y})");
            self.selection.select(id);
        }
    }

    /// A drag whose buttons went up while ctrl routed the frame to picking
    /// is committed on the release edge, or cancelled if the edge was missed.
    fn settle_active(&mut self) {
        let mouse = self.input.mouse();
        if self.active_cmd.is_none() || mouse.left_btn_down || mouse.right_btn_down {
            return;
        }
        if mouse.any_released() {
            self.commit_active();
        } else {
            self.cancel_active();
        }
    }

    fn commit_active(&mut self) {
        if let Some(cmd) = self.active_cmd.take() {
            tracing::debug!("Committed {} over {} entities", cmd.label(), cmd.target_count());
            self.history.add(cmd);
        }
    }

    /// Undo and drop the in-flight command, if any
    fn cancel_active(&mut self) {
        if let Some(mut cmd) = self.active_cmd.take() {
            cmd.undo(&mut self.host, &mut self.selection);
            tracing::debug!("Cancelled {}", cmd.label());
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Delete the selected entities as one undoable command.
    /// Returns `false` when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.cancel_active();

        let mut cmd = EditCommand::delete(self.selection.all());
        self.selection.clear();
        cmd.redo(&mut self.host, &mut self.selection);
        tracing::debug!("Deleted {} entities", cmd.target_count());
        self.history.add(cmd);
        true
    }

    /// Undo the last committed command. Ignored while dragging.
    pub fn undo(&mut self) -> bool {
        if self.active_cmd.is_some() {
            return false;
        }
        self.history.undo(&mut self.host, &mut self.selection)
    }

    /// Redo the last undone command. Ignored while dragging.
    pub fn redo(&mut self) -> bool {
        if self.active_cmd.is_some() {
            return false;
        }
        self.history.redo(&mut self.host, &mut self.selection)
    }

    // ── Grid ──────────────────────────────────────────────────

    pub fn set_grid(&mut self, grid_on: bool) {
        self.grid_on = grid_on;
    }

    pub fn grid_on(&self) -> bool {
        self.grid_on
    }

    /// Positive `dir` makes the grid denser (halves the spacing), negative
    /// makes it sparser. Spacing stays within the configured bounds.
    pub fn change_grid_density(&mut self, dir: i32) {
        let grid = &self.settings.grid;
        let spacing = match dir.signum() {
            1 => self.grid_spacing * 0.5,
            -1 => self.grid_spacing * 2.0,
            _ => return,
        };
        self.grid_spacing = spacing.clamp(grid.min_spacing, grid.max_spacing);
    }

    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn has_active_command(&self) -> bool {
        self.active_cmd.is_some()
    }

    pub fn active_command(&self) -> Option<&EditCommand> {
        self.active_cmd.as_ref()
    }
}

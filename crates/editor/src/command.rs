//! JSON command protocol for driving the editor headlessly.
//!
//! Each command is one host-side action: an input event, a frame tick, a mode
//! change or an inspection query.

use serde::{Deserialize, Serialize};
use shared::{CameraKind, EditMode};

use crate::edit::EditCommand;
use crate::harness::{TestHarness, FRAME_MS};
use crate::host::SceneHost;
use crate::input::{KeyCode, MouseEvent};

fn default_frames() -> u32 {
    1
}

fn default_dt() -> f32 {
    FRAME_MS
}

/// Mouse buttons the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Left,
    Right,
}

/// A command the script runner can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Add an entity at a position
    Spawn {
        name: String,
        #[serde(default)]
        position: [f64; 3],
    },
    /// Switch editor mode
    SetState { mode: EditMode },
    /// Key press or release
    Key { key: KeyCode, pressed: bool },
    /// Move the cursor to absolute screen coordinates
    MouseMove { x: i32, y: i32 },
    /// Move the cursor to an entity's screen position
    MouseOver { id: String },
    MouseDown { button: Button },
    MouseUp { button: Button },
    Wheel { delta: f32 },
    /// Run one or more frames
    Animate {
        #[serde(default = "default_dt")]
        dt: f32,
        #[serde(default = "default_frames")]
        frames: u32,
    },
    /// Add entities to the selection by ID
    Select { ids: Vec<String> },
    /// Clear selection.
    ClearSelection,
    /// Delete the selection as one undoable command
    Delete,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    SetGrid { on: bool },
    ChangeGridDensity { dir: i32 },
    /// Inspect the editor: mode, selection, history, entities and camera.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: ScriptCommand) -> CommandResponse {
    match cmd {
        ScriptCommand::Spawn { name, position } => {
            let id = harness.spawn(&name, position);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        ScriptCommand::SetState { mode } => {
            harness.set_mode(mode);
            CommandResponse::ok()
        }

        ScriptCommand::Key { key, pressed } => {
            harness.key(key, pressed);
            CommandResponse::ok()
        }

        ScriptCommand::MouseMove { x, y } => {
            harness.move_mouse(x, y);
            CommandResponse::ok()
        }

        ScriptCommand::MouseOver { id } => match harness.screen_pos(&id) {
            Some((x, y)) => {
                harness.move_mouse(x, y);
                CommandResponse::ok_with_data(serde_json::json!({ "x": x, "y": y }))
            }
            None => CommandResponse::err(format!("Entity {id} is not on screen")),
        },

        ScriptCommand::MouseDown { button } => {
            harness.mouse(match button {
                Button::Left => MouseEvent::LeftDown,
                Button::Right => MouseEvent::RightDown,
            });
            CommandResponse::ok()
        }

        ScriptCommand::MouseUp { button } => {
            harness.mouse(match button {
                Button::Left => MouseEvent::LeftUp,
                Button::Right => MouseEvent::RightUp,
            });
            CommandResponse::ok()
        }

        ScriptCommand::Wheel { delta } => {
            harness.mouse(MouseEvent::Wheel { delta });
            CommandResponse::ok()
        }

        ScriptCommand::Animate { dt, frames } => {
            for _ in 0..frames {
                harness.frame_dt(dt);
            }
            CommandResponse::ok()
        }

        ScriptCommand::Select { ids } => {
            for id in &ids {
                harness.select(id);
            }
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        ScriptCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        ScriptCommand::Delete => {
            let deleted = harness.delete_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "deleted": deleted }))
        }

        ScriptCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        ScriptCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        ScriptCommand::SetGrid { on } => {
            harness.track.set_grid(on);
            CommandResponse::ok()
        }

        ScriptCommand::ChangeGridDensity { dir } => {
            harness.track.change_grid_density(dir);
            CommandResponse::ok_with_data(serde_json::json!({
                "spacing": harness.track.grid_spacing(),
            }))
        }

        ScriptCommand::Inspect => CommandResponse::ok_with_data(inspect(harness)),
    }
}

fn inspect(harness: &TestHarness) -> serde_json::Value {
    let track = &harness.track;
    let scene = harness.scene();
    let entities: Vec<serde_json::Value> = scene
        .entities()
        .iter()
        .map(|e| {
            serde_json::json!({
                "id": e.id,
                "name": e.name,
                "transform": e.transform,
                "selected": track.selection().is_selected(&e.id),
            })
        })
        .collect();
    let camera = scene.camera_position(CameraKind::Normal);

    serde_json::json!({
        "mode": track.state(),
        "selection": track.selection().all(),
        "history": track.history().labels(),
        "can_undo": track.history().can_undo(),
        "can_redo": track.history().can_redo(),
        "dragging": track.has_active_command(),
        "active_command": track.active_command().map(EditCommand::label),
        "grid": { "on": track.grid_on(), "spacing": track.grid_spacing() },
        "camera": [camera.x, camera.y, camera.z],
        "entity_count": entities.len(),
        "entities": entities,
    })
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ScriptCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ScriptCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: ScriptCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ScriptCommand::Undo));
    }

    #[test]
    fn test_command_serde_set_state() {
        let json = r#"{"command": "set_state", "mode": "rotate"}"#;
        let cmd: ScriptCommand = serde_json::from_str(json).unwrap();
        match cmd {
            ScriptCommand::SetState { mode } => assert_eq!(mode, EditMode::Rotate),
            _ => panic!("Expected SetState"),
        }
    }

    #[test]
    fn test_command_serde_animate_defaults() {
        let cmd: ScriptCommand = serde_json::from_str(r#"{"command": "animate"}"#).unwrap();
        match cmd {
            ScriptCommand::Animate { dt, frames } => {
                assert_eq!(dt, FRAME_MS);
                assert_eq!(frames, 1);
            }
            _ => panic!("Expected Animate"),
        }
    }

    #[test]
    fn test_command_serde_key() {
        let json = r#"{"command": "key", "key": "shift", "pressed": true}"#;
        let cmd: ScriptCommand = serde_json::from_str(json).unwrap();
        match cmd {
            ScriptCommand::Key { key, pressed } => {
                assert_eq!(key, KeyCode::Shift);
                assert!(pressed);
            }
            _ => panic!("Expected Key"),
        }
    }

    #[test]
    fn test_execute_spawn_and_inspect() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "spawn", "name": "Cat", "position": [1, 0, 2]}"#)
            .unwrap();
        assert!(resp.success);
        assert_eq!(h.entity_count(), 1);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["entity_count"], 1);
        assert_eq!(data["mode"], "select");
        assert_eq!(data["entities"][0]["name"], "Cat");
        assert_eq!(data["can_undo"], false);
        assert_eq!(data["active_command"], serde_json::Value::Null);
    }

    #[test]
    fn test_execute_mouse_over_unknown() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "mouse_over", "id": "nope"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("nope"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}

//! Per-frame keyboard and mouse snapshot.
//!
//! The host pushes raw events in through [`InputTracker::key_event`] and
//! [`InputTracker::mouse_event`]; the editor reads the snapshot once per frame
//! and clears the one-shot edges with [`InputTracker::end_frame`].

use serde::{Deserialize, Serialize};

/// Key codes delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Shift,
    LShift,
    Control,
    LControl,
    /// Any other host key code (ignored by the editor)
    Other(u32),
}

/// Keys whose level state the editor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Shift,
    Ctrl,
}

impl TrackedKey {
    /// Map a host key code to a tracked key. Unknown codes map to `None`.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::W => Some(TrackedKey::Forward),
            KeyCode::S => Some(TrackedKey::Back),
            KeyCode::A => Some(TrackedKey::StrafeLeft),
            KeyCode::D => Some(TrackedKey::StrafeRight),
            KeyCode::Shift | KeyCode::LShift => Some(TrackedKey::Shift),
            KeyCode::Control | KeyCode::LControl => Some(TrackedKey::Ctrl),
            KeyCode::Other(_) => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            TrackedKey::Forward => 1 << 0,
            TrackedKey::Back => 1 << 1,
            TrackedKey::StrafeLeft => 1 << 2,
            TrackedKey::StrafeRight => 1 << 3,
            TrackedKey::Shift => 1 << 4,
            TrackedKey::Ctrl => 1 << 5,
        }
    }
}

/// Held state of the tracked keys, one bit per key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState(u8);

impl KeyState {
    pub fn is_down(&self, key: TrackedKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn set(&mut self, key: TrackedKey, down: bool) {
        if down {
            self.0 |= key.bit();
        } else {
            self.0 &= !key.bit();
        }
    }
}

/// Mouse events delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MouseEvent {
    Wheel { delta: f32 },
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    Moved { x: i32, y: i32 },
}

/// Mouse snapshot: button levels, one-shot edges, cursor and wheel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseData {
    pub wheel: f32,
    pub left_btn_down: bool,
    pub right_btn_down: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub left_released: bool,
    pub right_released: bool,
    pub x: i32,
    pub y: i32,
    pub prev_x: i32,
    pub prev_y: i32,
}

impl MouseData {
    /// Horizontal cursor movement since the stored point
    pub fn dx(&self) -> i32 {
        self.x - self.prev_x
    }

    /// Vertical cursor movement since the stored point
    pub fn dy(&self) -> i32 {
        self.y - self.prev_y
    }

    /// Make the current cursor position the baseline for the next delta
    pub fn store_point(&mut self) {
        self.prev_x = self.x;
        self.prev_y = self.y;
    }

    pub fn any_pressed(&self) -> bool {
        self.left_pressed || self.right_pressed
    }

    pub fn any_released(&self) -> bool {
        self.left_released || self.right_released
    }

    fn clear_edges(&mut self) {
        self.left_pressed = false;
        self.right_pressed = false;
        self.left_released = false;
        self.right_released = false;
    }
}

/// Accumulates host events into a stable snapshot.
#[derive(Debug, Default)]
pub struct InputTracker {
    keys: KeyState,
    mouse: MouseData,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press/release. Untracked codes are ignored.
    pub fn key_event(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = TrackedKey::from_code(code) {
            self.keys.set(key, pressed);
        }
    }

    pub fn mouse_event(&mut self, event: MouseEvent) {
        let m = &mut self.mouse;
        match event {
            MouseEvent::Wheel { delta } => m.wheel += delta,
            MouseEvent::LeftDown => {
                m.left_btn_down = true;
                m.left_pressed = true;
                m.left_released = false;
            }
            MouseEvent::LeftUp => {
                m.left_btn_down = false;
                m.left_pressed = false;
                m.left_released = true;
            }
            MouseEvent::RightDown => {
                m.right_btn_down = true;
                m.right_pressed = true;
                m.right_released = false;
            }
            MouseEvent::RightUp => {
                m.right_btn_down = false;
                m.right_pressed = false;
                m.right_released = true;
            }
            MouseEvent::Moved { x, y } => {
                m.x = x;
                m.y = y;
            }
        }
    }

    pub fn is_down(&self, key: TrackedKey) -> bool {
        self.keys.is_down(key)
    }

    pub fn keys(&self) -> KeyState {
        self.keys
    }

    pub fn mouse(&self) -> &MouseData {
        &self.mouse
    }

    pub fn store_point(&mut self) {
        self.mouse.store_point();
    }

    /// Read and reset the accumulated wheel delta
    pub fn take_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.mouse.wheel)
    }

    /// Clear the press/release edges once the frame has consumed them
    pub fn end_frame(&mut self) {
        self.mouse.clear_edges();
    }
}

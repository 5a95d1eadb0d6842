//! Normal-camera navigation: WASD panning on the ground plane and wheel
//! height control.

use glam::Vec3;

use crate::input::{KeyState, TrackedKey};
use crate::state::settings::CameraSettings;

/// Offset to apply to both camera position and target for one frame.
///
/// Opposite keys of a pair cancel each other out.
pub fn pan_offset(keys: KeyState, dt: f32, settings: &CameraSettings) -> Vec3 {
    let mut offset = Vec3::ZERO;

    if keys.is_down(TrackedKey::Forward) ^ keys.is_down(TrackedKey::Back) {
        let sgn = if keys.is_down(TrackedKey::Back) { 1.0 } else { -1.0 };
        offset.z += sgn * dt / settings.pan_divisor;
    }

    if keys.is_down(TrackedKey::StrafeLeft) ^ keys.is_down(TrackedKey::StrafeRight) {
        let sgn = if keys.is_down(TrackedKey::StrafeLeft) { 1.0 } else { -1.0 };
        offset.x += sgn * dt / settings.pan_divisor;
    }

    offset
}

/// Camera height after applying a wheel delta, never below `min_height`
pub fn wheel_height(y: f32, dt: f32, wheel: f32, min_height: f32) -> f32 {
    let y = y + -dt * wheel;
    if y < min_height {
        min_height
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(down: &[TrackedKey]) -> KeyState {
        let mut k = KeyState::default();
        for key in down {
            k.set(*key, true);
        }
        k
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let s = CameraSettings::default();
        let k = keys(&[
            TrackedKey::Forward,
            TrackedKey::Back,
            TrackedKey::StrafeLeft,
            TrackedKey::StrafeRight,
        ]);
        assert_eq!(pan_offset(k, 1000.0, &s), Vec3::ZERO);
    }

    #[test]
    fn test_forward_moves_negative_z() {
        let s = CameraSettings::default();
        let off = pan_offset(keys(&[TrackedKey::Forward]), 50.0, &s);
        assert_eq!(off, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_back_moves_positive_z_proportional_to_dt() {
        let s = CameraSettings::default();
        let a = pan_offset(keys(&[TrackedKey::Back]), 25.0, &s);
        let b = pan_offset(keys(&[TrackedKey::Back]), 100.0, &s);
        assert_eq!(a.z, 1.0);
        assert_eq!(b.z, 4.0);
    }

    #[test]
    fn test_strafe() {
        let s = CameraSettings::default();
        assert_eq!(pan_offset(keys(&[TrackedKey::StrafeLeft]), 25.0, &s).x, 1.0);
        assert_eq!(pan_offset(keys(&[TrackedKey::StrafeRight]), 25.0, &s).x, -1.0);
    }

    #[test]
    fn test_wheel_height_clamps() {
        assert_eq!(wheel_height(50.0, 10.0, 2.0, 10.0), 30.0);
        assert_eq!(wheel_height(50.0, 10.0, 10.0, 10.0), 10.0);
        assert_eq!(wheel_height(50.0, 10.0, -1.0, 10.0), 60.0);
    }
}

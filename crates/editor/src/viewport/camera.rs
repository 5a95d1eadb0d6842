use glam::{Mat4, Vec3, Vec4};

/// Look-at perspective camera of the in-memory scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    /// Whether the host feeds navigation input to this camera directly
    pub input_enabled: bool,
}

/// A projected point in screen pixels plus its clip-space depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl SceneCamera {
    pub fn new(position: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            target,
            fov: fov_degrees.to_radians(),
            input_enabled: false,
        }
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 2000.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a world point into a `width` x `height` viewport, origin at
    /// the top-left corner. Points behind the camera yield `None`.
    pub fn project(&self, point: Vec3, width: f32, height: f32) -> Option<ScreenPoint> {
        let vp = self.view_projection(width / height);
        let p = vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(ScreenPoint {
            x: width * 0.5 + ndc.x * width * 0.5,
            y: height * 0.5 - ndc.y * height * 0.5,
            depth: p.w,
        })
    }
}

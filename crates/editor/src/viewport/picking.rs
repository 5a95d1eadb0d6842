use glam::{Vec2, Vec3};

use shared::{EntityId, Transform};

use super::camera::SceneCamera;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// World bounds of an entity. Rotation is ignored, so rotated entities
    /// pick by their unrotated box.
    pub fn from_transform(transform: &Transform, half_extents: [f64; 3]) -> Self {
        let center = Vec3::new(
            transform.position[0] as f32,
            transform.position[1] as f32,
            transform.position[2] as f32,
        );
        let half = Vec3::new(
            (half_extents[0] * transform.scale[0].abs()) as f32,
            (half_extents[1] * transform.scale[1].abs()) as f32,
            (half_extents[2] * transform.scale[2].abs()) as f32,
        );
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// Screen-space bounds of a projected box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
    /// Distance of the nearest corner from the camera
    pub depth: f32,
}

impl ScreenRect {
    /// Project every corner of `aabb`. Boxes that reach behind the camera
    /// are not pickable.
    pub fn project(aabb: &Aabb, camera: &SceneCamera, width: f32, height: f32) -> Option<Self> {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        let mut depth = f32::MAX;

        for corner in aabb.corners() {
            let p = camera.project(corner, width, height)?;
            min = min.min(Vec2::new(p.x, p.y));
            max = max.max(Vec2::new(p.x, p.y));
            depth = depth.min(p.depth);
        }

        Some(Self { min, max, depth })
    }

    /// Whether `point` lies inside the rect grown by `margin` pixels
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x >= self.min.x - margin
            && point.x <= self.max.x + margin
            && point.y >= self.min.y - margin
            && point.y <= self.max.y + margin
    }
}

/// Pick the nearest entity whose screen rect contains the point.
pub fn pick_nearest<'a>(
    point: Vec2,
    margin: f32,
    rects: impl IntoIterator<Item = (&'a EntityId, ScreenRect)>,
) -> Option<EntityId> {
    let mut best: Option<(&EntityId, f32)> = None;

    for (id, rect) in rects {
        if rect.contains(point, margin) && best.is_none_or(|(_, d)| rect.depth < d) {
            best = Some((id, rect.depth));
        }
    }

    best.map(|(id, _)| id.clone())
}

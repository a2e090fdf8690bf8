use crate::{constants::MIN_RAY_COUNT, types::Vec2};

/// Gap between adjacent parallel rays along each box axis.
///
/// - `horizontal` separates the rays that travel along X; they are stacked up the box height.
/// - `vertical` separates the rays that travel along Y; they are spread across the box width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaySpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl RaySpacing {
    /// Spacing for a probe area of `size`; counts below the minimum are raised first.
    pub fn calculate(size: Vec2, horizontal_ray_count: usize, vertical_ray_count: usize) -> Self {
        let h = clamp_ray_count(horizontal_ray_count);
        let v = clamp_ray_count(vertical_ray_count);
        Self {
            horizontal: size.y / (h - 1) as f32,
            vertical: size.x / (v - 1) as f32,
        }
    }
}

/// Raise a requested ray count to the minimum that can probe a whole edge.
#[inline]
pub fn clamp_ray_count(requested: usize) -> usize {
    requested.max(MIN_RAY_COUNT)
}

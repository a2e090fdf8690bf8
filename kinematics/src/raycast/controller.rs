use crate::{
    constants::SKIN_WIDTH,
    raycast::{RaycastOrigins, RaySpacing, spacing::clamp_ray_count},
    types::{Aabb2, Point2, Vec2},
};

/// Per-instance ray probing state for one box.
///
/// Both platforms and actors embed one of these. Typical per-tick use:
/// - `update_raycast_origins(bounds)` with the box's current bounds.
/// - Walk `vertical_fan` / `horizontal_fan` from one of the corners and cast along the axis.
///
/// `calculate_ray_spacing` only needs to run again when the box changes size.
#[derive(Clone, Debug)]
pub struct RaycastController {
    skin_width: f32,
    horizontal_ray_count: usize,
    vertical_ray_count: usize,
    spacing: RaySpacing,
    origins: RaycastOrigins,
}

impl RaycastController {
    /// Controller for a box of `bounds` with the default skin width.
    ///
    /// Ray counts below the minimum are raised silently.
    pub fn new(bounds: Aabb2, horizontal_ray_count: usize, vertical_ray_count: usize) -> Self {
        Self::with_skin_width(bounds, horizontal_ray_count, vertical_ray_count, SKIN_WIDTH)
    }

    pub fn with_skin_width(
        bounds: Aabb2,
        horizontal_ray_count: usize,
        vertical_ray_count: usize,
        skin_width: f32,
    ) -> Self {
        let mut controller = Self {
            skin_width: skin_width.max(0.0),
            horizontal_ray_count: clamp_ray_count(horizontal_ray_count),
            vertical_ray_count: clamp_ray_count(vertical_ray_count),
            spacing: RaySpacing::default(),
            origins: RaycastOrigins::default(),
        };
        controller.calculate_ray_spacing(bounds);
        controller.update_raycast_origins(bounds);
        controller
    }

    /// Refresh the four corner origins from the box's current bounds.
    #[inline]
    pub fn update_raycast_origins(&mut self, bounds: Aabb2) {
        self.origins = RaycastOrigins::from_bounds(bounds, self.skin_width);
    }

    /// Recompute ray spacing for the skin-shrunk extents of `bounds`.
    pub fn calculate_ray_spacing(&mut self, bounds: Aabb2) {
        let inner = bounds.shrink(self.skin_width);
        self.spacing = RaySpacing::calculate(
            inner.size(),
            self.horizontal_ray_count,
            self.vertical_ray_count,
        );
    }

    #[inline]
    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    #[inline]
    pub fn horizontal_ray_count(&self) -> usize {
        self.horizontal_ray_count
    }

    #[inline]
    pub fn vertical_ray_count(&self) -> usize {
        self.vertical_ray_count
    }

    #[inline]
    pub fn spacing(&self) -> RaySpacing {
        self.spacing
    }

    #[inline]
    pub fn origins(&self) -> &RaycastOrigins {
        &self.origins
    }

    /// Origins of the rays that travel along Y: `base`, then stepping right by the vertical
    /// spacing. `offset_x` shifts the whole fan (used to probe where the box is about to be).
    pub fn vertical_fan(&self, base: Point2, offset_x: f32) -> impl Iterator<Item = Point2> {
        let step = self.spacing.vertical;
        (0..self.vertical_ray_count).map(move |i| base + Vec2::new(step * i as f32 + offset_x, 0.0))
    }

    /// Origins of the rays that travel along X: `base`, then stepping up by the horizontal
    /// spacing.
    pub fn horizontal_fan(&self, base: Point2) -> impl Iterator<Item = Point2> {
        let step = self.spacing.horizontal;
        (0..self.horizontal_ray_count).map(move |i| base + Vec2::new(0.0, step * i as f32))
    }
}

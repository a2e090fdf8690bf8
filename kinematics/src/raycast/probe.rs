use crate::types::{Aabb2, Point2};

/// Ray start points at the four corners of a box, pulled inward by the skin width.
///
/// Recompute these every tick from the current bounds; a cached set goes stale as soon as the
/// box moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastOrigins {
    pub bottom_left: Point2,
    pub bottom_right: Point2,
    pub top_left: Point2,
    pub top_right: Point2,
}

impl Default for RaycastOrigins {
    fn default() -> Self {
        Self {
            bottom_left: Point2::origin(),
            bottom_right: Point2::origin(),
            top_left: Point2::origin(),
            top_right: Point2::origin(),
        }
    }
}

impl RaycastOrigins {
    /// Corners of `bounds` after moving each face inward by `skin_width`.
    pub fn from_bounds(bounds: Aabb2, skin_width: f32) -> Self {
        let inner = bounds.shrink(skin_width);
        Self {
            bottom_left: Point2::new(inner.mins.x, inner.mins.y),
            bottom_right: Point2::new(inner.maxs.x, inner.mins.y),
            top_left: Point2::new(inner.mins.x, inner.maxs.y),
            top_right: Point2::new(inner.maxs.x, inner.maxs.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::SKIN_WIDTH, types::Vec2};

    #[test]
    fn corners_sit_one_skin_inside_the_hull() {
        let bounds = Aabb2::from_center_size(Vec2::new(1.0, 2.0), Vec2::new(3.0, 0.5));
        let o = RaycastOrigins::from_bounds(bounds, SKIN_WIDTH);

        assert!((o.bottom_left.x - (bounds.mins.x + SKIN_WIDTH)).abs() < 1.0e-6);
        assert!((o.bottom_left.y - (bounds.mins.y + SKIN_WIDTH)).abs() < 1.0e-6);
        assert!((o.top_right.x - (bounds.maxs.x - SKIN_WIDTH)).abs() < 1.0e-6);
        assert!((o.top_right.y - (bounds.maxs.y - SKIN_WIDTH)).abs() < 1.0e-6);

        // Corners share edges pairwise.
        assert_eq!(o.bottom_left.y, o.bottom_right.y);
        assert_eq!(o.top_left.y, o.top_right.y);
        assert_eq!(o.bottom_left.x, o.top_left.x);
        assert_eq!(o.bottom_right.x, o.top_right.x);
    }

    #[test]
    fn origins_follow_the_box_when_it_moves() {
        let bounds = Aabb2::from_center_size(Vec2::zeros(), Vec2::new(1.0, 1.0));
        let before = RaycastOrigins::from_bounds(bounds, SKIN_WIDTH);
        let after = RaycastOrigins::from_bounds(bounds.translated(Vec2::new(0.0, 2.0)), SKIN_WIDTH);
        assert!((after.top_left.y - before.top_left.y - 2.0).abs() < 1.0e-6);
    }
}

use crate::{
    layers::LayerMask,
    types::{ActorId, Point2, Vec2},
};

/// Nearest hit along a probe ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the surface (never negative).
    ///
    /// `0.0` means the origin already overlaps the struck collider. Probing code ignores such
    /// hits, so backends must report them rather than skipping to the next collider.
    pub distance: f32,
    /// Whatever the ray struck.
    pub actor: ActorId,
}

/// Scene query used by every ray probe.
///
/// Implementations return the closest collider whose layers intersect `mask` along
/// `origin + dir * t` for `t` in `[0, max_distance]`. `dir` is unit length.
pub trait RayQuery {
    fn cast_ray(&self, origin: Point2, dir: Vec2, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;
}

impl<T: RayQuery + ?Sized> RayQuery for &T {
    #[inline]
    fn cast_ray(
        &self,
        origin: Point2,
        dir: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).cast_ray(origin, dir, max_distance, mask)
    }
}

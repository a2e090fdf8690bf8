//! Box actor that moves by probing with rays instead of simulating physics.
//!
//! Notes
//! - Displacement is clamped per axis: horizontal first, then vertical probing from where the
//!   box will be horizontally.
//! - Each ray shortens the reach of the ones after it, so the nearest obstacle wins.
//! - The actor's own layers must not be in its collision mask, otherwise its rays start inside
//!   its own collider and every probe is discarded as a zero-distance hit.

use crate::{
    layers::LayerMask,
    raycast::{RayQuery, RaycastController},
    types::{ActorId, Aabb2, Vec2, Vec3},
};

/// Which sides touched something during the last move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionInfo {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionInfo {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug)]
pub struct RaycastActor {
    id: ActorId,
    /// Box center.
    position: Vec2,
    size: Vec2,
    collision_mask: LayerMask,
    rays: RaycastController,
    collisions: CollisionInfo,
}

impl RaycastActor {
    pub fn new(
        id: ActorId,
        position: Vec2,
        size: Vec2,
        collision_mask: LayerMask,
        horizontal_ray_count: usize,
        vertical_ray_count: usize,
    ) -> Self {
        let bounds = Aabb2::from_center_size(position, size);
        Self {
            id,
            position,
            size,
            collision_mask,
            rays: RaycastController::new(bounds, horizontal_ray_count, vertical_ray_count),
            collisions: CollisionInfo::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_center_size(self.position, self.size)
    }

    #[inline]
    pub fn collisions(&self) -> CollisionInfo {
        self.collisions
    }

    /// Move by `displacement` (Z ignored), stopping at anything in the collision mask.
    ///
    /// `standing_on_platform` marks the actor grounded even if no ground was probed, which keeps
    /// riders grounded while a platform carries them. Returns the displacement actually applied.
    pub fn move_by<Q: RayQuery + ?Sized>(
        &mut self,
        query: &Q,
        displacement: Vec3,
        standing_on_platform: bool,
    ) -> Vec2 {
        self.rays.update_raycast_origins(self.bounds());
        self.collisions.reset();

        let mut d = displacement.xy();
        if d.x != 0.0 {
            self.horizontal_collisions(query, &mut d);
        }
        if d.y != 0.0 {
            self.vertical_collisions(query, &mut d);
        }

        self.position += d;

        if standing_on_platform {
            self.collisions.below = true;
        }
        d
    }

    fn horizontal_collisions<Q: RayQuery + ?Sized>(&mut self, query: &Q, d: &mut Vec2) {
        let skin = self.rays.skin_width();
        let dir_x = if d.x < 0.0 { -1.0 } else { 1.0 };
        let mut ray_length = d.x.abs() + skin;
        let origins = *self.rays.origins();
        let base = if dir_x < 0.0 {
            origins.bottom_left
        } else {
            origins.bottom_right
        };

        for origin in self.rays.horizontal_fan(base) {
            let Some(hit) =
                query.cast_ray(origin, Vec2::new(dir_x, 0.0), ray_length, self.collision_mask)
            else {
                continue;
            };
            if hit.distance <= 0.0 {
                continue;
            }

            d.x = (hit.distance - skin) * dir_x;
            ray_length = hit.distance;

            self.collisions.left = dir_x < 0.0;
            self.collisions.right = dir_x > 0.0;
        }
    }

    fn vertical_collisions<Q: RayQuery + ?Sized>(&mut self, query: &Q, d: &mut Vec2) {
        let skin = self.rays.skin_width();
        let dir_y = if d.y < 0.0 { -1.0 } else { 1.0 };
        let mut ray_length = d.y.abs() + skin;
        let origins = *self.rays.origins();
        let base = if dir_y < 0.0 {
            origins.bottom_left
        } else {
            origins.top_left
        };

        for origin in self.rays.vertical_fan(base, d.x) {
            let Some(hit) =
                query.cast_ray(origin, Vec2::new(0.0, dir_y), ray_length, self.collision_mask)
            else {
                continue;
            };
            if hit.distance <= 0.0 {
                continue;
            }

            d.y = (hit.distance - skin) * dir_y;
            ray_length = hit.distance;

            self.collisions.below = dir_y < 0.0;
            self.collisions.above = dir_y > 0.0;
        }
    }
}

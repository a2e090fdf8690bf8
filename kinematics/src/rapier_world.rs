//! Rapier-backed query world for 2D box probing.
//!
//! Boxes are stored as thin rapier cuboids centered on the `z = 0` plane, so rays cast in XY
//! behave exactly like 2D rays. Every collider carries a [`ColliderTag`] in `user_data`; ray
//! masks are applied by unpacking its layers in the query filter predicate.
//!
//! Unlike a purely static query scene, boxes here move every tick. Each mutation marks the
//! collider as modified and refreshes the broad phase immediately, so queries never see a stale
//! position.

// Re-export Rapier so the harness can use its types without depending on it directly.
pub use rapier3d;

use std::collections::HashMap;

use rapier3d::prelude::*;

use crate::{
    collider_tag::{
        ColliderTagError, pack_collider_tag, unpack_actor, unpack_layers, validate_collider_tag,
    },
    constants::SLAB_HALF_DEPTH,
    layers::LayerMask,
    raycast::{RayHit, RayQuery},
    types::{ActorId, Aabb2, Point2, Vec2},
};

/// In-memory rapier structures plus an actor to collider index.
///
/// This stores:
/// - `RigidBodySet`/`ColliderSet`. Boxes are parentless colliders; the body set stays empty.
/// - `NarrowPhase` and `BroadPhaseBvh` used to create a borrowed `QueryPipeline`.
pub struct RapierQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    params: IntegrationParameters,
    handles: HashMap<ActorId, ColliderHandle>,
}

impl Default for RapierQueryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl RapierQueryWorld {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::default(),
            params: IntegrationParameters::default(),
            handles: HashMap::new(),
        }
    }

    /// Insert a box for `actor` on `layers`.
    ///
    /// Replaces the actor's previous box if it had one. Fails if `layers` is empty, since such a
    /// collider could never be struck.
    pub fn insert_box(
        &mut self,
        actor: ActorId,
        bounds: Aabb2,
        layers: LayerMask,
    ) -> Result<ColliderHandle, ColliderTagError> {
        let tag = pack_collider_tag(actor, layers);
        validate_collider_tag(tag)?;

        let half = bounds.size() * 0.5;
        let center = bounds.center();

        if let Some(&handle) = self.handles.get(&actor)
            && let Some(co) = self.colliders.get_mut(handle)
        {
            co.set_shape(SharedShape::cuboid(half.x, half.y, SLAB_HALF_DEPTH));
            co.set_translation(vector![center.x, center.y, 0.0]);
            co.user_data = tag;
            self.refresh(&[handle]);
            return Ok(handle);
        }

        let collider = ColliderBuilder::cuboid(half.x, half.y, SLAB_HALF_DEPTH)
            .translation(vector![center.x, center.y, 0.0])
            .user_data(tag)
            .build();
        let handle = self.colliders.insert(collider);
        self.handles.insert(actor, handle);
        self.refresh(&[handle]);
        log::debug!("{actor}: inserted box {bounds:?} layers={:#x}", layers.bits);
        Ok(handle)
    }

    /// Move `actor`'s box so its center sits at `center`. Returns `false` for unknown actors.
    pub fn set_center(&mut self, actor: ActorId, center: Vec2) -> bool {
        let Some(&handle) = self.handles.get(&actor) else {
            return false;
        };
        let Some(co) = self.colliders.get_mut(handle) else {
            return false;
        };
        co.set_translation(vector![center.x, center.y, 0.0]);
        self.refresh(&[handle]);
        true
    }

    /// Shift `actor`'s box by `delta`. Returns `false` for unknown actors.
    pub fn translate(&mut self, actor: ActorId, delta: Vec2) -> bool {
        match self.center(actor) {
            Some(center) => self.set_center(actor, center + delta),
            None => false,
        }
    }

    /// Current center of `actor`'s box.
    pub fn center(&self, actor: ActorId) -> Option<Vec2> {
        let handle = self.handles.get(&actor)?;
        let t = self.colliders.get(*handle)?.translation();
        Some(Vec2::new(t.x, t.y))
    }

    #[inline]
    pub fn contains(&self, actor: ActorId) -> bool {
        self.handles.contains_key(&actor)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Create a borrowed `QueryPipeline` view for scene queries.
    ///
    /// The returned pipeline borrows `self`, so it should be used within the scope of the
    /// borrow.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    fn refresh(&mut self, modified: &[ColliderHandle]) {
        let mut events = Vec::new();
        self.broad_phase.update(
            &self.params,
            &self.colliders,
            &self.bodies,
            modified,
            &[],
            &mut events,
        );
    }
}

impl RayQuery for RapierQueryWorld {
    fn cast_ray(
        &self,
        origin: Point2,
        dir: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let predicate =
            |_: ColliderHandle, co: &Collider| unpack_layers(co.user_data).intersects(mask);
        let filter = QueryFilter::default().predicate(&predicate);
        let pipeline = self.query_pipeline(filter);

        let ray = Ray::new(point![origin.x, origin.y, 0.0], vector![dir.x, dir.y, 0.0]);
        // Solid: an origin inside a box reports a hit at distance zero.
        let (handle, toi) = pipeline.cast_ray(&ray, max_distance.max(0.0), true)?;
        let co = self.colliders.get(handle)?;

        Some(RayHit {
            distance: toi.max(0.0),
            actor: unpack_actor(co.user_data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::CollisionLayer;

    fn env() -> LayerMask {
        CollisionLayer::Environment.into_mask()
    }

    fn ground() -> Aabb2 {
        Aabb2::from_center_size(Vec2::new(0.0, -1.0), Vec2::new(10.0, 1.0))
    }

    #[test]
    fn ray_down_hits_ground_top() {
        let mut world = RapierQueryWorld::new();
        world
            .insert_box(ActorId(1), ground(), env())
            .expect("insert");

        let hit = world
            .cast_ray(Point2::new(0.0, 0.0), Vec2::new(0.0, -1.0), 5.0, env())
            .expect("hit");
        assert_eq!(hit.actor, ActorId(1));
        assert!((hit.distance - 0.5).abs() < 1.0e-4);
    }

    #[test]
    fn mask_excludes_other_layers() {
        let mut world = RapierQueryWorld::new();
        world
            .insert_box(ActorId(1), ground(), CollisionLayer::Passenger.into_mask())
            .expect("insert");
        assert!(
            world
                .cast_ray(Point2::new(0.0, 0.0), Vec2::new(0.0, -1.0), 5.0, env())
                .is_none()
        );
    }

    #[test]
    fn layerless_boxes_are_rejected() {
        let mut world = RapierQueryWorld::new();
        let err = world.insert_box(ActorId(1), ground(), LayerMask::empty());
        assert_eq!(err, Err(ColliderTagError::NoLayers));
        assert!(world.is_empty());
    }

    #[test]
    fn moved_boxes_are_seen_by_the_next_query() {
        let mut world = RapierQueryWorld::new();
        world
            .insert_box(ActorId(1), ground(), env())
            .expect("insert");
        assert!(world.translate(ActorId(1), Vec2::new(0.0, -2.0)));

        let hit = world
            .cast_ray(Point2::new(0.0, 0.0), Vec2::new(0.0, -1.0), 5.0, env())
            .expect("hit");
        assert!((hit.distance - 2.5).abs() < 1.0e-4);

        let center = world.center(ActorId(1)).expect("center");
        assert!((center.y + 3.0).abs() < 1.0e-6);
    }

    #[test]
    fn origin_inside_a_box_reports_zero() {
        let mut world = RapierQueryWorld::new();
        world
            .insert_box(ActorId(1), ground(), env())
            .expect("insert");
        let hit = world
            .cast_ray(Point2::new(0.0, -1.0), Vec2::new(0.0, -1.0), 5.0, env())
            .expect("hit");
        assert_eq!(hit.distance, 0.0);
    }
}

//! Passenger detection for a moving platform.
//!
//! Given the displacement a platform is about to make this tick, find every actor it must move
//! along with it and decide how:
//!
//! - **Vertical drive**: the platform's top (moving up) or bottom (moving down) edge runs into
//!   an actor. The actor is pushed out of the way before the platform moves.
//! - **Horizontal drive**: the platform's leading side edge runs into an actor. The actor is
//!   pushed sideways before the platform moves, with a tiny downward nudge so its own ground
//!   probe keeps seeing whatever it stands on.
//! - **Riding**: an actor rests on the top edge while the platform moves down or sideways. It
//!   receives the full platform displacement after the platform has moved.
//!
//! Each actor receives at most one record per tick. The passes run in the order above and the
//! first pass to strike an actor claims it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    constants::RIDING_PROBE_SKINS,
    layers::LayerMask,
    raycast::{RayQuery, RaycastController},
    types::{ActorId, Vec2, Vec3},
};

/// How far the horizontal-drive rays reach past the skin.
///
/// The classic controller sizes these rays with the platform's *vertical* speed, which means a
/// purely horizontal platform only detects actors already within one skin width of its side.
/// That behavior is kept as the default so existing levels play the same; resting actors are
/// still carried by the riding pass either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalReach {
    /// Ray length `|displacement.y| + skin`.
    #[default]
    VerticalComponent,
    /// Ray length `|displacement.x| + skin`.
    HorizontalComponent,
}

impl HorizontalReach {
    #[inline]
    fn ray_length(self, displacement: Vec3, skin_width: f32) -> f32 {
        match self {
            HorizontalReach::VerticalComponent => displacement.y.abs() + skin_width,
            HorizontalReach::HorizontalComponent => displacement.x.abs() + skin_width,
        }
    }
}

/// Which detection pass produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassengerKind {
    PushedVertically,
    PushedHorizontally,
    Riding,
}

/// One passenger's movement for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassengerMovement {
    /// The passenger. Platforms reference passengers; they never own them.
    pub actor: ActorId,
    /// Displacement to hand to the passenger's own movement routine.
    pub displacement: Vec3,
    /// Tell the passenger it is grounded on this platform.
    pub standing_on_platform: bool,
    /// Move before (`true`) or after (`false`) the platform translates.
    pub move_before_platform: bool,
    pub kind: PassengerKind,
}

/// Builds the per-tick passenger movement list.
///
/// Owns its buffers so repeated ticks do not reallocate. Both are cleared at the start of every
/// [`resolve`](Self::resolve); nothing carries over between ticks.
#[derive(Clone, Debug, Default)]
pub struct PassengerResolver {
    movements: Vec<PassengerMovement>,
    moved: HashSet<ActorId>,
}

impl PassengerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records produced by the last call to [`resolve`](Self::resolve).
    #[inline]
    pub fn movements(&self) -> &[PassengerMovement] {
        &self.movements
    }

    /// Detect passengers for a platform about to move by `displacement`.
    ///
    /// `rays` must already hold this tick's origins. Hits at distance zero (ray origin inside
    /// the struck collider) are ignored.
    pub fn resolve<Q: RayQuery + ?Sized>(
        &mut self,
        displacement: Vec3,
        rays: &RaycastController,
        passenger_mask: LayerMask,
        reach: HorizontalReach,
        query: &Q,
    ) -> &[PassengerMovement] {
        self.movements.clear();
        self.moved.clear();

        let d = displacement;
        let skin = rays.skin_width();
        let origins = *rays.origins();

        // A zero component points along +axis, matching how the passes below treat it.
        let dir_x = if d.x < 0.0 { -1.0 } else { 1.0 };
        let dir_y = if d.y < 0.0 { -1.0 } else { 1.0 };

        // Vertically moving platform
        if d.y != 0.0 {
            let ray_length = d.y.abs() + skin;
            let base = if dir_y < 0.0 {
                origins.bottom_left
            } else {
                origins.top_left
            };
            let dir = Vec2::new(0.0, dir_y);

            for origin in rays.vertical_fan(base, 0.0) {
                let Some(hit) = query.cast_ray(origin, dir, ray_length, passenger_mask) else {
                    continue;
                };
                if hit.distance <= 0.0 || !self.moved.insert(hit.actor) {
                    continue;
                }

                let push_x = if dir_y > 0.0 { d.x } else { 0.0 };
                let push_y = d.y - (hit.distance - skin) * dir_y;
                self.push(PassengerMovement {
                    actor: hit.actor,
                    displacement: Vec3::new(push_x, push_y, 0.0),
                    standing_on_platform: dir_y > 0.0,
                    move_before_platform: true,
                    kind: PassengerKind::PushedVertically,
                });
            }
        }

        // Horizontally moving platform
        if d.x != 0.0 {
            let ray_length = reach.ray_length(d, skin);
            let base = if dir_x < 0.0 {
                origins.bottom_left
            } else {
                origins.bottom_right
            };
            let dir = Vec2::new(dir_x, 0.0);

            for origin in rays.horizontal_fan(base) {
                let Some(hit) = query.cast_ray(origin, dir, ray_length, passenger_mask) else {
                    continue;
                };
                if hit.distance <= 0.0 || !self.moved.insert(hit.actor) {
                    continue;
                }

                let push_x = d.x - (hit.distance - skin) * dir_x;
                // Nudge down so the passenger still checks for whatever it stands on.
                let push_y = -skin;
                self.push(PassengerMovement {
                    actor: hit.actor,
                    displacement: Vec3::new(push_x, push_y, 0.0),
                    standing_on_platform: false,
                    move_before_platform: true,
                    kind: PassengerKind::PushedHorizontally,
                });
            }
        }

        // Passenger riding on top of a platform moving down or sideways
        if d.y < 0.0 || (d.y == 0.0 && d.x != 0.0) {
            let ray_length = skin * RIDING_PROBE_SKINS;
            let dir = Vec2::new(0.0, 1.0);

            for origin in rays.vertical_fan(origins.top_left, 0.0) {
                let Some(hit) = query.cast_ray(origin, dir, ray_length, passenger_mask) else {
                    continue;
                };
                if hit.distance <= 0.0 || !self.moved.insert(hit.actor) {
                    continue;
                }

                self.push(PassengerMovement {
                    actor: hit.actor,
                    displacement: d,
                    standing_on_platform: true,
                    move_before_platform: false,
                    kind: PassengerKind::Riding,
                });
            }
        }

        &self.movements
    }

    fn push(&mut self, movement: PassengerMovement) {
        log::trace!(
            "{} {:?}: displacement={:?} standing={} before={}",
            movement.actor,
            movement.kind,
            movement.displacement,
            movement.standing_on_platform,
            movement.move_before_platform
        );
        self.movements.push(movement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aabb_world::AabbWorld,
        constants::SKIN_WIDTH,
        layers::{CollisionLayer, default_passenger_mask},
        raycast::RayHit,
        types::{Aabb2, Point2},
    };

    /// Every ray strikes the same actor at the same distance.
    struct Everywhere {
        actor: ActorId,
        distance: f32,
    }

    impl RayQuery for Everywhere {
        fn cast_ray(&self, _: Point2, _: Vec2, max_distance: f32, _: LayerMask) -> Option<RayHit> {
            (self.distance <= max_distance).then_some(RayHit {
                distance: self.distance,
                actor: self.actor,
            })
        }
    }

    /// Platform box: 2 wide, 0.5 tall, centered on the origin.
    fn platform_rays() -> RaycastController {
        RaycastController::new(
            Aabb2::from_center_size(Vec2::zeros(), Vec2::new(2.0, 0.5)),
            4,
            4,
        )
    }

    fn world_with(actor: ActorId, bounds: Aabb2) -> AabbWorld {
        let mut world = AabbWorld::new();
        world.insert(actor, bounds, CollisionLayer::Passenger.into_mask());
        world
    }

    fn resolve(
        world: &impl RayQuery,
        d: Vec3,
        reach: HorizontalReach,
    ) -> Vec<PassengerMovement> {
        let rays = platform_rays();
        let mut resolver = PassengerResolver::new();
        resolver
            .resolve(d, &rays, default_passenger_mask(), reach, world)
            .to_vec()
    }

    #[test]
    fn zero_displacement_produces_no_records() {
        let q = Everywhere {
            actor: ActorId(1),
            distance: 0.01,
        };
        assert!(resolve(&q, Vec3::zeros(), HorizontalReach::default()).is_empty());
    }

    #[test]
    fn rising_platform_pushes_actor_above_before_moving() {
        // Actor sits 0.05 above the top-left ray origin (top edge 0.25 - skin).
        let top_origin_y = 0.25 - SKIN_WIDTH;
        let actor = ActorId(7);
        let world = world_with(
            actor,
            Aabb2::new(
                Point2::new(-1.2, top_origin_y + 0.05),
                Point2::new(-0.8, top_origin_y + 1.0),
            ),
        );

        // Speed 2 over a 0.05 s step.
        let d = Vec3::new(0.0, 0.1, 0.0);
        let records = resolve(&world, d, HorizontalReach::default());

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.actor, actor);
        assert_eq!(r.kind, PassengerKind::PushedVertically);
        assert!((r.displacement.y - (d.y - (0.05 - SKIN_WIDTH))).abs() < 1.0e-5);
        assert!(r.standing_on_platform);
        assert!(r.move_before_platform);
    }

    #[test]
    fn rising_platform_carries_horizontal_motion_into_the_push() {
        let q = Everywhere {
            actor: ActorId(3),
            distance: 0.05,
        };
        let records = resolve(&q, Vec3::new(0.2, 0.1, 0.0), HorizontalReach::default());
        assert_eq!(records.len(), 1);
        assert!((records[0].displacement.x - 0.2).abs() < 1.0e-6);
    }

    #[test]
    fn descending_platform_pushes_actor_below_without_grounding_it() {
        let q = Everywhere {
            actor: ActorId(3),
            distance: 0.05,
        };
        let d = Vec3::new(0.3, -0.1, 0.0);
        let records = resolve(&q, d, HorizontalReach::default());

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.kind, PassengerKind::PushedVertically);
        assert_eq!(r.displacement.x, 0.0);
        assert!((r.displacement.y - (-0.1 + (0.05 - SKIN_WIDTH))).abs() < 1.0e-6);
        assert!(!r.standing_on_platform);
        assert!(r.move_before_platform);
    }

    #[test]
    fn one_record_per_actor_with_vertical_priority() {
        // Down-right: vertical, horizontal and riding passes all see the same actor.
        let q = Everywhere {
            actor: ActorId(9),
            distance: 0.02,
        };
        let records = resolve(
            &q,
            Vec3::new(0.1, -0.1, 0.0),
            HorizontalReach::HorizontalComponent,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, PassengerKind::PushedVertically);
    }

    #[test]
    fn horizontal_push_beats_riding_for_the_same_actor() {
        let q = Everywhere {
            actor: ActorId(9),
            distance: 0.02,
        };
        let records = resolve(
            &q,
            Vec3::new(0.1, 0.0, 0.0),
            HorizontalReach::HorizontalComponent,
        );
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.kind, PassengerKind::PushedHorizontally);
        assert!((r.displacement.x - (0.1 - (0.02 - SKIN_WIDTH))).abs() < 1.0e-6);
        assert_eq!(r.displacement.y, -SKIN_WIDTH);
        assert!(!r.standing_on_platform);
        assert!(r.move_before_platform);
    }

    #[test]
    fn side_push_reaches_by_horizontal_speed_when_opted_in() {
        let actor = ActorId(4);
        // Left face 0.065 beyond the bottom-right origin (x = 1 - skin).
        let world = world_with(
            actor,
            Aabb2::new(Point2::new(1.05, -0.5), Point2::new(1.5, 0.5)),
        );
        let d = Vec3::new(0.1, 0.0, 0.0);

        let opted_in = resolve(&world, d, HorizontalReach::HorizontalComponent);
        assert_eq!(opted_in.len(), 1);
        let expected_gap = 1.05 - (1.0 - SKIN_WIDTH);
        assert!((opted_in[0].displacement.x - (0.1 - (expected_gap - SKIN_WIDTH))).abs() < 1.0e-5);

        // The default reach only looks one skin past the side when not moving vertically.
        assert!(resolve(&world, d, HorizontalReach::VerticalComponent).is_empty());
    }

    #[test]
    fn leftward_platform_pushes_from_its_left_side() {
        let actor = ActorId(8);
        // Right face 0.065 short of the bottom-left origin (x = -1 + skin).
        let world = world_with(
            actor,
            Aabb2::new(Point2::new(-1.5, -0.5), Point2::new(-1.05, 0.5)),
        );
        let d = Vec3::new(-0.1, 0.0, 0.0);

        let records = resolve(&world, d, HorizontalReach::HorizontalComponent);

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.actor, actor);
        assert_eq!(r.kind, PassengerKind::PushedHorizontally);
        let gap = (-1.0 + SKIN_WIDTH) - (-1.05);
        assert!((r.displacement.x - (d.x + (gap - SKIN_WIDTH))).abs() < 1.0e-5);
        assert!((r.displacement.y + SKIN_WIDTH).abs() < 1.0e-6);
        assert!(!r.standing_on_platform);
        assert!(r.move_before_platform);
    }

    #[test]
    fn descending_platform_pushes_from_its_bottom_edge() {
        let actor = ActorId(9);
        // Top face 0.065 below the bottom-left origin (y = -0.25 + skin).
        let bottom_origin_y = -0.25 + SKIN_WIDTH;
        let world = world_with(
            actor,
            Aabb2::new(
                Point2::new(-0.5, bottom_origin_y - 1.0),
                Point2::new(0.5, bottom_origin_y - 0.065),
            ),
        );
        let d = Vec3::new(0.0, -0.1, 0.0);

        let records = resolve(&world, d, HorizontalReach::default());

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.actor, actor);
        assert_eq!(r.kind, PassengerKind::PushedVertically);
        assert!((r.displacement.y - (d.y + (0.065 - SKIN_WIDTH))).abs() < 1.0e-5);
        assert_eq!(r.displacement.x, 0.0);
        assert!(!r.standing_on_platform);
        assert!(r.move_before_platform);
    }

    #[test]
    fn resting_actor_rides_a_descending_platform_after_it_moves() {
        let actor = ActorId(5);
        let world = world_with(
            actor,
            Aabb2::new(Point2::new(-0.5, 0.25), Point2::new(0.5, 1.25)),
        );
        let d = Vec3::new(0.0, -0.1, 0.0);

        let records = resolve(&world, d, HorizontalReach::default());
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.kind, PassengerKind::Riding);
        assert_eq!(r.displacement, d);
        assert!(r.standing_on_platform);
        assert!(!r.move_before_platform);
    }

    #[test]
    fn rising_platform_does_not_run_the_riding_pass() {
        // Resting actor, platform moving up: picked up by the vertical pass instead.
        let actor = ActorId(5);
        let world = world_with(
            actor,
            Aabb2::new(Point2::new(-0.5, 0.25), Point2::new(0.5, 1.25)),
        );
        let records = resolve(&world, Vec3::new(0.0, 0.1, 0.0), HorizontalReach::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, PassengerKind::PushedVertically);
    }

    #[test]
    fn zero_distance_hits_are_ignored() {
        let actor = ActorId(6);
        // Overlaps the top-left origin.
        let world = world_with(
            actor,
            Aabb2::new(Point2::new(-1.2, 0.2), Point2::new(-0.8, 0.6)),
        );
        assert!(resolve(&world, Vec3::new(0.0, 0.1, 0.0), HorizontalReach::default()).is_empty());
    }

    #[test]
    fn actors_outside_the_passenger_mask_are_ignored() {
        let mut world = AabbWorld::new();
        world.insert(
            ActorId(1),
            Aabb2::new(Point2::new(-0.5, 0.25), Point2::new(0.5, 1.25)),
            CollisionLayer::Environment.into_mask(),
        );
        assert!(resolve(&world, Vec3::new(0.0, -0.1, 0.0), HorizontalReach::default()).is_empty());
    }

    #[test]
    fn every_distinct_actor_gets_its_own_record() {
        let mut world = AabbWorld::new();
        let passenger = CollisionLayer::Passenger.into_mask();
        // Two actors resting on the left and right halves of the top edge.
        world.insert(
            ActorId(1),
            Aabb2::new(Point2::new(-1.0, 0.25), Point2::new(-0.6, 1.0)),
            passenger,
        );
        world.insert(
            ActorId(2),
            Aabb2::new(Point2::new(0.6, 0.25), Point2::new(1.0, 1.0)),
            passenger,
        );

        let records = resolve(&world, Vec3::new(-0.1, 0.0, 0.0), HorizontalReach::default());
        let mut actors: Vec<ActorId> = records.iter().map(|r| r.actor).collect();
        actors.sort();
        assert_eq!(actors, vec![ActorId(1), ActorId(2)]);
        assert!(records.iter().all(|r| r.kind == PassengerKind::Riding));
    }
}

//! Brute-force box world.
//!
//! A flat list of axis-aligned boxes answering [`RayQuery`] by testing every box. Useful for
//! unit tests and tiny scenes where building a rapier world is not worth it.

use std::collections::BTreeMap;

use crate::{
    layers::LayerMask,
    raycast::{RayHit, RayQuery},
    types::{ActorId, Aabb2, Point2, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AabbBody {
    pub bounds: Aabb2,
    pub layers: LayerMask,
}

/// Boxes keyed by actor; at most one box per actor.
///
/// Iteration (and therefore tie-breaking between equidistant hits) follows actor id order.
#[derive(Clone, Debug, Default)]
pub struct AabbWorld {
    bodies: BTreeMap<ActorId, AabbBody>,
}

impl AabbWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the box for `actor`.
    pub fn insert(&mut self, actor: ActorId, bounds: Aabb2, layers: LayerMask) {
        self.bodies.insert(actor, AabbBody { bounds, layers });
    }

    pub fn remove(&mut self, actor: ActorId) -> Option<AabbBody> {
        self.bodies.remove(&actor)
    }

    /// Returns `false` if `actor` has no box.
    pub fn set_bounds(&mut self, actor: ActorId, bounds: Aabb2) -> bool {
        match self.bodies.get_mut(&actor) {
            Some(body) => {
                body.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if `actor` has no box.
    pub fn translate(&mut self, actor: ActorId, delta: Vec2) -> bool {
        match self.bodies.get_mut(&actor) {
            Some(body) => {
                body.bounds = body.bounds.translated(delta);
                true
            }
            None => false,
        }
    }

    pub fn bounds(&self, actor: ActorId) -> Option<Aabb2> {
        self.bodies.get(&actor).map(|b| b.bounds)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &AabbBody)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }
}

impl RayQuery for AabbWorld {
    fn cast_ray(
        &self,
        origin: Point2,
        dir: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for (actor, body) in self.iter() {
            if !body.layers.intersects(mask) {
                continue;
            }
            let Some(distance) = body.bounds.ray_distance(origin, dir, max_distance) else {
                continue;
            };
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(RayHit { distance, actor });
            }
        }
        best
    }
}

/*!
Core math aliases and plain data types shared by the probing, motion and passenger modules.

This module intentionally contains no algorithms beyond box arithmetic. Conventions:
- The simulation plane is XY with +Y up. Waypoints and displacements carry a Z component so
  platforms can be authored in 3D scenes, but ray probing only looks at X and Y.
- Units are world units, time in seconds.
*/

use std::fmt;

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Point2 = na::Point2<f32>;

/// Identity of anything a ray can strike (actors, platforms, static geometry).
///
/// Platforms only ever hold these as references; they never own a passenger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Clock sample handed to every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimTime {
    /// Seconds since the simulation started.
    pub now: f32,
    /// Seconds elapsed since the previous tick.
    pub delta: f32,
}

impl SimTime {
    #[inline]
    pub fn new(now: f32, delta: f32) -> Self {
        Self { now, delta }
    }

    /// The clock sample one fixed step later.
    #[inline]
    pub fn advanced(self, delta: f32) -> Self {
        Self {
            now: self.now + delta,
            delta,
        }
    }
}

/// Axis-aligned box in the XY plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub mins: Point2,
    pub maxs: Point2,
}

impl Aabb2 {
    #[inline]
    pub fn new(mins: Point2, maxs: Point2) -> Self {
        Self { mins, maxs }
    }

    /// Box centered on `center` with full extents `size`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            mins: Point2::from(center - half),
            maxs: Point2::from(center + half),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.maxs - self.mins
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.mins.coords + self.maxs.coords) * 0.5
    }

    /// Move every face inward by `margin`.
    ///
    /// An axis thinner than `2 * margin` collapses onto its center line instead of inverting.
    pub fn shrink(&self, margin: f32) -> Self {
        let center = self.center();
        let half = (self.size() * 0.5).map(|h| (h - margin).max(0.0));
        Self {
            mins: Point2::from(center - half),
            maxs: Point2::from(center + half),
        }
    }

    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            mins: self.mins + delta,
            maxs: self.maxs + delta,
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Point2) -> bool {
        p.x >= self.mins.x && p.x <= self.maxs.x && p.y >= self.mins.y && p.y <= self.maxs.y
    }

    /// Test two boxes for overlap (touching counts).
    #[inline]
    pub fn intersects(&self, other: &Aabb2) -> bool {
        !(self.maxs.x < other.mins.x
            || self.mins.x > other.maxs.x
            || self.maxs.y < other.mins.y
            || self.mins.y > other.maxs.y)
    }

    /// Distance along `dir` (unit length) from `origin` to the first point of this box,
    /// if it lies within `max_distance`.
    ///
    /// An origin already inside the box reports a distance of `0.0`.
    pub fn ray_distance(&self, origin: Point2, dir: Vec2, max_distance: f32) -> Option<f32> {
        if self.contains_point(origin) {
            return Some(0.0);
        }

        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..2 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.mins[axis], self.maxs[axis]);

            if d.abs() <= f32::EPSILON {
                // Parallel to this slab: must already be within it.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

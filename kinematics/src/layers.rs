//! Collision layers used by ray masks.
//!
//! Every collider lives on one or more layers; every ray carries a mask and only strikes
//! colliders whose layers intersect it. Platforms use two masks: one for the environment they
//! collide with, and one selecting the actors they may carry or push.

use crate::bitmask_flags::BitmaskFlags;

crate::define_bitmask_flags!(CollisionLayer, u32, {
    /// Static level geometry.
    Environment,
    /// Moving platforms.
    Platform,
    /// Actors that platforms may carry or push.
    Passenger,
    /// Overlap-only volumes; never blocks movement.
    Trigger,
});

/// Set of collision layers.
pub type LayerMask = BitmaskFlags<u32>;

impl CollisionLayer {
    /// Mask containing only this layer.
    #[inline]
    pub fn into_mask(self) -> LayerMask {
        LayerMask::from_flags(&[self])
    }
}

/// Mask matching every layer.
#[inline]
pub fn all_layers() -> LayerMask {
    LayerMask::new(u32::MAX)
}

/// Default mask for things an actor cannot walk through.
#[inline]
pub fn default_collision_mask() -> LayerMask {
    LayerMask::from_flags(&[CollisionLayer::Environment, CollisionLayer::Platform])
}

/// Default mask for actors a platform may transport.
#[inline]
pub fn default_passenger_mask() -> LayerMask {
    CollisionLayer::Passenger.into_mask()
}

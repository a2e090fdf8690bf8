//! Authoring configuration for a moving platform.
//!
//! Deserialized from JSON (or any serde format) and validated once when a platform is built.
//! Missing fields fall back to [`PlatformConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_RAY_COUNT, MAX_RECOMMENDED_EASING},
    layers::{LayerMask, default_collision_mask, default_passenger_mask},
    passenger::HorizontalReach,
    types::Vec3,
    waypoint::MotionSettings,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlatformConfigError {
    #[error("a platform path needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint {index} is not finite: {point:?}")]
    NonFiniteWaypoint { index: usize, point: Vec3 },
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidScalar { field: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Path points relative to the platform's starting position.
    pub local_waypoints: Vec<Vec3>,
    /// Wrap from the last waypoint back to the first instead of reversing.
    pub cyclic: bool,
    /// Units per second along each segment.
    pub speed: f32,
    /// Seconds to dwell at each waypoint.
    pub wait_time: f32,
    /// Shapes the ease-in/ease-out curve; `0` is linear, `[0, 2]` is the useful range.
    pub easing_factor: f32,
    pub horizontal_ray_count: usize,
    pub vertical_ray_count: usize,
    /// What the platform treats as solid. Platforms follow their path regardless; this is
    /// kept alongside the passenger mask so the two can be checked against each other.
    pub collision_mask: LayerMask,
    /// Which actors the platform may push or carry.
    pub passenger_mask: LayerMask,
    pub horizontal_reach: HorizontalReach,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            local_waypoints: Vec::new(),
            cyclic: false,
            speed: 1.0,
            wait_time: 0.0,
            easing_factor: 0.0,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            collision_mask: default_collision_mask(),
            passenger_mask: default_passenger_mask(),
            horizontal_reach: HorizontalReach::default(),
        }
    }
}

impl PlatformConfig {
    /// Check the configuration before building a platform from it.
    ///
    /// Hard errors reject the config. Softer problems (an easing factor past the recommended
    /// range, passenger and collision masks sharing layers, ray counts below the minimum) are
    /// logged and accepted.
    pub fn validate(&self) -> Result<(), PlatformConfigError> {
        if self.local_waypoints.len() < 2 {
            return Err(PlatformConfigError::TooFewWaypoints(
                self.local_waypoints.len(),
            ));
        }
        for (index, point) in self.local_waypoints.iter().enumerate() {
            if !point.iter().all(|c| c.is_finite()) {
                return Err(PlatformConfigError::NonFiniteWaypoint {
                    index,
                    point: *point,
                });
            }
        }
        for (field, value) in [
            ("speed", self.speed),
            ("wait_time", self.wait_time),
            ("easing_factor", self.easing_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlatformConfigError::InvalidScalar { field, value });
            }
        }

        if self.easing_factor > MAX_RECOMMENDED_EASING {
            log::warn!(
                "easing_factor {} is above the recommended maximum of {MAX_RECOMMENDED_EASING}",
                self.easing_factor
            );
        }
        if self.passenger_mask.intersects(self.collision_mask) {
            log::warn!(
                "passenger mask {:#x} overlaps collision mask {:#x}; solid geometry may be carried",
                self.passenger_mask.bits,
                self.collision_mask.bits
            );
        }
        if self.horizontal_ray_count < 2 || self.vertical_ray_count < 2 {
            log::debug!(
                "ray counts {}x{} will be raised to the minimum of 2",
                self.horizontal_ray_count,
                self.vertical_ray_count
            );
        }
        Ok(())
    }

    pub fn motion_settings(&self) -> MotionSettings {
        MotionSettings {
            speed: self.speed,
            wait_time: self.wait_time,
            easing_factor: self.easing_factor,
            cyclic: self.cyclic,
        }
    }
}

//! Waypoint path following for moving platforms.
//!
//! # Model
//! - A [`WaypointPath`] is authored as points relative to the platform origin and resolved once
//!   into world space. It never changes afterwards, so debug drawing and other readers always
//!   see the authored order.
//! - [`WaypointMotion`] walks the path one segment at a time. Progress across a segment is a
//!   linear `percent` in `[0, 1]` that is shaped by [`ease`] before interpolating.
//! - After each arrival the platform dwells for `wait_time` seconds.
//! - Cyclic paths wrap from the last point back to the first. Non-cyclic paths ping-pong: the
//!   travel direction flips at either end instead of reordering the points.
//!
//! The motion produces a displacement relative to the platform's current position, never an
//! absolute position, so passenger pushes compose additively with it.

use crate::{
    constants::DIST_EPS,
    types::{SimTime, Vec3},
};

/// Authored waypoints plus their world-space resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointPath {
    local: Vec<Vec3>,
    global: Vec<Vec3>,
}

impl WaypointPath {
    /// Resolve `local` points against the platform's starting position.
    ///
    /// Callers validate the point count (see `PlatformConfig::validate`); this only builds.
    pub fn new(local: Vec<Vec3>, origin: Vec3) -> Self {
        let global = local.iter().map(|p| p + origin).collect();
        Self { local, global }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.global.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    #[inline]
    pub fn local(&self) -> &[Vec3] {
        &self.local
    }

    #[inline]
    pub fn global(&self) -> &[Vec3] {
        &self.global
    }
}

/// Which way a non-cyclic path is currently being walked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TravelDirection {
    #[default]
    Forward,
    Backward,
}

/// Speed/timing knobs for [`WaypointMotion::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
    /// Travel speed along a segment (units per second).
    pub speed: f32,
    /// Dwell time after reaching each waypoint (seconds).
    pub wait_time: f32,
    /// Shapes the S-curve of [`ease`]; `0` is linear.
    pub easing_factor: f32,
    pub cyclic: bool,
}

/// Symmetric S-curve remapping of linear progress.
///
/// `ease(x) = x^a / (x^a + (1 - x)^a)` with `a = easing_factor + 1`.
/// Fixed points: `ease(0) = 0`, `ease(0.5) = 0.5`, `ease(1) = 1`. Monotonic for any
/// non-negative factor; larger factors accelerate and decelerate harder near the ends.
#[inline]
pub fn ease(x: f32, easing_factor: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    let a = easing_factor.max(0.0) + 1.0;
    let x_pow_a = x.powf(a);
    // x^a + (1-x)^a > 0 on [0, 1] for a >= 1.
    x_pow_a / (x_pow_a + (1.0 - x).powf(a))
}

/// Segment progress and dwell timer of one platform.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaypointMotion {
    from_index: usize,
    percent: f32,
    next_move_time: f32,
    direction: TravelDirection,
}

impl WaypointMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the waypoint the current segment starts from.
    #[inline]
    pub fn from_index(&self) -> usize {
        self.from_index
    }

    /// Linear (un-eased) progress across the current segment.
    #[inline]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    #[inline]
    pub fn next_move_time(&self) -> f32 {
        self.next_move_time
    }

    #[inline]
    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// True while dwelling at a waypoint.
    #[inline]
    pub fn is_paused(&self, now: f32) -> bool {
        now < self.next_move_time
    }

    /// `(from, to)` indices of the segment being travelled, normalizing the state first.
    fn segment(&mut self, len: usize, cyclic: bool) -> (usize, usize) {
        self.from_index %= len;

        if cyclic {
            return (self.from_index, (self.from_index + 1) % len);
        }

        // A non-cyclic walker turns around at either end of the path.
        match self.direction {
            TravelDirection::Forward if self.from_index + 1 >= len => {
                self.direction = TravelDirection::Backward;
            }
            TravelDirection::Backward if self.from_index == 0 => {
                self.direction = TravelDirection::Forward;
            }
            _ => {}
        }

        let to = match self.direction {
            TravelDirection::Forward => self.from_index + 1,
            TravelDirection::Backward => self.from_index - 1,
        };
        (self.from_index, to)
    }

    /// Advance along `path` for one tick and return the platform's displacement.
    ///
    /// Behavior
    /// - While dwelling, returns zero and leaves all state untouched.
    /// - A zero-length segment completes immediately instead of dividing by zero.
    /// - On arrival, progress resets, the segment index steps (wrapping or turning around) and
    ///   the dwell timer starts.
    pub fn advance(
        &mut self,
        path: &WaypointPath,
        settings: &MotionSettings,
        current_position: Vec3,
        time: SimTime,
    ) -> Vec3 {
        if path.len() < 2 || self.is_paused(time.now) {
            return Vec3::zeros();
        }

        let (from_index, to_index) = self.segment(path.len(), settings.cyclic);
        let from = path.global()[from_index];
        let to = path.global()[to_index];

        let segment_length = (to - from).norm();
        if segment_length <= DIST_EPS {
            self.percent = 1.0;
        } else {
            self.percent += (settings.speed / segment_length) * time.delta.max(0.0);
        }
        self.percent = self.percent.clamp(0.0, 1.0);

        let eased = ease(self.percent, settings.easing_factor);
        let new_position = from.lerp(&to, eased);

        if self.percent >= 1.0 {
            self.percent = 0.0;
            self.step_to_next_segment(path.len(), settings.cyclic);
            self.next_move_time = time.now + settings.wait_time;
            log::debug!(
                "reached waypoint {} at t={:.3}; next segment starts at {}",
                to_index,
                time.now,
                self.from_index
            );
        }

        new_position - current_position
    }

    fn step_to_next_segment(&mut self, len: usize, cyclic: bool) {
        if cyclic {
            self.from_index = (self.from_index + 1) % len;
            return;
        }

        match self.direction {
            TravelDirection::Forward => {
                self.from_index += 1;
                if self.from_index >= len - 1 {
                    self.direction = TravelDirection::Backward;
                }
            }
            TravelDirection::Backward => {
                self.from_index = self.from_index.saturating_sub(1);
                if self.from_index == 0 {
                    self.direction = TravelDirection::Forward;
                }
            }
        }
    }
}

//! Debug drawing of platform paths.
//!
//! Purely observational: drawing never touches simulation state.

use crate::{
    config::PlatformConfig,
    constants::WAYPOINT_MARKER_RADIUS,
    platform::MovingPlatform,
    types::Vec3,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GizmoColor {
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Anything that can draw debug shapes.
pub trait GizmoSink {
    fn sphere(&mut self, center: Vec3, radius: f32, color: GizmoColor);
}

/// One recorded sphere, for sinks that just collect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoSphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: GizmoColor,
}

impl GizmoSink for Vec<GizmoSphere> {
    fn sphere(&mut self, center: Vec3, radius: f32, color: GizmoColor) {
        self.push(GizmoSphere {
            center,
            radius,
            color,
        });
    }
}

/// One red marker per point.
pub fn draw_waypoints<S: GizmoSink + ?Sized>(points: impl IntoIterator<Item = Vec3>, sink: &mut S) {
    for p in points {
        sink.sphere(p, WAYPOINT_MARKER_RADIUS, GizmoColor::RED);
    }
}

/// Markers for a config that has not been built into a platform yet, placed relative to where
/// the platform would start.
pub fn draw_authoring_waypoints<S: GizmoSink + ?Sized>(
    config: &PlatformConfig,
    origin: Vec3,
    sink: &mut S,
) {
    draw_waypoints(config.local_waypoints.iter().map(|p| p + origin), sink);
}

impl MovingPlatform {
    /// Markers at the world-space waypoints resolved at construction.
    ///
    /// These stay fixed while the platform moves.
    pub fn draw_gizmos<S: GizmoSink + ?Sized>(&self, sink: &mut S) {
        draw_waypoints(self.path().global().iter().copied(), sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActorId, Vec2};

    fn config() -> PlatformConfig {
        PlatformConfig {
            local_waypoints: vec![Vec3::zeros(), Vec3::new(3.0, 0.0, 0.0)],
            ..PlatformConfig::default()
        }
    }

    #[test]
    fn authoring_markers_follow_the_origin() {
        let mut sink: Vec<GizmoSphere> = Vec::new();
        draw_authoring_waypoints(&config(), Vec3::new(1.0, 2.0, 0.0), &mut sink);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].center, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(sink[1].radius, 0.1);
        assert_eq!(sink[1].color, GizmoColor::RED);
    }

    #[test]
    fn running_markers_stay_at_resolved_waypoints() {
        let platform = MovingPlatform::new(
            ActorId(1),
            config(),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec2::new(1.0, 1.0),
        )
        .expect("valid");
        let mut sink: Vec<GizmoSphere> = Vec::new();
        platform.draw_gizmos(&mut sink);
        let centers: Vec<Vec3> = sink.iter().map(|s| s.center).collect();
        assert_eq!(centers, vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]);
    }
}

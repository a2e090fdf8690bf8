/// Inward margin subtracted from every box before ray origins are placed (world units).
///
/// Keeping origins just inside the hull means a ray never starts exactly on the surface it
/// is supposed to detect. All passenger push/clamp math subtracts this back out.
pub const SKIN_WIDTH: f32 = 0.015;

/// Minimum number of parallel rays along either box axis.
///
/// A single ray cannot probe both ends of an edge, so requested counts below this are raised.
pub const MIN_RAY_COUNT: usize = 2;

/// Ray count used when a config does not specify one.
pub const DEFAULT_RAY_COUNT: usize = 4;

/// Riding detection reaches this many skin widths above the platform's top edge.
pub const RIDING_PROBE_SKINS: f32 = 2.0;

/// Easing factors above this still work but produce very abrupt starts and stops.
pub const MAX_RECOMMENDED_EASING: f32 = 2.0;

/// Radius of the sphere drawn for each waypoint marker.
pub const WAYPOINT_MARKER_RADIUS: f32 = 0.1;

/// Practical small distance for comparisons (world units).
pub const DIST_EPS: f32 = 1.0e-6;

/// Half depth of the z-slab that 2D boxes occupy inside the 3D rapier backend.
pub const SLAB_HALF_DEPTH: f32 = 0.5;

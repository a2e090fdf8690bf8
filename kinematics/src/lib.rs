pub mod aabb_world;
pub mod actor;
pub mod bitmask_flags;
pub mod collider_tag;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod gizmos;
pub mod layers;
pub mod passenger;
pub mod platform;
pub mod rapier_world;
pub mod raycast;
pub mod types;
pub mod waypoint;

pub use aabb_world::{AabbBody, AabbWorld};
pub use actor::{CollisionInfo, RaycastActor};
pub use bitmask_flags::{BitmaskFlags, FlagBitmask};
pub use collider_tag::{
    ColliderTag, ColliderTagError, pack_collider_tag, unpack_actor, unpack_layers,
    validate_collider_tag,
};
pub use config::{PlatformConfig, PlatformConfigError};
pub use constants::{
    DEFAULT_RAY_COUNT, MAX_RECOMMENDED_EASING, MIN_RAY_COUNT, SKIN_WIDTH, WAYPOINT_MARKER_RADIUS,
};
pub use dispatch::{DispatchReport, MotionDispatcher, MoverCache, MoverHandle, PassengerMovers};
pub use gizmos::{GizmoColor, GizmoSink, GizmoSphere, draw_authoring_waypoints, draw_waypoints};
pub use layers::{
    CollisionLayer, LayerMask, all_layers, default_collision_mask, default_passenger_mask,
};
pub use passenger::{HorizontalReach, PassengerKind, PassengerMovement, PassengerResolver};
pub use platform::{MovingPlatform, TickOutcome};
pub use rapier_world::RapierQueryWorld;
pub use raycast::{RayHit, RayQuery, RaySpacing, RaycastController, RaycastOrigins};
pub use types::{Aabb2, ActorId, Point2, SimTime, Vec2, Vec3};
pub use waypoint::{MotionSettings, TravelDirection, WaypointMotion, WaypointPath, ease};

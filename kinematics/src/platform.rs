/*!
A kinematic platform that follows a waypoint path and transports the actors it touches.

Per tick:
1. Refresh ray origins from the platform's current box.
2. Advance along the path to get this tick's displacement.
3. Probe for passengers with that displacement.
4. Move pushed passengers, translate the platform, then move riding passengers.

The platform owns its position and probing state. Passengers are only ever referenced by
[`ActorId`]; moving them is delegated to the scene through [`PassengerMovers`].
*/

use crate::{
    config::{PlatformConfig, PlatformConfigError},
    dispatch::{DispatchReport, MotionDispatcher, PassengerMovers},
    passenger::{PassengerMovement, PassengerResolver},
    raycast::{RayQuery, RaycastController},
    types::{ActorId, Aabb2, SimTime, Vec2, Vec3},
    waypoint::{MotionSettings, WaypointMotion, WaypointPath},
};

/// Result of one [`MovingPlatform::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// How far the platform moved.
    pub displacement: Vec3,
    pub report: DispatchReport,
}

#[derive(Clone, Debug)]
pub struct MovingPlatform {
    id: ActorId,
    config: PlatformConfig,
    settings: MotionSettings,
    /// Box center.
    position: Vec3,
    size: Vec2,
    rays: RaycastController,
    path: WaypointPath,
    motion: WaypointMotion,
    resolver: PassengerResolver,
    dispatcher: MotionDispatcher,
}

impl MovingPlatform {
    /// Build a platform centered on `position` with box extents `size`.
    ///
    /// Waypoints are resolved against `position` here and never again.
    pub fn new(
        id: ActorId,
        config: PlatformConfig,
        position: Vec3,
        size: Vec2,
    ) -> Result<Self, PlatformConfigError> {
        config.validate()?;

        let bounds = Aabb2::from_center_size(position.xy(), size);
        let rays = RaycastController::new(
            bounds,
            config.horizontal_ray_count,
            config.vertical_ray_count,
        );
        let path = WaypointPath::new(config.local_waypoints.clone(), position);
        let settings = config.motion_settings();

        log::debug!(
            "{id}: platform with {} waypoints, cyclic={}, speed={}",
            path.len(),
            settings.cyclic,
            settings.speed
        );

        Ok(Self {
            id,
            config,
            settings,
            position,
            size,
            rays,
            path,
            motion: WaypointMotion::new(),
            resolver: PassengerResolver::new(),
            dispatcher: MotionDispatcher::new(),
        })
    }

    /// Advance one tick.
    ///
    /// `env` answers ray queries and moves passengers. Scenes that mirror the platform in their
    /// collision world should sync it in [`PassengerMovers::platform_translated`].
    pub fn tick<E>(&mut self, time: SimTime, env: &mut E) -> TickOutcome
    where
        E: RayQuery + PassengerMovers,
    {
        self.rays.update_raycast_origins(self.bounds());

        let displacement = self
            .motion
            .advance(&self.path, &self.settings, self.position, time);

        self.resolver.resolve(
            displacement,
            &self.rays,
            self.config.passenger_mask,
            self.config.horizontal_reach,
            &*env,
        );

        let position = &mut self.position;
        let report = self.dispatcher.dispatch(
            self.resolver.movements(),
            self.id,
            displacement,
            env,
            |d| *position += d,
        );

        TickOutcome {
            displacement,
            report,
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current box in the XY plane.
    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_center_size(self.position.xy(), self.size)
    }

    /// Change the box extents; ray spacing is recomputed.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        let bounds = self.bounds();
        self.rays.calculate_ray_spacing(bounds);
        self.rays.update_raycast_origins(bounds);
    }

    #[inline]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    #[inline]
    pub fn rays(&self) -> &RaycastController {
        &self.rays
    }

    #[inline]
    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    #[inline]
    pub fn motion(&self) -> &WaypointMotion {
        &self.motion
    }

    /// Passenger records produced by the most recent tick.
    #[inline]
    pub fn movements(&self) -> &[PassengerMovement] {
        self.resolver.movements()
    }

    /// Forget the cached mover of an actor that left the scene.
    pub fn forget_passenger(&mut self, actor: ActorId) {
        if self.dispatcher.cache_mut().forget(actor).is_some() {
            log::debug!("{}: forgot mover of {actor}", self.id);
        }
    }
}

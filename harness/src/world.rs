//! Runtime scene: a rapier query world plus the riders moving through it.

use anyhow::{Context, Result};
use kinematics::{
    Aabb2, ActorId, CollisionLayer, GizmoColor, GizmoSink, LayerMask, MoverHandle, MovingPlatform,
    PassengerMovers, Point2, RapierQueryWorld, RayHit, RayQuery, RaycastActor, Vec2, Vec3,
};

use crate::scene::SceneConfig;

/// A raycast actor driven by gravity.
pub struct Rider {
    pub actor: RaycastActor,
    pub velocity: Vec2,
}

pub struct SceneWorld {
    world: RapierQueryWorld,
    riders: Vec<Rider>,
    gravity: f32,
}

impl SceneWorld {
    /// Build the collision world and platforms described by `scene`.
    pub fn build(scene: &SceneConfig) -> Result<(Self, Vec<MovingPlatform>)> {
        let mut world = RapierQueryWorld::new();

        for s in &scene.statics {
            world
                .insert_box(s.id, Aabb2::from_center_size(s.center, s.size), s.layers)
                .with_context(|| format!("static {}", s.id))?;
        }

        let mut platforms = Vec::with_capacity(scene.platforms.len());
        for p in &scene.platforms {
            let platform = MovingPlatform::new(p.id, p.config.clone(), p.position, p.size)
                .with_context(|| format!("platform {}", p.id))?;
            world
                .insert_box(p.id, platform.bounds(), CollisionLayer::Platform.into_mask())
                .with_context(|| format!("platform {}", p.id))?;
            platforms.push(platform);
        }

        let mut riders = Vec::with_capacity(scene.riders.len());
        for r in &scene.riders {
            let actor = RaycastActor::new(
                r.id,
                r.position,
                r.size,
                r.collision_mask,
                r.horizontal_ray_count,
                r.vertical_ray_count,
            );
            world
                .insert_box(r.id, actor.bounds(), CollisionLayer::Passenger.into_mask())
                .with_context(|| format!("rider {}", r.id))?;
            riders.push(Rider {
                actor,
                velocity: Vec2::zeros(),
            });
        }

        log::info!(
            "scene: {} statics, {} platforms, {} riders",
            scene.statics.len(),
            platforms.len(),
            riders.len()
        );

        Ok((
            Self {
                world,
                riders,
                gravity: scene.gravity,
            },
            platforms,
        ))
    }

    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    /// Apply gravity to every rider and let it fall until it lands.
    pub fn step_riders(&mut self, dt: f32) {
        for rider in &mut self.riders {
            rider.velocity.y += self.gravity * dt;
            let d = rider.velocity * dt;
            rider
                .actor
                .move_by(&self.world, Vec3::new(d.x, d.y, 0.0), false);

            let hits = rider.actor.collisions();
            if hits.below || hits.above {
                rider.velocity.y = 0.0;
            }
            self.world
                .set_center(rider.actor.id(), rider.actor.position());
        }
    }
}

impl RayQuery for SceneWorld {
    fn cast_ray(
        &self,
        origin: Point2,
        dir: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.world.cast_ray(origin, dir, max_distance, mask)
    }
}

impl PassengerMovers for SceneWorld {
    fn lookup(&mut self, actor: ActorId) -> Option<MoverHandle> {
        self.riders
            .iter()
            .position(|r| r.actor.id() == actor)
            .map(MoverHandle)
    }

    fn move_passenger(&mut self, mover: MoverHandle, displacement: Vec3, standing: bool) {
        let Some(rider) = self.riders.get_mut(mover.0) else {
            log::warn!("stale mover handle {mover:?}");
            return;
        };
        rider.actor.move_by(&self.world, displacement, standing);
        self.world
            .set_center(rider.actor.id(), rider.actor.position());
    }

    fn platform_translated(&mut self, platform: ActorId, displacement: Vec3) {
        if !self.world.translate(platform, displacement.xy()) {
            log::warn!("{platform} has no collider to sync");
        }
    }
}

/// Gizmo sink that writes markers to the log.
pub struct LogGizmos;

impl GizmoSink for LogGizmos {
    fn sphere(&mut self, center: Vec3, radius: f32, color: GizmoColor) {
        log::info!(
            "gizmo sphere at ({:.3}, {:.3}, {:.3}) r={radius} rgba=({}, {}, {}, {})",
            center.x,
            center.y,
            center.z,
            color.r,
            color.g,
            color.b,
            color.a
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematics::SimTime;

    #[test]
    fn demo_riders_come_along_for_the_ride() {
        let scene = SceneConfig::default();
        let (mut world, mut platforms) = SceneWorld::build(&scene).expect("scene");

        let dt = 1.0 / 60.0;
        let mut time = SimTime::new(0.0, dt);
        for _ in 0..240 {
            for platform in &mut platforms {
                platform.tick(time, &mut world);
            }
            world.step_riders(dt);
            time = time.advanced(dt);
        }

        // Each rider ends up on top of its platform.
        for (rider, platform) in world.riders().iter().zip(&platforms) {
            let feet = rider.actor.bounds().mins.y;
            let top = platform.bounds().maxs.y;
            assert!((feet - top).abs() < 1.0e-2, "{} feet {feet} top {top}", rider.actor.id());
            assert!(rider.actor.collisions().below);
        }
    }
}

//! Scene description loaded from JSON.
//!
//! Every section is optional; a missing file or section falls back to the built-in demo scene
//! (a floor, a lift and a sideways shuttle, each with a rider on top).

use std::{fs, path::Path};

use anyhow::{Context, Result};
use kinematics::{
    ActorId, CollisionLayer, DEFAULT_RAY_COUNT, HorizontalReach, LayerMask, PlatformConfig, Vec2,
    Vec3, default_collision_mask,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Rider vertical acceleration (units/s², negative is down).
    pub gravity: f32,
    pub statics: Vec<StaticSpec>,
    pub platforms: Vec<PlatformSpec>,
    pub riders: Vec<RiderSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticSpec {
    pub id: ActorId,
    pub center: Vec2,
    pub size: Vec2,
    #[serde(default = "environment_layer")]
    pub layers: LayerMask,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub id: ActorId,
    /// Box center at the start of the run; waypoints are relative to it.
    pub position: Vec3,
    pub size: Vec2,
    #[serde(default)]
    pub config: PlatformConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiderSpec {
    pub id: ActorId,
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default = "default_collision_mask")]
    pub collision_mask: LayerMask,
    #[serde(default = "default_ray_count")]
    pub horizontal_ray_count: usize,
    #[serde(default = "default_ray_count")]
    pub vertical_ray_count: usize,
}

fn environment_layer() -> LayerMask {
    CollisionLayer::Environment.into_mask()
}

fn default_ray_count() -> usize {
    DEFAULT_RAY_COUNT
}

impl Default for SceneConfig {
    fn default() -> Self {
        let lift = PlatformConfig {
            local_waypoints: vec![Vec3::zeros(), Vec3::new(0.0, 4.0, 0.0)],
            speed: 2.0,
            wait_time: 0.5,
            easing_factor: 1.0,
            ..PlatformConfig::default()
        };
        let shuttle = PlatformConfig {
            local_waypoints: vec![
                Vec3::zeros(),
                Vec3::new(6.0, 0.0, 0.0),
                Vec3::new(6.0, 2.0, 0.0),
            ],
            cyclic: true,
            speed: 3.0,
            wait_time: 0.25,
            easing_factor: 2.0,
            horizontal_reach: HorizontalReach::HorizontalComponent,
            ..PlatformConfig::default()
        };

        Self {
            gravity: -20.0,
            statics: vec![StaticSpec {
                id: ActorId(1),
                center: Vec2::new(0.0, -1.0),
                size: Vec2::new(40.0, 1.0),
                layers: environment_layer(),
            }],
            platforms: vec![
                PlatformSpec {
                    id: ActorId(10),
                    position: Vec3::new(-6.0, 1.0, 0.0),
                    size: Vec2::new(3.0, 0.5),
                    config: lift,
                },
                PlatformSpec {
                    id: ActorId(11),
                    position: Vec3::new(2.0, 1.0, 0.0),
                    size: Vec2::new(3.0, 0.5),
                    config: shuttle,
                },
            ],
            riders: vec![
                RiderSpec {
                    id: ActorId(100),
                    position: Vec2::new(-6.0, 1.75),
                    size: Vec2::new(1.0, 1.0),
                    collision_mask: default_collision_mask(),
                    horizontal_ray_count: DEFAULT_RAY_COUNT,
                    vertical_ray_count: DEFAULT_RAY_COUNT,
                },
                RiderSpec {
                    id: ActorId(101),
                    position: Vec2::new(2.0, 1.75),
                    size: Vec2::new(1.0, 1.0),
                    collision_mask: default_collision_mask(),
                    horizontal_ray_count: DEFAULT_RAY_COUNT,
                    vertical_ray_count: DEFAULT_RAY_COUNT,
                },
            ],
        }
    }
}

impl SceneConfig {
    /// Read a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing scene file {}", path.display()))
    }
}

//! Headless runner for moving-platform scenes.
//!
//! Loads a scene (or the built-in demo), steps every platform and rider at a fixed rate and logs
//! where everything ends up.

mod scene;
mod world;

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use kinematics::SimTime;
use tracing_subscriber::EnvFilter;

use crate::{
    scene::SceneConfig,
    world::{LogGizmos, SceneWorld},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description (JSON). Defaults to the built-in demo scene.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per step
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Log waypoint markers once per simulated second
    #[arg(long)]
    gizmos: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds, got {}",
        args.dt
    );

    let scene = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let (mut world, mut platforms) = SceneWorld::build(&scene)?;

    let gizmo_every = ((1.0 / args.dt).round() as u32).max(1);
    let mut time = SimTime::new(0.0, args.dt);
    let mut carried = 0usize;

    for tick in 0..args.ticks {
        for platform in &mut platforms {
            let out = platform.tick(time, &mut world);
            carried += out.report.before + out.report.after;
            if out.report.skipped > 0 {
                log::debug!(
                    "tick {tick}: {} skipped {} passengers",
                    platform.id(),
                    out.report.skipped
                );
            }
        }
        world.step_riders(args.dt);

        if args.gizmos && tick % gizmo_every == 0 {
            for platform in &platforms {
                platform.draw_gizmos(&mut LogGizmos);
            }
        }
        time = time.advanced(args.dt);
    }

    log::info!(
        "simulated {} ticks ({:.2}s), {carried} passenger moves",
        args.ticks,
        time.now
    );
    for platform in &platforms {
        let p = platform.position();
        log::info!(
            "{}: at ({:.3}, {:.3}, {:.3}), segment from waypoint {}",
            platform.id(),
            p.x,
            p.y,
            p.z,
            platform.motion().from_index()
        );
    }
    for rider in world.riders() {
        let p = rider.actor.position();
        log::info!(
            "{}: at ({:.3}, {:.3}), grounded={}",
            rider.actor.id(),
            p.x,
            p.y,
            rider.actor.collisions().below
        );
    }

    Ok(())
}

//! Physics Inspector - headless driver for the rigid-body engine.
//!
//! Drops a handful of primitives onto a ground plane, runs the fixed-step
//! loop for a configured span of frame time and logs world statistics.

mod config;
mod scene;
mod stats;

use anyhow::{Context, Result};
use config::InspectorConfig;
use engine_core::Time;
use scene::Scene;
use stats::StepTimer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Physics Inspector");
    let config = InspectorConfig::load();
    log::info!("Config: {:?}", config);

    let mut scene = Scene::new(&config.world_settings(), config.spawn_height, config.seed)
        .context("Failed to build scene")?;
    scene
        .reset(config.initial_bodies)
        .context("Failed to spawn initial bodies")?;

    run(&mut scene, &config);
    report(&scene);
    Ok(())
}

/// Feed constant frames into the fixed-step accumulator until the configured
/// duration has elapsed.
fn run(scene: &mut Scene, config: &InspectorConfig) {
    let mut time = Time::new();
    time.set_time_scale(config.time_scale);

    let (frame, frames) = config.loop_frames();
    let mut last_report = 0u64;
    let mut timer = StepTimer::new();

    for _ in 0..frames {
        time.advance(frame);
        while time.should_fixed_update() {
            let dt = time.fixed_timestep_seconds();
            timer.time(|| scene.physics.step(dt));
        }
        scene.physics.sync_to_visuals(&mut scene.visuals);

        let whole_seconds = time.simulation_seconds() as u64;
        if whole_seconds > last_report {
            last_report = whole_seconds;
            let stats = scene.physics.stats();
            log::info!(
                "t={:.1}s frames={} steps={} bodies={} (dynamic {}, static {}) contacts={} step={:.3} ms (avg {:.3} ms)",
                time.simulation_seconds(),
                time.frame_count(),
                time.fixed_steps(),
                stats.total_bodies,
                stats.dynamic_bodies,
                stats.static_bodies,
                stats.contacts,
                timer.last_ms(),
                timer.take_mean_ms()
            );
        }
    }
}

fn report(scene: &Scene) {
    for body in scene.physics.bodies().iter().filter(|b| !b.is_static()) {
        let name = scene
            .name_of(body.id())
            .unwrap_or_else(|| body.id().to_string());
        let p = body.position;
        log::info!(
            "{}: {:?} at ({:.2}, {:.2}, {:.2}), speed {:.2} m/s",
            name,
            body.shape().kind(),
            p.x,
            p.y,
            p.z,
            body.speed()
        );
        if let Some(aabb) = body.aabb() {
            log::debug!("{} bounds {:?} .. {:?}", name, aabb.min, aabb.max);
        }
    }
}

//! Synthetic-scene culling demo.
//!
//! Builds a dense grid of meshes with a few lights and instanced prop
//! collections, orbits a camera around it, and runs a cull session through
//! the refresh driver for a fixed number of simulated frames, applying the
//! resulting show/hide transitions and logging per-frame stats.
//!
//! Run with: `cargo run -p vantage-demo -- --budget true --metric verts`

mod scene_gen;

use std::time::Duration;

use clap::Parser;
use glam::Vec3;
use tracing::info;

use vantage_config::{CliArgs, CullConfig};
use vantage_cull::{CullSession, RefreshDriver, apply_transitions};
use vantage_scene::{ViewContext, Viewport};

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "vantage-demo", about = "Viewport culling demo on a synthetic scene")]
struct DemoArgs {
    /// Number of simulated frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Mesh grid side length (grid * grid meshes are generated).
    #[arg(long, default_value_t = 20)]
    grid: u32,

    /// Camera orbit radius.
    #[arg(long, default_value_t = 60.0)]
    orbit: f32,

    #[command(flatten)]
    config: CliArgs,
}

fn main() {
    let args = DemoArgs::parse();

    // Resolve config directory: CLI override or the platform default.
    let config_dir = args.config.config.clone().or_else(CullConfig::default_dir);
    let mut config = match &config_dir {
        Some(dir) => CullConfig::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            CullConfig::default()
        }),
        None => CullConfig::default(),
    };
    config.apply_cli_overrides(&args.config);

    let log_dir = config_dir.as_ref().map(|d| d.join("logs"));
    vantage_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    let mut scene = scene_gen::build(args.grid);
    info!(
        "Scene: {} objects ({}x{} mesh grid, lights, instanced props)",
        scene.objects().count(),
        args.grid,
        args.grid,
    );

    let mut session = match CullSession::begin(&scene, config.clone()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("cannot start cull session: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Session: {} candidates, budget: {}",
        session.candidate_count(),
        session.budget_summary(),
    );

    let mut driver = RefreshDriver::from_config(&config.refresh);
    driver.start(Duration::ZERO);

    let viewport = Viewport {
        width: 1920.0,
        height: 1080.0,
    };
    let frame_interval = Duration::from_millis(33);
    let mut total_shown = 0usize;
    let mut total_hidden = 0usize;
    let mut frames_run = 0u32;

    // The camera orbits for the first three quarters of the run, then
    // holds still so settle mode gets a quiet period to fire in.
    let moving_frames = args.frames * 3 / 4;

    for frame in 0..args.frames {
        let now = frame_interval * frame;
        let orbit_frame = frame.min(moving_frames);
        if frame <= moving_frames {
            driver.notify_input(now);
        }
        if !driver.tick(now) {
            continue;
        }

        let angle = orbit_frame as f32 * 0.05;
        let eye = Vec3::new(
            args.orbit * angle.cos(),
            10.0,
            args.orbit * angle.sin(),
        );
        let view = ViewContext::perspective(
            eye,
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_3,
            viewport,
            0.1,
            10_000.0,
        );

        let result = session.step(&scene, &view);
        apply_transitions(&mut scene, &result.transitions);
        driver.frame_complete(now);

        total_shown += result.stats.shown;
        total_hidden += result.stats.hidden;
        frames_run += 1;
        info!("frame {frame:>4}: {}", result.stats.summary());
    }

    driver.cancel();
    session.end();
    info!(
        "Done: {frames_run} frames, {total_shown} shows, {total_hidden} hides"
    );
}

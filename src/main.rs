use anyhow::{Context, Result};
use clap::Parser;

use follow_camera::camera::CameraConfig;
use follow_camera::cli::Cli;
use follow_camera::scene::Scene;
use follow_camera::sim::{Simulation, SimulationOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.print_config {
        println!("{}", CameraConfig::default().to_json_pretty()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => CameraConfig::load(path)?,
        None => CameraConfig::default(),
    };

    let options = SimulationOptions {
        ticks: cli.ticks,
        dt: cli.dt,
        walker_speed: cli.speed,
        pause: cli.pause,
        lens: !cli.no_lens,
    };

    let mut layout = cli.scene.layout();
    if let Some(path) = &cli.scene_file {
        layout.scene = Scene::load(path)?;
    }

    let mut sim = Simulation::with_layout(cli.scene, layout, config, options);
    let report = sim.run();

    match &cli.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            std::fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            let s = &report.summary;
            println!("Scene:            {:?}", report.scene);
            println!("Frames:           {}", report.frames.len());
            println!("Moving frames:    {}", s.moving_ticks);
            println!("Wall-blocked:     {}", s.blocked_ticks);
            println!("Max wall blend:   {:.3}", s.max_wall_blend);
            println!("Max camera step:  {:.4}", s.max_camera_step);
            println!("Inside geometry:  {}", s.solid_ticks);
            println!("Route completed:  {}", s.route_completed);
            if let Some(last) = report.frames.last() {
                println!("Final camera:     {:?}", last.camera_position);
                if let Some(fov) = last.fov {
                    println!("Final fov:        {:.2}", fov);
                }
            }
        }
    }

    Ok(())
}

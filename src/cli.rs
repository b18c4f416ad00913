// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::ScenePreset;

#[derive(Parser, Debug, Clone)]
#[command(name = "follow-camera")]
#[command(about = "Headless follow-camera simulation", long_about = None)]
pub struct Cli {
    /// Scene preset the walker moves through
    #[arg(long, value_enum, default_value = "left-wall")]
    pub scene: ScenePreset,

    /// Obstacles JSON replacing the preset's geometry (route is kept)
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 1200)]
    pub ticks: usize,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Walker speed in units per second
    #[arg(long, default_value_t = 3.5)]
    pub speed: f32,

    /// Idle seconds before each leg of the route
    #[arg(long, default_value_t = 2.0)]
    pub pause: f32,

    /// Camera config JSON; missing fields fall back to defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the full frame report as JSON here
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Run without a lens, leaving field of view untouched
    #[arg(long = "no-lens", default_value = "false")]
    pub no_lens: bool,

    /// Print the default camera config as JSON and exit
    #[arg(long, default_value = "false")]
    pub print_config: bool,

    /// Only log warnings and errors
    #[arg(long, short, default_value = "false")]
    pub quiet: bool,
}

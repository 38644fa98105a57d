use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use move_tracker_rs::camera::{self, CameraModel};
use move_tracker_rs::config::FilterConfig;
use move_tracker_rs::replay::{self, ReplayReport};

#[derive(Parser, Debug)]
#[command(name = "move_tracker")]
#[command(about = "Motion controller orientation replay and camera layout lookup", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a recorded IMU log through one orientation filter per controller
    Replay {
        /// Path to a JSON log (.json or .json.gz)
        #[arg(long)]
        log: PathBuf,

        /// JSON file with filter settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the gyro trust weight
        #[arg(long)]
        gyro_weight: Option<f64>,

        /// Override the near-zero Z threshold
        #[arg(long)]
        degenerate_z_threshold: Option<f64>,
    },

    /// Resolve the capture layout for a camera and crop size
    Layout {
        /// Camera model (ps3, ps4, ps5)
        #[arg(long)]
        camera: CameraModel,

        /// Crop width (-1 with height -1 selects the default)
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        width: i32,

        /// Crop height
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        height: i32,
    },

    /// Print every supported layout
    Layouts,
}

#[derive(Serialize)]
struct ReplayOutput {
    generated_at: String,
    log: PathBuf,
    config: FilterConfig,
    report: ReplayReport,
}

fn load_config(
    path: Option<&PathBuf>,
    gyro_weight: Option<f64>,
    degenerate_z_threshold: Option<f64>,
) -> Result<FilterConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => FilterConfig::default(),
    };
    if let Some(w) = gyro_weight {
        config.gyro_weight = w;
    }
    if let Some(t) = degenerate_z_threshold {
        config.degenerate_z_threshold = t;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Replay {
            log,
            config,
            gyro_weight,
            degenerate_z_threshold,
        } => {
            let config = load_config(config.as_ref(), gyro_weight, degenerate_z_threshold)?;
            log::info!("Replaying {} with {:?}", log.display(), config);
            let replay_log = replay::load_log(&log)
                .with_context(|| format!("loading log {}", log.display()))?;
            let report = replay::replay_log(&replay_log, config);
            let output = ReplayOutput {
                generated_at: Utc::now().to_rfc3339(),
                log,
                config,
                report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Layout {
            camera,
            width,
            height,
        } => {
            let layout = camera::resolve_layout(camera, width, height)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Command::Layouts => {
            for model in CameraModel::ALL {
                println!("{} (id {})", model, model.id());
                for l in camera::supported_layouts(model) {
                    println!(
                        "  capture {}x{} crop ({}, {}) {}x{}",
                        l.capture_width,
                        l.capture_height,
                        l.crop_x,
                        l.crop_y,
                        l.crop_width,
                        l.crop_height
                    );
                }
            }
        }
    }

    Ok(())
}

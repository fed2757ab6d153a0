//! `orrery`: an interactive solar-system orrery.
//!
//! Hover a planet to fly the camera to it, press `R` or `Home` to return,
//! drag to orbit and scroll to zoom, press `F5` to re-read `config.ron`.
//! `--headless-frames N` runs the simulation without a window and logs where
//! everything ended up.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::headless::run_headless;
use orrery_app::platform::PlatformDirs;
use orrery_app::reload::ConfigSource;
use orrery_app::window;
use orrery_config::{CliArgs, Config};
use orrery_sim::Session;
use tracing::{error, info};

/// Command-line arguments for the orrery binary.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Interactive solar-system orrery")]
struct Args {
    #[command(flatten)]
    overrides: CliArgs,

    /// Run N frames at 60 Hz without opening a window.
    #[arg(long)]
    headless_frames: Option<u32>,

    /// Body to focus at startup in headless mode.
    #[arg(long)]
    focus: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let dirs = match args.overrides.config.as_deref() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        return ExitCode::FAILURE;
    }

    let file_config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            orrery_log::init_logging(None, false, None);
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let source = ConfigSource::new(dirs.config_dir.clone(), file_config, args.overrides.clone());
    let config = source.effective();

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Orrery starting, config in {}, logs in {}",
        dirs.config_dir.display(),
        dirs.log_dir.display()
    );

    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("Invalid body configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(frames) = args.headless_frames {
        return match run_headless(&mut session, frames, args.focus.as_deref()) {
            Ok(summary) => {
                info!(
                    "Headless run finished: {} frames, {:.2}s, focus {:?}",
                    summary.frames, summary.time, summary.focus
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Headless run failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match window::run(source, session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Configuration system for the orrery.
//!
//! Every setting has a compiled-in default. A `config.ron` file may override
//! any subset of them, and CLI flags (via clap) override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, CameraConfig, Config, DebugConfig, StarfieldConfig, SystemConfig,
    TransitionConfig, WindowConfig, default_bodies,
};
pub use error::ConfigError;

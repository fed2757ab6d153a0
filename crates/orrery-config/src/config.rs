//! Configuration structs with compiled-in defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera and orbit-control settings.
    pub camera: CameraConfig,
    /// Scripted camera transition settings.
    pub transition: TransitionConfig,
    /// Self-rotation rates shared by all bodies.
    pub system: SystemConfig,
    /// Body definitions. Exactly one entry must have `orbit_radius == 0`.
    pub bodies: Vec<BodyConfig>,
    /// Background starfield settings.
    pub starfield: StarfieldConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Camera configuration: projection, home pose and orbit-control limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera position of the default (reset) pose.
    pub home_position: [f32; 3],
    /// Look-target of the default (reset) pose.
    pub home_target: [f32; 3],
    /// Closest the orbit controls may dolly toward the target.
    pub min_distance: f32,
    /// Farthest the orbit controls may dolly away from the target.
    pub max_distance: f32,
    /// Smooth out orbit-control motion over several frames.
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame when damping.
    pub damping_factor: f32,
    /// Orbit rotation speed multiplier.
    pub rotate_speed: f32,
    /// Wheel zoom speed multiplier.
    pub zoom_speed: f32,
}

/// Scripted camera transition configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Duration of every focus/reset transition in seconds.
    pub duration_secs: f64,
    /// Focus distance from the body, as a multiple of its radius.
    pub focus_distance_radii: f32,
}

/// Self-rotation rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// Self-rotation of every orbiting body in radians per second.
    pub orbiting_spin_rate: f32,
    /// Self-rotation of the central body in radians per second.
    pub central_spin_rate: f32,
}

/// Static parameters of one body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    /// Unique display name.
    pub name: String,
    /// Render radius.
    pub radius: f32,
    /// Base color as `0xRRGGBB`.
    pub color: u32,
    /// Distance from the center. `0.0` marks the central body.
    pub orbit_radius: f32,
    /// Angular speed along the orbit in radians per second.
    pub angular_speed: f64,
    /// Tilt of the orbital plane about the x-axis, in degrees.
    #[serde(default)]
    pub inclination_deg: f64,
    /// Angle along the orbit at time zero, in radians.
    #[serde(default)]
    pub initial_phase: f64,
}

impl BodyConfig {
    /// A body starting at phase zero.
    pub fn new(
        name: &str,
        radius: f32,
        color: u32,
        orbit_radius: f32,
        angular_speed: f64,
        inclination_deg: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            radius,
            color,
            orbit_radius,
            angular_speed,
            inclination_deg,
            initial_phase: 0.0,
        }
    }
}

/// Background starfield configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of star points.
    pub count: u32,
    /// Outer radius of the star shell. Stars land in `[0.7, 1.0] * radius`.
    pub radius: f32,
    /// Seed for deterministic placement.
    pub seed: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// The Sun and eight planets.
pub fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("Sun", 16.0, 0xffcc00, 0.0, 0.0, 0.0),
        BodyConfig::new("Mercury", 3.0, 0xaaaaaa, 28.0, 0.02, 7.0),
        BodyConfig::new("Venus", 4.0, 0xffb380, 38.0, 0.015, 3.4),
        BodyConfig::new("Earth", 5.0, 0x3399ff, 50.0, 0.012, 0.0),
        BodyConfig::new("Mars", 4.0, 0xff3300, 62.0, 0.01, 1.85),
        BodyConfig::new("Jupiter", 11.0, 0xffe5b4, 80.0, 0.008, 1.3),
        BodyConfig::new("Saturn", 9.5, 0xf7e7ce, 100.0, 0.006, 2.5),
        BodyConfig::new("Uranus", 8.0, 0x7fffd4, 120.0, 0.004, 0.8),
        BodyConfig::new("Neptune", 7.5, 0x4169e1, 140.0, 0.003, 1.8),
    ]
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            transition: TransitionConfig::default(),
            system: SystemConfig::default(),
            bodies: default_bodies(),
            starfield: StarfieldConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            home_position: [0.0, 60.0, 120.0],
            home_target: [0.0, 0.0, 0.0],
            min_distance: 1.0,
            max_distance: 1000.0,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            focus_distance_radii: 3.0,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            orbiting_spin_rate: 0.5,
            central_spin_rate: 0.25,
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 500,
            radius: 800.0,
            seed: 0x0dd5_7a25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = read_config_file(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("config.ron");
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let new_config = read_config_file(&config_path)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

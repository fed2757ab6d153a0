//! Closed-form orbital kinematics.
//!
//! Positions are a pure function of simulated time and each body's static
//! orbit, so they never drift no matter how uneven the frame times are. Only
//! self-rotation is integrated from the frame delta.

use std::f32::consts::TAU;

use glam::Vec3;
use orrery_config::SystemConfig;

use crate::body::{BodyRegistry, Orbit};

/// Position on a circular orbit tilted by `orbit.inclination` about the x-axis.
///
/// With zero inclination the motion stays in the x–z plane. The central body
/// (orbit radius 0) always sits at the origin.
pub fn orbit_position(orbit: &Orbit, time_seconds: f64) -> Vec3 {
    if orbit.is_central() {
        return Vec3::ZERO;
    }
    let angle = orbit.initial_phase + time_seconds * orbit.angular_speed;
    let r = f64::from(orbit.radius);
    let (sin_a, cos_a) = angle.sin_cos();
    let (sin_i, cos_i) = orbit.inclination.sin_cos();

    Vec3::new(
        (cos_a * r) as f32,
        (sin_a * r * sin_i) as f32,
        (sin_a * r * cos_i) as f32,
    )
}

/// Writes body positions and spins once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalKinematics {
    /// Self-rotation of orbiting bodies in radians per second.
    pub orbiting_spin_rate: f32,
    /// Self-rotation of the central body in radians per second.
    pub central_spin_rate: f32,
}

impl Default for OrbitalKinematics {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl OrbitalKinematics {
    /// Build from the configured spin rates.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            orbiting_spin_rate: config.orbiting_spin_rate,
            central_spin_rate: config.central_spin_rate,
        }
    }

    /// Recompute every orbiting body's position for `time_seconds` and advance
    /// every body's spin by `delta_seconds`.
    ///
    /// The central body's position is never touched.
    pub fn update(&self, registry: &mut BodyRegistry, time_seconds: f64, delta_seconds: f32) {
        for body in registry.bodies_mut() {
            let rate = if body.is_central() {
                self.central_spin_rate
            } else {
                body.position = orbit_position(body.orbit(), time_seconds);
                self.orbiting_spin_rate
            };
            body.spin = (body.spin + rate * delta_seconds).rem_euclid(TAU);
        }
    }
}

//! Interactive orbit controls: drag to orbit the look-target, wheel to dolly.
//!
//! Input accumulates as pending spherical deltas; [`OrbitControls::update`]
//! applies them once per frame. With damping enabled only a fraction of the
//! pending motion is applied each frame and the rest decays.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use orrery_config::CameraConfig;

use crate::camera::PerspectiveCamera;

/// Keeps the polar angle away from the poles so `look_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-4;

/// Pending motion below this magnitude is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit-style camera controller around a mutable look-target.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Minimum camera-to-target distance.
    pub min_distance: f32,
    /// Maximum camera-to-target distance.
    pub max_distance: f32,
    /// Spread pending motion over several frames.
    pub enable_damping: bool,
    /// Fraction of pending motion applied per update when damping.
    pub damping_factor: f32,
    /// Rotation speed multiplier.
    pub rotate_speed: f32,
    /// Dolly speed multiplier.
    pub zoom_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitControls {
    /// Build controls targeting the configured home target.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::from_array(config.home_target),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Queue an orbit from a pointer drag of `delta` pixels.
    ///
    /// Dragging the full viewport height turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * delta.x / h * self.rotate_speed;
        self.delta_phi -= TAU * delta.y / h * self.rotate_speed;
    }

    /// Queue a dolly from wheel input. Positive `lines` moves toward the target.
    pub fn dolly(&mut self, lines: f32) {
        self.scale *= 0.95_f32.powf(lines * self.zoom_speed);
    }

    /// Drop any pending motion.
    pub fn cancel_motion(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }

    /// Whether input is still waiting to be applied.
    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > SETTLE_EPSILON
            || self.delta_phi.abs() > SETTLE_EPSILON
            || (self.scale - 1.0).abs() > SETTLE_EPSILON
    }

    /// Apply pending motion to `camera` and aim it at the target.
    ///
    /// Called every frame. Without pending motion and with the distance already
    /// inside limits the camera position is left exactly as it is.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let radius = offset.length();
        let clamped_radius = radius.clamp(self.min_distance, self.max_distance);

        if !self.has_pending_motion() {
            self.cancel_motion();
            if clamped_radius != radius && radius > 0.0 {
                camera.position = self.target + offset * (clamped_radius / radius);
            }
            camera.look_at(self.target);
            return;
        }

        let fraction = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        theta += self.delta_theta * fraction;
        phi = (phi + self.delta_phi * fraction).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let applied_scale = 1.0 + (self.scale - 1.0) * fraction;
        let new_radius = (radius * applied_scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + new_offset;
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - fraction;
            self.delta_phi *= 1.0 - fraction;
            self.scale = 1.0 + (self.scale - 1.0) * (1.0 - fraction);
        } else {
            self.cancel_motion();
        }
    }
}

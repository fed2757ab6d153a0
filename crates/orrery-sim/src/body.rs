//! Bodies and the registry that owns them.
//!
//! The registry is built once from configuration and never grows or shrinks.
//! Only the kinematics engine writes positions and spins; everyone else reads.

use std::collections::HashSet;

use glam::Vec3;
use orrery_config::BodyConfig;
use tracing::info;

use crate::error::SimError;

/// Index of a body inside its [`BodyRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Position of the body in registry order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Opaque handle of the renderable owned by a body. Assigned once at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(u32);

impl RenderHandle {
    /// Raw handle value, stable for the whole session.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Static circular-orbit parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Distance from the center. Zero for the central body.
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f64,
    /// Tilt of the orbital plane about the x-axis, in radians.
    pub inclination: f64,
    /// Angle along the orbit at time zero, in radians.
    pub initial_phase: f64,
}

impl Orbit {
    /// Whether these parameters describe the non-orbiting central body.
    pub fn is_central(&self) -> bool {
        self.radius == 0.0
    }

    /// Time for one full revolution, or `None` for a body that does not move.
    pub fn period(&self) -> Option<f64> {
        (self.angular_speed != 0.0).then(|| std::f64::consts::TAU / self.angular_speed.abs())
    }
}

/// A central body or orbiting satellite.
#[derive(Clone, Debug)]
pub struct Body {
    name: String,
    radius: f32,
    color: [f32; 3],
    orbit: Orbit,
    handle: RenderHandle,
    pub(crate) position: Vec3,
    pub(crate) spin: f32,
}

impl Body {
    /// Unique display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render radius, also the hit-test sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Linear RGB color in `[0, 1]`.
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    /// Static orbit parameters.
    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    /// Renderable owned by this body.
    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    /// Position written by the last kinematics update.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated self-rotation about +Y, in radians within `[0, TAU)`.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Whether this is the central body.
    pub fn is_central(&self) -> bool {
        self.orbit.is_central()
    }
}

/// Convert an sRGB `0xRRGGBB` color to linear RGB floats.
///
/// The surface is sRGB, so the GPU re-encodes these on write and the body
/// shows the configured color.
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    [hex >> 16, hex >> 8, hex].map(|channel| srgb_to_linear((channel & 0xff) as f32 / 255.0))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Owns every body for the lifetime of a session.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    central: BodyId,
}

impl BodyRegistry {
    /// Validate the configured bodies and build the registry.
    ///
    /// Exactly one body must have `orbit_radius == 0`; names must be unique;
    /// radii must be positive and every parameter finite.
    pub fn from_config(configs: &[BodyConfig]) -> Result<Self, SimError> {
        let mut names = HashSet::new();
        let mut central: Option<BodyId> = None;
        let mut bodies = Vec::with_capacity(configs.len());

        for (index, cfg) in configs.iter().enumerate() {
            validate(cfg)?;
            if !names.insert(cfg.name.as_str()) {
                return Err(SimError::DuplicateName(cfg.name.clone()));
            }

            let orbit = Orbit {
                radius: cfg.orbit_radius,
                angular_speed: cfg.angular_speed,
                inclination: cfg.inclination_deg.to_radians(),
                initial_phase: cfg.initial_phase,
            };

            if orbit.is_central() {
                if let Some(first) = central {
                    return Err(SimError::MultipleCentralBodies {
                        first: configs[first.0].name.clone(),
                        second: cfg.name.clone(),
                    });
                }
                central = Some(BodyId(index));
            }

            bodies.push(Body {
                name: cfg.name.clone(),
                radius: cfg.radius,
                color: color_from_hex(cfg.color),
                orbit,
                handle: RenderHandle(index as u32),
                position: Vec3::ZERO,
                spin: 0.0,
            });
        }

        let central = central.ok_or(SimError::NoCentralBody)?;
        info!(
            bodies = bodies.len(),
            central = %bodies[central.0].name,
            "Body registry built"
        );
        Ok(Self { bodies, central })
    }

    /// Number of bodies, central body included.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a registry built by [`from_config`](Self::from_config).
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Look up a body. Unknown ids yield `None` rather than a fault.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// The id of the central body.
    pub fn central_id(&self) -> BodyId {
        self.central
    }

    /// The central body.
    pub fn central(&self) -> &Body {
        &self.bodies[self.central.0]
    }

    /// Find a body by name (case-sensitive).
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(BodyId)
    }

    /// All bodies with their ids, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Bodies that orbit the center.
    pub fn orbiting(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.iter().filter(|(_, b)| !b.is_central())
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}

fn validate(cfg: &BodyConfig) -> Result<(), SimError> {
    if !(cfg.radius.is_finite() && cfg.radius > 0.0) {
        return Err(SimError::InvalidRadius {
            name: cfg.name.clone(),
            radius: cfg.radius,
        });
    }
    if !(cfg.orbit_radius.is_finite() && cfg.orbit_radius >= 0.0) {
        return Err(SimError::InvalidOrbitRadius {
            name: cfg.name.clone(),
            orbit_radius: cfg.orbit_radius,
        });
    }
    let fields = [
        ("angular speed", cfg.angular_speed),
        ("inclination", cfg.inclination_deg),
        ("initial phase", cfg.initial_phase),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(SimError::NonFiniteParameter {
                name: cfg.name.clone(),
                field,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_config::default_bodies;

    fn body(name: &str, orbit_radius: f32) -> BodyConfig {
        BodyConfig {
            name: name.to_string(),
            radius: 1.0,
            color: 0xffffff,
            orbit_radius,
            angular_speed: 0.1,
            inclination_deg: 0.0,
            initial_phase: 0.0,
        }
    }

    #[test]
    fn test_default_bodies_build() {
        let registry = BodyRegistry::from_config(&default_bodies()).unwrap();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.central().name(), "Sun");
        assert_eq!(registry.orbiting().count(), 8);
    }

    #[test]
    fn test_inclination_converted_to_radians() {
        let registry = BodyRegistry::from_config(&default_bodies()).unwrap();
        let mercury = registry.get(registry.find("Mercury").unwrap()).unwrap();
        assert!((mercury.orbit().inclination - 7.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_handles_are_unique() {
        let registry = BodyRegistry::from_config(&default_bodies()).unwrap();
        let handles: HashSet<_> = registry.iter().map(|(_, b)| b.handle()).collect();
        assert_eq!(handles.len(), registry.len());
    }

    #[test]
    fn test_missing_central_body_rejected() {
        let err = BodyRegistry::from_config(&[body("A", 5.0), body("B", 9.0)]).unwrap_err();
        assert_eq!(err, SimError::NoCentralBody);
    }

    #[test]
    fn test_two_central_bodies_rejected() {
        let err = BodyRegistry::from_config(&[body("A", 0.0), body("B", 0.0)]).unwrap_err();
        assert_eq!(
            err,
            SimError::MultipleCentralBodies {
                first: "A".to_string(),
                second: "B".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = BodyRegistry::from_config(&[body("A", 0.0), body("A", 3.0)]).unwrap_err();
        assert_eq!(err, SimError::DuplicateName("A".to_string()));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut bad = body("B", 3.0);
        bad.radius = 0.0;
        let err = BodyRegistry::from_config(&[body("A", 0.0), bad]).unwrap_err();
        assert!(matches!(err, SimError::InvalidRadius { .. }));
    }

    #[test]
    fn test_negative_orbit_rejected() {
        let err = BodyRegistry::from_config(&[body("A", 0.0), body("B", -1.0)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidOrbitRadius { .. }));
    }

    #[test]
    fn test_non_finite_speed_rejected() {
        let mut bad = body("B", 3.0);
        bad.angular_speed = f64::NAN;
        let err = BodyRegistry::from_config(&[body("A", 0.0), bad]).unwrap_err();
        assert_eq!(
            err,
            SimError::NonFiniteParameter {
                name: "B".to_string(),
                field: "angular speed"
            }
        );
    }

    #[test]
    fn test_unknown_id_is_none() {
        let registry = BodyRegistry::from_config(&[body("A", 0.0)]).unwrap();
        assert!(registry.get(BodyId(7)).is_none());
    }

    #[test]
    fn test_color_from_hex() {
        let [r, g, b] = color_from_hex(0xff8000);
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 0.215_861).abs() < 1e-4);
        assert!(b.abs() < 1e-6);
    }

    #[test]
    fn test_color_from_hex_decodes_srgb() {
        // 0x33 and 0x99 are well below their byte fraction once linearized.
        let [r, g, b] = color_from_hex(0x3399ff);
        assert!((r - 0.033_105).abs() < 1e-4);
        assert!((g - 0.318_547).abs() < 1e-4);
        assert!((b - 1.0).abs() < 1e-6);
        assert!(g < 0x99 as f32 / 255.0);

        let [lo, _, _] = color_from_hex(0x0a0000);
        assert!((lo - 10.0 / 255.0 / 12.92).abs() < 1e-6);
    }

    #[test]
    fn test_period() {
        let orbit = Orbit {
            radius: 10.0,
            angular_speed: 0.5,
            inclination: 0.0,
            initial_phase: 0.0,
        };
        assert!((orbit.period().unwrap() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
        let still = Orbit {
            angular_speed: 0.0,
            ..orbit
        };
        assert!(still.period().is_none());
    }
}

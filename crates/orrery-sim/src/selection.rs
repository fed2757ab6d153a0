//! Pointer hit-testing against body bounding spheres.

use glam::{Vec2, Vec3};

use crate::body::{BodyId, BodyRegistry};
use crate::camera::PerspectiveCamera;

/// A half-line with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first point on the sphere, if any.
    ///
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

/// Map a cursor position in pixels (origin top-left) to normalized device
/// coordinates (origin center, +Y up).
pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
    let size = viewport.max(Vec2::ONE);
    Vec2::new(cursor.x / size.x * 2.0 - 1.0, -(cursor.y / size.y) * 2.0 + 1.0)
}

/// Nearest orbiting body hit by `ray`. The central body is never a candidate.
pub fn pick_with_ray(registry: &BodyRegistry, ray: &Ray) -> Option<BodyId> {
    registry
        .orbiting()
        .filter_map(|(id, body)| {
            ray.intersect_sphere(body.position(), body.radius())
                .map(|t| (id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Cast from `camera` through `ndc` and return the nearest orbiting body.
pub fn pick(registry: &BodyRegistry, camera: &PerspectiveCamera, ndc: Vec2) -> Option<BodyId> {
    pick_with_ray(registry, &camera.ray_from_ndc(ndc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_config::BodyConfig;

    fn body(name: &str, radius: f32, orbit_radius: f32, phase: f64) -> BodyConfig {
        BodyConfig {
            name: name.to_string(),
            radius,
            color: 0xffffff,
            orbit_radius,
            angular_speed: 0.0,
            inclination_deg: 0.0,
            initial_phase: phase,
        }
    }

    /// Sun at the origin, `Near` at +X 20, `Far` at +X 40 (both on the x-axis).
    fn line_registry() -> BodyRegistry {
        let mut registry = BodyRegistry::from_config(&[
            body("Sun", 10.0, 0.0, 0.0),
            body("Near", 2.0, 20.0, 0.0),
            body("Far", 4.0, 40.0, 0.0),
        ])
        .unwrap();
        crate::OrbitalKinematics::default().update(&mut registry, 0.0, 0.0);
        registry
    }

    #[test]
    fn test_ray_hits_sphere_front() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
        assert!((ray.origin + ray.direction * t - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let ray = Ray {
            origin: Vec3::new(5.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_is_ignored() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::Z,
        };
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_exit() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_cursor_to_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
        assert_eq!(
            cursor_to_ndc(Vec2::new(400.0, 300.0), viewport),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_pick_returns_nearest() {
        let registry = line_registry();
        let ray = Ray {
            origin: Vec3::new(100.0, 0.0, 0.0),
            direction: Vec3::NEG_X,
        };
        assert_eq!(pick_with_ray(&registry, &ray), registry.find("Far"));

        let reverse = Ray {
            origin: Vec3::new(15.0, 0.0, 0.0),
            direction: Vec3::X,
        };
        assert_eq!(pick_with_ray(&registry, &reverse), registry.find("Near"));
    }

    #[test]
    fn test_pick_excludes_central_body() {
        let registry = line_registry();
        let ray = Ray {
            origin: Vec3::new(0.0, 50.0, 0.0),
            direction: Vec3::NEG_Y,
        };
        assert!(pick_with_ray(&registry, &ray).is_none());
    }

    #[test]
    fn test_pick_through_camera() {
        let registry = line_registry();
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(20.0, 0.0, 30.0);
        camera.look_at(Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(pick(&registry, &camera, Vec2::ZERO), registry.find("Near"));
        assert!(pick(&registry, &camera, Vec2::new(0.9, 0.9)).is_none());
    }
}

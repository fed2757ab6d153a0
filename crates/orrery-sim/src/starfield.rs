//! Deterministic background starfield: points scattered through a thick
//! spherical shell around the system.

use glam::Vec3;
use orrery_config::StarfieldConfig;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Inner edge of the star shell as a fraction of its outer radius.
pub const SHELL_INNER_FRACTION: f32 = 0.7;

/// Generates star positions from a seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldGenerator {
    seed: u64,
    count: u32,
    radius: f32,
}

impl StarfieldGenerator {
    /// Create a generator for `count` stars inside a shell of outer `radius`.
    pub fn new(seed: u64, count: u32, radius: f32) -> Self {
        Self {
            seed,
            count,
            radius,
        }
    }

    /// Create a generator from configuration.
    pub fn from_config(config: &StarfieldConfig) -> Self {
        Self::new(config.seed, config.count, config.radius)
    }

    /// Generate the star positions. Deterministic for a given seed.
    ///
    /// Directions are uniform on the sphere; distances are uniform in
    /// `[0.7, 1.0] * radius`.
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.count as usize);

        for _ in 0..self.count {
            let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            let theta = std::f32::consts::TAU * rng.random::<f32>();
            let r = self.radius
                * (SHELL_INNER_FRACTION + (1.0 - SHELL_INNER_FRACTION) * rng.random::<f32>());

            stars.push(Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ));
        }

        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count() {
        let stars = StarfieldGenerator::new(42, 500, 800.0).generate();
        assert_eq!(stars.len(), 500);
    }

    #[test]
    fn test_stars_inside_shell() {
        let stars = StarfieldGenerator::new(42, 2000, 800.0).generate();
        for (i, star) in stars.iter().enumerate() {
            let r = star.length();
            assert!(
                (559.9..=800.1).contains(&r),
                "Star {i} at distance {r} outside [560, 800]"
            );
        }
    }

    #[test]
    fn test_distribution_covers_full_sky() {
        let stars = StarfieldGenerator::new(42, 4000, 800.0).generate();
        let mut octant_counts = [0u32; 8];
        for s in &stars {
            let octant = ((s.x >= 0.0) as usize)
                | (((s.y >= 0.0) as usize) << 1)
                | (((s.z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (250..=750).contains(&count),
                "Octant {i} has {count} stars, expected roughly 500"
            );
        }
    }

    #[test]
    fn test_same_seed_produces_same_starfield() {
        let a = StarfieldGenerator::new(123, 300, 800.0).generate();
        let b = StarfieldGenerator::new(123, 300, 800.0).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = StarfieldGenerator::new(1, 300, 800.0).generate();
        let b = StarfieldGenerator::new(2, 300, 800.0).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_starfield() {
        assert!(StarfieldGenerator::new(9, 0, 800.0).generate().is_empty());
    }
}

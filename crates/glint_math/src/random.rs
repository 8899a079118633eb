//! Random sampling helpers.
//!
//! Every helper draws from an explicitly passed generator, so a seeded
//! stream fully determines the sequence of samples.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Per-axis magnitude below which a vector counts as degenerate.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Generate a random f64 in [0.0, 1.0).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Generate a random f64 in [min, max).
#[inline]
pub fn random_f64_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Generate a random vector with components in [0.0, 1.0).
pub fn random_vec3(rng: &mut dyn RngCore) -> Vec3 {
    let x = random_f64(rng);
    let y = random_f64(rng);
    let z = random_f64(rng);
    Vec3::new(x, y, z)
}

/// Generate a random vector with components in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    let x = random_f64_range(rng, min, max);
    let y = random_f64_range(rng, min, max);
    let z = random_f64_range(rng, min, max);
    Vec3::new(x, y, z)
}

/// Random point strictly inside the unit sphere, by rejection sampling.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere(rng).normalize()
}

/// Random unit vector in the hemisphere around `normal`.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Random point inside the unit disk in the xy plane (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let x = random_f64_range(rng, -1.0, 1.0);
        let y = random_f64_range(rng, -1.0, 1.0);
        let p = Vec3::new(x, y, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// True when the vector is close to zero in every dimension.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_f64_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = random_f64_range(&mut rng, -0.5, 0.5);
            assert!((-0.5..0.5).contains(&x));
        }
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }

    #[test]
    fn test_random_vec3_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = random_vec3_range(&mut rng, 2.0, 3.0);
            assert!(v.min_element() >= 2.0 && v.max_element() < 3.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_on_hemisphere() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        for _ in 0..1000 {
            assert!(random_on_hemisphere(&mut rng, normal).dot(normal) >= 0.0);
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = ChaCha8Rng::seed_from_u64(144);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-7, 0.0)));
        assert!(!near_zero(Vec3::X));
    }
}

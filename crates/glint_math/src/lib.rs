//! Math primitives for the glint path tracer.
//!
//! Vectors are double precision so that seeded renders stay bit-stable
//! against a `double`-based reference renderer.

// Re-export glam for convenience
pub use glam;

/// 3-component vector used for points, directions and colors alike.
pub type Vec3 = glam::DVec3;
/// A position in world space.
pub type Point3 = Vec3;
/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;

mod interval;
mod ray;
pub mod random;

pub use interval::Interval;
pub use ray::Ray;
pub use random::{
    near_zero, random_f64, random_f64_range, random_in_unit_disk, random_in_unit_sphere,
    random_on_hemisphere, random_unit_vector, random_vec3, random_vec3_range,
};

/// Reflect `v` about the surface normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refraction indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

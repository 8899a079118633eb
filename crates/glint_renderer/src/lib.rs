//! glint renderer - CPU path tracing of sphere scenes.
//!
//! A recursive Monte Carlo path tracer: the camera jitters rays through
//! each pixel, the scene reports the nearest hit, and the hit material
//! decides whether the ray scatters or is absorbed.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod sphere;

pub use camera::{Camera, Viewport};
pub use error::{RenderError, Result};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use output::{color_to_rgb8, linear_to_gamma, ImageBuffer, OutputFormat};
pub use sphere::Sphere;

/// Re-export math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};

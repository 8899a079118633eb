//! Camera: viewport setup, ray generation and the recursive radiance estimate.

use std::f64::consts::PI;
use std::io::Write;
use std::time::Instant;

use crate::{Hittable, ImageBuffer, RenderError, Result};
use glint_math::{random_f64, random_in_unit_disk, Color, Interval, Point3, Ray, Vec3};
use log::{debug, info};
use rand::RngCore;

/// Lower bound on hit distance; keeps bounced rays from re-hitting their
/// own surface through round-off ("shadow acne").
const MIN_HIT_T: f64 = 0.001;

const SKY_WHITE: Color = Color::new(1.0, 1.0, 1.0);
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

#[inline]
fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Configuration fields the viewport is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Framing {
    aspect_ratio: f64,
    image_width: u32,
    vfov: f64,
    lookfrom: Point3,
    lookat: Point3,
    vup: Vec3,
    defocus_angle: f64,
    focus_dist: f64,
}

/// State derived from the camera configuration by [`Camera::initialize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Rendered image width
    pub image_width: u32,
    /// Rendered image height, at least 1
    pub image_height: u32,
    /// Camera center (same as `lookfrom`)
    pub center: Point3,
    /// Location of pixel (0, 0)
    pub pixel00_loc: Point3,
    /// Offset to the pixel on the right
    pub pixel_delta_u: Vec3,
    /// Offset to the pixel below
    pub pixel_delta_v: Vec3,
    // Camera frame basis vectors
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
    /// Defocus disk horizontal radius
    pub defocus_disk_u: Vec3,
    /// Defocus disk vertical radius
    pub defocus_disk_v: Vec3,
    /// Whether rays start on the defocus disk rather than at `center`
    pub defocus: bool,
}

/// Camera for generating rays into the scene.
///
/// The public fields are configuration; call [`Camera::initialize`] after
/// changing them and before sampling or rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    // Camera positioning
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub lookfrom: Point3,
    /// Point the camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    // Lens settings
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from `lookfrom` to the plane of perfect focus
    pub focus_dist: f64,

    derived: Option<(Framing, Viewport)>,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::new(0.0, 0.0, -1.0),
            lookat: Point3::new(0.0, 0.0, 0.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            derived: None,
        }
    }

    /// Set image width and aspect ratio.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Point3, lookat: Point3, vup: Vec3) -> Self {
        self.lookfrom = lookfrom;
        self.lookat = lookat;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    fn framing(&self) -> Framing {
        Framing {
            aspect_ratio: self.aspect_ratio,
            image_width: self.image_width,
            vfov: self.vfov,
            lookfrom: self.lookfrom,
            lookat: self.lookat,
            vup: self.vup,
            defocus_angle: self.defocus_angle,
            focus_dist: self.focus_dist,
        }
    }

    /// Derive the viewport from the current configuration.
    ///
    /// Must be called before generating rays, and again after changing any
    /// setting other than `samples_per_pixel` and `max_depth`.
    pub fn initialize(&mut self) {
        let image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        let center = self.lookfrom;

        // Determine viewport dimensions
        let theta = degrees_to_radians(self.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f64 / image_height as f64);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (self.lookfrom - self.lookat).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / self.image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - (self.focus_dist * w) - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = self.focus_dist * degrees_to_radians(self.defocus_angle / 2.0).tan();

        let viewport = Viewport {
            image_width: self.image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
            defocus: self.defocus_angle > 0.0,
        };
        self.derived = Some((self.framing(), viewport));

        debug!(
            "Camera initialized: {}x{}, vfov {}, focus_dist {}",
            self.image_width, image_height, self.vfov, self.focus_dist
        );
    }

    /// Derived viewport state.
    ///
    /// Fails with `NotInitialized` before `initialize()`, and again once the
    /// framing settings have changed since the last `initialize()`.
    pub fn viewport(&self) -> Result<&Viewport> {
        match &self.derived {
            Some((framing, viewport)) if *framing == self.framing() => Ok(viewport),
            _ => Err(RenderError::NotInitialized),
        }
    }

    pub fn image_height(&self) -> Result<u32> {
        Ok(self.viewport()?.image_height)
    }

    /// Build a ray from the (possibly defocused) camera origin through a
    /// jittered point inside pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Result<Ray> {
        let vp = self.viewport()?;
        let pixel_center =
            vp.pixel00_loc + (i as f64 * vp.pixel_delta_u) + (j as f64 * vp.pixel_delta_v);
        let pixel_sample = pixel_center + self.pixel_sample_square(rng)?;

        let ray_origin = if vp.defocus {
            Self::defocus_disk_sample(vp, rng)
        } else {
            vp.center
        };
        let ray_direction = pixel_sample - ray_origin;

        Ok(Ray::new(ray_origin, ray_direction))
    }

    /// Random offset in [-0.5, 0.5) pixel units along both pixel deltas.
    pub fn pixel_sample_square(&self, rng: &mut dyn RngCore) -> Result<Vec3> {
        let vp = self.viewport()?;
        let px = -0.5 + random_f64(rng);
        let py = -0.5 + random_f64(rng);
        Ok((px * vp.pixel_delta_u) + (py * vp.pixel_delta_v))
    }

    /// Random offset within a disk of `radius` pixels around a pixel center.
    pub fn pixel_sample_disk(&self, radius: f64, rng: &mut dyn RngCore) -> Result<Vec3> {
        let vp = self.viewport()?;
        let p = radius * random_in_unit_disk(rng);
        Ok((p.x * vp.pixel_delta_u) + (p.y * vp.pixel_delta_v))
    }

    /// Random point on the camera defocus disk.
    fn defocus_disk_sample(vp: &Viewport, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        vp.center + (p.x * vp.defocus_disk_u) + (p.y * vp.defocus_disk_v)
    }

    /// Color seen along `ray`, following at most `depth` bounces.
    ///
    /// Exhausted depth and absorbed rays contribute black; rays that escape
    /// the scene see a white-to-blue vertical gradient.
    pub fn ray_color(
        &self,
        ray: &Ray,
        depth: u32,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        if let Some(rec) = world.hit(ray, Interval::new(MIN_HIT_T, f64::INFINITY)) {
            return match rec.material.scatter(ray, &rec, rng) {
                Some(scatter) => {
                    scatter.attenuation * self.ray_color(&scatter.scattered, depth - 1, world, rng)
                }
                None => Color::ZERO,
            };
        }

        let unit_direction = ray.direction().normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * SKY_WHITE + a * SKY_BLUE
    }

    /// Render every pixel into an image buffer of averaged linear colors.
    ///
    /// Pixels are visited in raster order with samples innermost, so the
    /// result is a pure function of configuration, scene and `rng` state.
    pub fn render_to_buffer(&self, world: &dyn Hittable, rng: &mut dyn RngCore) -> Result<ImageBuffer> {
        let vp = self.viewport()?;
        let (image_width, image_height) = (vp.image_width, vp.image_height);
        let scale = 1.0 / self.samples_per_pixel as f64;
        let mut image = ImageBuffer::new(image_width, image_height);

        info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            image_width, image_height, self.samples_per_pixel, self.max_depth
        );
        let start = Instant::now();

        for j in 0..image_height {
            debug!("Scanlines remaining: {}", image_height - j);
            for i in 0..image_width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let ray = self.get_ray(i, j, rng)?;
                    pixel_color += self.ray_color(&ray, self.max_depth, world, rng);
                }
                image.set(i, j, pixel_color * scale);
            }
        }

        info!("Rendered in {:.2?}", start.elapsed());
        Ok(image)
    }

    /// Render the scene and write it to `out` as a PPM stream.
    pub fn render<W: Write + ?Sized>(
        &self,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
        out: &mut W,
    ) -> Result<()> {
        self.render_to_buffer(world, rng)?.write_ppm(out)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

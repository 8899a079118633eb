//! End-to-end renders through the public API.

use std::sync::Arc;

use glint_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, Sphere,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn one_sphere_scene() -> Sphere {
    Sphere::new(
        Point3::new(10.0, 70.0, 80.0),
        5.0,
        Arc::new(Lambertian::new(Color::new(0.7, 0.7, 1.0)).into()),
    )
}

fn render_ppm(camera: &Camera, world: &dyn glint_renderer::Hittable, seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::new();
    camera.render(world, &mut rng, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_render_ppm_layout() {
    init_logging();
    let mut camera = Camera::new();
    camera.initialize();

    let ppm = render_ppm(&camera, &one_sphere_scene(), 144);
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(&lines[..3], ["P3", "100 100", "255"]);
    assert_eq!(lines.len(), 3 + 100 * 100);
    for line in &lines[3..] {
        let channels: Vec<u16> = line.split(' ').map(|c| c.parse().unwrap()).collect();
        assert_eq!(channels.len(), 3);
        assert!(channels.iter().all(|&c| c <= 255));
    }
    assert!(ppm.ends_with('\n'));
}

/// The one-sphere scene at the default camera, 10 spp, depth 10, seed 144.
const ONE_SPHERE_SEED_144: &str = include_str!("data/one_sphere_seed144.ppm");

#[test]
fn test_render_matches_golden_image() {
    init_logging();
    let mut camera = Camera::new();
    camera.initialize();

    let ppm = render_ppm(&camera, &one_sphere_scene(), 144);

    // Compare line by line first so a mismatch names the pixel
    for (index, (got, want)) in ppm.lines().zip(ONE_SPHERE_SEED_144.lines()).enumerate() {
        assert_eq!(got, want, "line {}", index + 1);
    }
    assert_eq!(ppm.as_bytes(), ONE_SPHERE_SEED_144.as_bytes());
}

#[test]
fn test_render_is_seed_deterministic() {
    init_logging();
    let mut camera = Camera::new();
    camera.initialize();
    let world = one_sphere_scene();

    let first = render_ppm(&camera, &world, 144);
    let second = render_ppm(&camera, &world, 144);
    assert_eq!(first, second);

    let other = render_ppm(&camera, &world, 145);
    assert_ne!(first, other);
}

#[test]
fn test_render_sees_sphere_against_sky() {
    init_logging();
    let mut camera = Camera::new();
    camera.initialize();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let image = camera.render_to_buffer(&one_sphere_scene(), &mut rng).unwrap();
    assert_eq!((image.width(), image.height()), (100, 100));

    // Blue channel is 1.0 everywhere: sky blue is 1.0 and so is the albedo
    for pixel in image.pixels() {
        assert!((pixel.z - 1.0).abs() < 1e-9);
    }

    // Looking straight down the view axis only sees sky
    let center = image.get(50, 50);
    assert!((center.x - 0.75).abs() < 0.01);

    // Against an empty scene only the pixels covering the sphere change
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let sky = camera.render_to_buffer(&HittableList::new(), &mut rng).unwrap();
    let covered: Vec<usize> = image
        .pixels()
        .iter()
        .zip(sky.pixels())
        .enumerate()
        .filter(|(_, (lit, bare))| (lit.y - bare.y).abs() > 0.05)
        .map(|(index, _)| index)
        .collect();

    assert!(!covered.is_empty());
    assert!(covered.len() < 500);
    // The sphere at (10, 70, 80) sits near the top of the frame
    assert!(covered.iter().all(|&index| index / 100 < 20));
}

#[test]
fn test_render_mixed_materials_with_shared_instances() {
    init_logging();
    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)).into());
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    let metal: Arc<Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.4).into());

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, 1.0), 100.0, ground.clone())));
    world.add(Box::new(Sphere::new(Point3::new(-1.0, 0.0, 1.0), 0.5, glass)));
    world.add(Box::new(Sphere::new(Point3::new(1.0, 0.0, 1.0), 0.5, metal)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, 1.2), 0.5, ground)));

    let mut camera = Camera::new().with_image(32, 2.0).with_quality(4, 8);
    camera.initialize();

    let ppm = render_ppm(&camera, &world, 7);
    assert!(ppm.starts_with("P3\n32 16\n255\n"));
    assert_eq!(ppm.lines().count(), 3 + 32 * 16);
    assert_eq!(ppm, render_ppm(&camera, &world, 7));
}

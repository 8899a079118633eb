//! JSON scene files: camera settings, named materials and spheres.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::{Color, Point3, Vec3};
use glint_renderer::{Camera, Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

const DEMO_SCENE: &str = include_str!("../scenes/three_spheres.json");

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sphere references unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("camera {field} must be finite and positive, got {value}")]
    InvalidSetting { field: &'static str, value: f64 },
}

fn default_seed() -> u64 {
    42
}

/// Deserialized scene file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialSpec>,
    #[serde(default)]
    pub spheres: Vec<SphereSpec>,
}

/// Camera overrides; anything left out keeps the camera default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub aspect_ratio: Option<f64>,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub vfov: Option<f64>,
    pub lookfrom: Option<Point3>,
    pub lookat: Option<Point3>,
    pub vup: Option<Vec3>,
    pub defocus_angle: Option<f64>,
    pub focus_dist: Option<f64>,
}

impl CameraSettings {
    /// Reject values the camera cannot derive a bounded image from.
    pub fn validate(&self) -> Result<(), SceneError> {
        if let Some(value) = self.aspect_ratio {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidSetting {
                    field: "aspect_ratio",
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn apply(&self, camera: &mut Camera) {
        if let Some(v) = self.aspect_ratio {
            camera.aspect_ratio = v;
        }
        if let Some(v) = self.image_width {
            camera.image_width = v;
        }
        if let Some(v) = self.samples_per_pixel {
            camera.samples_per_pixel = v;
        }
        if let Some(v) = self.max_depth {
            camera.max_depth = v;
        }
        if let Some(v) = self.vfov {
            camera.vfov = v;
        }
        if let Some(v) = self.lookfrom {
            camera.lookfrom = v;
        }
        if let Some(v) = self.lookat {
            camera.lookat = v;
        }
        if let Some(v) = self.vup {
            camera.vup = v;
        }
        if let Some(v) = self.defocus_angle {
            camera.defocus_angle = v;
        }
        if let Some(v) = self.focus_dist {
            camera.focus_dist = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum MaterialSpec {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { refraction_index: f64 },
}

impl From<MaterialSpec> for Material {
    fn from(spec: MaterialSpec) -> Self {
        match spec {
            MaterialSpec::Lambertian { albedo } => Lambertian::new(albedo).into(),
            MaterialSpec::Metal { albedo, fuzz } => Metal::new(albedo, fuzz).into(),
            MaterialSpec::Dielectric { refraction_index } => Dielectric::new(refraction_index).into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereSpec {
    pub center: Point3,
    pub radius: f64,
    pub material: String,
}

/// A scene ready to render. The camera is not yet initialized, so callers
/// can still adjust it.
pub struct Scene {
    pub camera: Camera,
    pub seed: u64,
    pub world: HittableList,
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The built-in three-sphere scene.
    pub fn demo() -> Result<Self, SceneError> {
        Self::from_json(DEMO_SCENE)
    }

    /// Build the renderable scene. Each named material is instantiated once
    /// and shared by every sphere that names it.
    pub fn build(&self) -> Result<Scene, SceneError> {
        self.camera.validate()?;

        let materials: HashMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, spec)| (name.as_str(), Arc::new(Material::from(*spec))))
            .collect();

        let mut world = HittableList::new();
        for sphere in &self.spheres {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial(sphere.material.clone()))?;
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, Arc::clone(material))));
        }
        debug!("Built scene: {} materials, {} spheres", materials.len(), world.len());

        let mut camera = Camera::new();
        self.camera.apply(&mut camera);

        Ok(Scene {
            camera,
            seed: self.seed,
            world,
        })
    }
}

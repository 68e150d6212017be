//! Scene descriptions.
//!
//! A scene is a table of named materials plus an ordered list of objects
//! referring to them by name. Descriptions are plain serde types, read from
//! JSON:
//!
//! ```json
//! {
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] }
//!   },
//!   "objects": [
//!     { "type": "sphere", "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" }
//!   ]
//! }
//! ```
//!
//! Building a description shares each material between every object that
//! names it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::{Color, Cube, Lambertian, Material, Metal, Quad, SceneList, Sphere, Triangle};
use cubist_math::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
}

impl MaterialDesc {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        material: String,
    },
    Triangle {
        vertices: [Vec3; 3],
    },
    Quad {
        vertices: [Vec3; 4],
    },
    /// `top` and `bottom` list their corners in corresponding order.
    Cube {
        top: [Vec3; 4],
        bottom: [Vec3; 4],
        material: String,
    },
}

/// Serializable description of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let description = Self::from_json(&text)?;
        debug!(
            "Loaded scene {}: {} materials, {} objects",
            path.display(),
            description.materials.len(),
            description.objects.len()
        );
        Ok(description)
    }

    /// A ground plane with three spheres in front of the camera: diffuse in
    /// the middle, polished metal left, rough metal right.
    pub fn default_scene() -> Self {
        let materials = BTreeMap::from([
            (
                "ground".to_string(),
                MaterialDesc::Lambertian {
                    albedo: Color::new(0.8, 0.8, 0.0),
                },
            ),
            (
                "center".to_string(),
                MaterialDesc::Lambertian {
                    albedo: Color::new(0.7, 0.3, 0.3),
                },
            ),
            (
                "left".to_string(),
                MaterialDesc::Metal {
                    albedo: Color::new(0.8, 0.8, 0.8),
                    fuzz: 0.3,
                },
            ),
            (
                "right".to_string(),
                MaterialDesc::Metal {
                    albedo: Color::new(0.8, 0.6, 0.2),
                    fuzz: 1.0,
                },
            ),
        ]);

        let sphere = |center: Vec3, radius: f32, material: &str| ObjectDesc::Sphere {
            center,
            radius,
            material: material.to_string(),
        };

        let objects = vec![
            sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground"),
            sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "center"),
            sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "left"),
            sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "right"),
        ];

        Self { materials, objects }
    }

    /// Instantiate the geometry, sharing one material per name.
    pub fn build(&self) -> SceneResult<SceneList> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let lookup = |index: usize, name: &str| {
            materials
                .get(name)
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: name.to_string(),
                })
        };

        let mut scene = SceneList::new();
        for (index, object) in self.objects.iter().enumerate() {
            match object {
                ObjectDesc::Sphere {
                    center,
                    radius,
                    material,
                } => scene.add(Box::new(Sphere::new(
                    *center,
                    *radius,
                    lookup(index, material)?,
                ))),
                ObjectDesc::Triangle { vertices: [v0, v1, v2] } => {
                    scene.add(Box::new(Triangle::new(*v0, *v1, *v2)))
                }
                ObjectDesc::Quad {
                    vertices: [v0, v1, v2, v3],
                } => scene.add(Box::new(Quad::new(*v0, *v1, *v2, *v3))),
                ObjectDesc::Cube {
                    top,
                    bottom,
                    material,
                } => scene.add(Box::new(Cube::new(
                    Quad::new(top[0], top[1], top[2], top[3]),
                    Quad::new(bottom[0], bottom[1], bottom[2], bottom[3]),
                    lookup(index, material)?,
                ))),
            }
        }

        debug!(
            "Built scene with {} objects sharing {} materials",
            scene.len(),
            materials.len()
        );
        Ok(scene)
    }
}

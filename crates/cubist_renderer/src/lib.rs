//! Cubist renderer - CPU ray tracing.
//!
//! Casts jittered rays through a pinhole camera and resolves their color by
//! recursive hit testing and material scattering. Every object in the scene
//! is tested for every ray; there is no acceleration structure.
//!
//! ```no_run
//! use cubist_renderer::{render, save_image, RenderConfig, SceneDescription};
//!
//! let world = SceneDescription::default_scene().build()?;
//! let config = RenderConfig::default().with_width(400).with_seed(7);
//! let image = render(&config.camera(), &world, &config);
//! save_image("image.ppm", &image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod camera;
mod cube;
mod hittable;
mod material;
mod output;
mod quad;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use cube::Cube;
pub use hittable::{HitRecord, Hittable, SceneList};
pub use material::{reflect, Color, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use quad::Quad;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_parallel, render_pixel, row_rng,
    sky_gradient, ConfigError, ImageBuffer, RenderConfig, MAX_PIXELS,
};
pub use scene::{MaterialDesc, ObjectDesc, SceneDescription, SceneError, SceneResult};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types from cubist_math
pub use cubist_math::{Interval, Ray, Vec3};

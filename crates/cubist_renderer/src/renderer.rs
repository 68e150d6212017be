//! Core ray tracing renderer.
//!
//! Implements:
//! - Recursive ray shading bounded by a maximum depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and clamping at quantization
//! - Optional row-parallel rendering with rayon

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::sampling::gen_f32;
use crate::{Camera, Color, HitRecord, Hittable, Ray};
use cubist_math::Interval;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

/// Hits closer than this are self-intersections of a scattered ray.
const T_MIN: f32 = 0.001;

/// Errors in a render configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("aspect ratio must be a positive finite number, got {0}")]
    InvalidAspectRatio(f32),

    #[error("image of {width}x{height} exceeds the 8192x8192 pixel limit")]
    TooLarge { width: u32, height: u32 },
}

/// Largest accepted image, in pixels (8192 x 8192).
pub const MAX_PIXELS: u64 = 8192 * 8192;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels; the height follows from the aspect ratio
    pub image_width: u32,
    /// Width over height
    pub aspect_ratio: f32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; every scanline derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set image width.
    pub fn with_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Set aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Image height derived from width and aspect ratio, truncated, at
    /// least one row.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        let height = self.image_height();
        if u64::from(self.image_width) * u64::from(height) > MAX_PIXELS {
            return Err(ConfigError::TooLarge {
                width: self.image_width,
                height,
            });
        }
        Ok(())
    }

    /// Camera matching this configuration's aspect ratio.
    pub fn camera(&self) -> Camera {
        Camera::new(self.aspect_ratio)
    }
}

/// Compute the color seen by a ray.
///
/// Terminates in one of three ways: depth exhausted (black), absorbed by a
/// material (black), or escaped to the sky.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        return sky_gradient(ray);
    }

    match rec.material.and_then(|m| m.scatter(ray, &rec, rng)) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical white to sky-blue background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct, clamp and quantize a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `i` counts columns from the left, `j` counts rows from the bottom.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width_span = config.image_width.saturating_sub(1).max(1) as f32;
    let height_span = config.image_height().saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width_span;
        let v = (j as f32 + gen_f32(rng)) / height_span;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Linear colors, row-major, top scanline first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// One scanline.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Quantized 8-bit RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Generator for one scanline, derived from the base seed.
///
/// Rendering a row never depends on any other row's draws, so sequential
/// and parallel renders agree.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render scanline `y` (0 = top).
fn render_row(camera: &Camera, world: &dyn Hittable, config: &RenderConfig, y: u32) -> Vec<Color> {
    let height = config.image_height();
    let j = height - 1 - y;
    let mut rng = row_rng(config.seed, y);

    (0..config.image_width)
        .map(|i| render_pixel(camera, world, i, j, config, &mut rng))
        .collect()
}

/// Render the entire scene on the calling thread, top scanline first.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let width = config.image_width;
    let height = config.image_height();
    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        info!("Currently processing line: {}", y + 1);
        for (x, color) in render_row(camera, world, config, y).into_iter().enumerate() {
            image.set(x as u32, y, color);
        }
    }

    info!("Rendered {}x{} in {:?}", width, height, start.elapsed());
    image
}

/// Render with scanlines spread across the rayon thread pool.
///
/// Rows are assembled in order once all are done; the output matches
/// [`render`] for the same configuration.
pub fn render_parallel(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let width = config.image_width;
    let height = config.image_height();
    let start = Instant::now();
    let finished = AtomicU32::new(0);

    let rows: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let row = render_row(camera, world, config, y);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Finished line {} ({}/{})", y + 1, done, height);
            row
        })
        .collect();

    let image = ImageBuffer {
        width,
        height,
        pixels: rows.into_iter().flatten().collect(),
    };

    info!(
        "Rendered {}x{} on {} threads in {:?}",
        width,
        height,
        rayon::current_num_threads(),
        start.elapsed()
    );
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Metal, SceneList, Sphere, Triangle, Vec3};
    use std::sync::Arc;

    fn mirror_ball(albedo: Color) -> SceneList {
        let mut world = SceneList::new();
        world.add(Box::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Metal::new(albedo, 0.0)),
        )));
        world
    }

    #[test]
    fn test_sky_gradient() {
        // Ray pointing up should be more blue (less red than white)
        let up_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down_color - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let world = mirror_ball(Color::ONE);
        let mut rng = StdRng::seed_from_u64(42);

        // Both a hitting and a missing ray
        let at_ball = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(ray_color(&at_ball, &world, 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&away, &world, 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&away, &SceneList::new(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = SceneList::new();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, -1.0));

        assert_eq!(ray_color(&ray, &world, 50, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_attenuation_chains_into_reflection() {
        let albedo = Color::new(0.5, 0.25, 1.0);
        let world = mirror_ball(albedo);
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        // Bounces straight back along +z and escapes
        let expected = albedo * sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z));
        let color = ray_color(&ray, &world, 2, &mut rng);
        assert!((color - expected).length() < 1e-5);

        // One level short: the reflected ray runs out of depth
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_materialless_hit_is_black() {
        let mut world = SceneList::new();
        world.add(Box::new(Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )));
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 50, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb_clamps() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, -1.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_image_height_from_aspect_ratio() {
        let config = RenderConfig::default().with_width(20);
        assert_eq!(config.image_height(), 11);

        let square = config.clone().with_aspect_ratio(1.0);
        assert_eq!(square.image_height(), 20);

        let sliver = RenderConfig::default().with_width(1);
        assert_eq!(sliver.image_height(), 1);
    }

    #[test]
    fn test_validate() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
        assert_eq!(
            RenderConfig::default().with_width(0).validate(),
            Err(ConfigError::ZeroWidth)
        );
        assert_eq!(
            RenderConfig::default().with_quality(0, 50).validate(),
            Err(ConfigError::ZeroSamples)
        );
        assert_eq!(
            RenderConfig::default().with_quality(10, 0).validate(),
            Err(ConfigError::ZeroDepth)
        );
        assert_eq!(
            RenderConfig::default().with_aspect_ratio(-1.0).validate(),
            Err(ConfigError::InvalidAspectRatio(-1.0))
        );
    }

    #[test]
    fn test_validate_rejects_oversized_images() {
        // 100000 x 56250 at 16:9 would overflow a 32-bit pixel count
        assert_eq!(
            RenderConfig::default().with_width(100_000).validate(),
            Err(ConfigError::TooLarge {
                width: 100_000,
                height: 56_250,
            })
        );

        // A vanishing aspect ratio saturates the height
        let tall = RenderConfig::default().with_aspect_ratio(1e-6);
        assert!(matches!(
            tall.validate(),
            Err(ConfigError::TooLarge { width: 400, .. })
        ));

        let largest = RenderConfig::default()
            .with_width(8192)
            .with_aspect_ratio(1.0);
        assert_eq!(largest.validate(), Ok(()));
        assert!(matches!(
            largest.with_width(8193).validate(),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_image_buffer_wide_rows() {
        let mut image = ImageBuffer::new(70_000, 2);
        assert_eq!(image.pixels.len(), 140_000);

        image.set(69_999, 1, Color::ONE);
        assert_eq!(image.get(69_999, 1), Color::ONE);
        assert_eq!(image.row(1)[69_999], Color::ONE);
    }

    #[test]
    fn test_render_pixel_hits_center_sphere() {
        let mut world = SceneList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.0, 0.0, 0.0))),
        )));

        let config = RenderConfig::default()
            .with_width(11)
            .with_aspect_ratio(1.0)
            .with_quality(4, 5);
        let camera = config.camera();
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel sees the black sphere, corner pixel sees sky
        let center = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        let corner = render_pixel(&camera, &world, 0, 10, &config, &mut rng);
        assert_eq!(center, Color::ZERO);
        assert!(corner.length() > 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut world = mirror_ball(Color::new(0.8, 0.6, 0.2));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
        )));
        let config = RenderConfig::default()
            .with_width(16)
            .with_quality(3, 10)
            .with_seed(1234);
        let camera = config.camera();

        let sequential = render(&camera, &world, &config);
        let parallel = render_parallel(&camera, &world, &config);

        assert_eq!(sequential.width, 16);
        assert_eq!(sequential.height, 9);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut world = SceneList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3))),
        )));
        let config = RenderConfig::default().with_width(8).with_quality(2, 10);
        let camera = config.camera();

        let a = render(&camera, &world, &config.clone().with_seed(1));
        let b = render(&camera, &world, &config.clone().with_seed(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_image_buffer_rows() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.row(1)[2], Color::ONE);
        assert_eq!(image.row(0), &[Color::ZERO; 3]);
        assert_eq!(image.to_rgb8().len(), 18);
        assert_eq!(&image.to_rgb8()[15..], &[255, 255, 255]);
    }
}

//! Camera for ray generation.

use crate::Ray;
use cubist_math::Vec3;

pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 2.0;
pub const DEFAULT_FOCAL_LENGTH: f32 = 1.0;

/// Pinhole camera looking down -z.
///
/// The viewport is fixed at construction; `get_ray` maps normalized
/// coordinates `u, v` in [0, 1] linearly across it, with `v = 0` at the
/// bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Vec3,
}

impl Camera {
    /// Camera at the origin with the default viewport height and focal
    /// length.
    pub fn new(aspect_ratio: f32) -> Self {
        Self::with_viewport(
            Vec3::ZERO,
            aspect_ratio,
            DEFAULT_VIEWPORT_HEIGHT,
            DEFAULT_FOCAL_LENGTH,
        )
    }

    pub fn with_viewport(
        origin: Vec3,
        aspect_ratio: f32,
        viewport_height: f32,
        focal_length: f32,
    ) -> Self {
        let viewport_width = aspect_ratio * viewport_height;

        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin,
            horizontal,
            vertical,
            lower_left_corner,
        }
    }

    /// Ray from the camera origin through viewport point (u, v).
    #[inline]
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.lower_left_corner
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

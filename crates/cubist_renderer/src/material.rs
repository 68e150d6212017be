//! Material trait for surface scattering.

use crate::sampling::{random_in_unit_sphere, random_unit_vector};
use crate::{hittable::HitRecord, Ray};
use cubist_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Multiplies whatever light the scattered ray brings back
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are shared read-only between many objects and must not keep
/// state between calls.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if it is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzzed below the surface: absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ground_hit() -> HitRecord<'static> {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            front_face: true,
            material: None,
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let material = Lambertian::new(Color::new(0.8, 0.8, 0.0));
        let rec = ground_hit();
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, -1.0, -1.0));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let result = material
                .scatter(&ray_in, &rec, &mut rng)
                .expect("lambertian always scatters");
            assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.0));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert!(result.scattered.direction().length_squared() >= 1e-8);
        }
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let material = Metal::new(Color::new(0.8, 0.6, 0.2), 0.0);
        let rec = ground_hit();
        // Non-unit incoming direction: the reflection is of its unit vector
        let d = Vec3::new(2.0, -2.0, 0.0);
        let ray_in = Ray::new(Vec3::new(-2.0, 2.0, 0.0), d);
        let mut rng = StdRng::seed_from_u64(1);

        let result = material
            .scatter(&ray_in, &rec, &mut rng)
            .expect("mirror reflection above the surface");
        let expected = reflect(d.normalize(), rec.normal);

        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert!((result.scattered.direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(result.scattered.origin(), rec.p);
        assert_eq!(result.attenuation, Color::new(0.8, 0.6, 0.2));
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        let material = Metal::new(Color::ONE, 1.0);
        let rec = ground_hit();
        // Nearly grazing: the reflection barely clears the surface, so heavy
        // fuzz pushes some samples below it.
        let ray_in = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let mut rng = StdRng::seed_from_u64(9);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray_in, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }
}

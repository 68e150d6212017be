//! Six-faced box built from a top and a bottom quad.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Quad, Ray,
};
use cubist_math::{Interval, Vec3};

/// A box whose side faces pair up corresponding vertices of `top` and
/// `bottom`, so both quads must list their corners in the same order.
///
/// All six faces share the cube's material.
pub struct Cube {
    top: Quad,
    bottom: Quad,
    material: Arc<dyn Material>,
}

impl Cube {
    pub fn new(top: Quad, bottom: Quad, material: Arc<dyn Material>) -> Self {
        Self {
            top,
            bottom,
            material,
        }
    }

    /// Axis-aligned cube of side `edge` whose bottom face starts at
    /// `bottom_left` and recedes along -z.
    pub fn axis_aligned(bottom_left: Vec3, edge: f32, material: Arc<dyn Material>) -> Self {
        let bottom = Quad::square(bottom_left, edge, true);
        let top = Quad::square(bottom_left + Vec3::new(0.0, edge, 0.0), edge, true);
        Self::new(top, bottom, material)
    }

    /// Top, bottom, front, back, right, left.
    pub fn faces(&self) -> [Quad; 6] {
        let (t, b) = (&self.top, &self.bottom);
        [
            self.top,
            self.bottom,
            Quad::new(b.v0(), b.v1(), t.v1(), t.v0()),
            Quad::new(b.v3(), b.v2(), t.v2(), t.v3()),
            Quad::new(b.v1(), b.v2(), t.v2(), t.v1()),
            Quad::new(b.v3(), b.v0(), t.v0(), t.v3()),
        ]
    }
}

impl Hittable for Cube {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for face in self.faces() {
            let mut face_rec = HitRecord::default();
            if face.hit(ray, ray_t.with_max(closest_so_far), &mut face_rec) {
                hit_anything = true;
                closest_so_far = face_rec.t;
                rec.take_surface(&face_rec);
            }
        }

        if hit_anything {
            rec.material = Some(self.material.as_ref());
        }

        hit_anything
    }
}

//! Planar quadrilateral, tested as two triangles.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray, Triangle,
};
use cubist_math::{Interval, Vec3};

/// Four coplanar vertices in winding order `v0 -> v1 -> v2 -> v3`.
///
/// Carries no material of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    vertices: [Vec3; 4],
}

impl Quad {
    /// Create a quad from bottom-left, bottom-right, top-right, top-left.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
        }
    }

    /// Axis-aligned square with its first corner at `bottom_left`.
    ///
    /// A square `laid_flat` lies in the XZ plane and recedes along -z;
    /// otherwise it stands upright in the XY plane.
    pub fn square(bottom_left: Vec3, edge: f32, laid_flat: bool) -> Self {
        let (top_y, top_z) = if laid_flat {
            (bottom_left.y, bottom_left.z - edge)
        } else {
            (bottom_left.y + edge, bottom_left.z)
        };

        Self::new(
            bottom_left,
            Vec3::new(bottom_left.x + edge, bottom_left.y, bottom_left.z),
            Vec3::new(bottom_left.x + edge, top_y, top_z),
            Vec3::new(bottom_left.x, top_y, top_z),
        )
    }

    pub fn vertices(&self) -> [Vec3; 4] {
        self.vertices
    }

    #[inline]
    pub fn v0(&self) -> Vec3 {
        self.vertices[0]
    }

    #[inline]
    pub fn v1(&self) -> Vec3 {
        self.vertices[1]
    }

    #[inline]
    pub fn v2(&self) -> Vec3 {
        self.vertices[2]
    }

    #[inline]
    pub fn v3(&self) -> Vec3 {
        self.vertices[3]
    }

    /// Split along the v1-v3 diagonal.
    ///
    /// Both halves keep the quad's winding so they share its plane normal.
    pub fn triangulate(&self) -> [Triangle; 2] {
        let [v0, v1, v2, v3] = self.vertices;
        [Triangle::new(v0, v1, v3), Triangle::new(v2, v3, v1)]
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        // Rebuilt per test; a ray on the shared diagonal hits both halves.
        for triangle in self.triangulate() {
            let mut tri_rec = HitRecord::default();
            if triangle.hit(ray, ray_t.with_max(closest_so_far), &mut tri_rec) {
                hit_anything = true;
                closest_so_far = tri_rec.t;
                rec.take_surface(&tri_rec);
            }
        }

        hit_anything
    }
}

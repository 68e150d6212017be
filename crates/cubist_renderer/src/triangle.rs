//! Triangle primitive for ray tracing.
//!
//! Intersects the ray with the triangle's plane, then runs an edge-function
//! inside/outside test against each of the three edges. Vertices must be
//! wound consistently: the test compares every edge against the plane normal
//! `(v1 - v0) x (v2 - v0)`.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use cubist_math::{Interval, Vec3};

/// Below this |N . d| the ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-3;

/// A triangle primitive. Carries no material of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    /// Unnormalized plane normal from the cross product of two edges.
    #[inline]
    pub fn plane_normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0)
    }

    pub fn centroid(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v0 + v1 + v2) / 3.0
    }
}

/// True when `p` lies on the interior side of the edge `a -> b`.
#[inline]
fn inside_edge(n: Vec3, a: Vec3, b: Vec3, p: Vec3) -> bool {
    n.dot((b - a).cross(p - a)) >= 0.0
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let [v0, v1, v2] = self.vertices;
        let n = self.plane_normal();

        let n_dot_dir = n.dot(ray.direction());
        if n_dot_dir.abs() < PARALLEL_EPSILON {
            return false;
        }

        // Plane: n . x + d = 0
        let d = -n.dot(v0);
        let t = -(n.dot(ray.origin()) + d) / n_dot_dir;

        if t < 0.0 || !ray_t.contains(t) {
            return false;
        }

        let p = ray.at(t);

        if !inside_edge(n, v0, v1, p) || !inside_edge(n, v1, v2, p) || !inside_edge(n, v2, v0, p)
        {
            return false;
        }

        rec.t = t;
        rec.p = p;
        rec.set_face_normal(ray, n.normalize());
        rec.material = None;

        true
    }
}

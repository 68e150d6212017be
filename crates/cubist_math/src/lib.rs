//! Cubist math - value types shared by the renderer.
//!
//! Vectors come straight from glam; this crate adds the ray and the
//! parameter window used by intersection tests.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

//! Geometric primitives and the intersection tests between them.

use nalgebra::Vector3;

use crate::float_types::Real;

pub mod aabb;
pub mod intersects;
pub mod ray;
pub mod sphere;
pub mod triangle;

pub use aabb::Aabb;
pub use intersects::{
    IntersectsAabb, IntersectsPoint, IntersectsRay, IntersectsSphere, IntersectsTriangle, Query,
    Shape,
};
pub use ray::Ray;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Angle in radians between two vectors. The cosine is clamped into
/// [-1, 1] so that rounding on near-parallel inputs cannot produce NaN.
pub fn angle_between(u: &Vector3<Real>, v: &Vector3<Real>) -> Real {
    let arg = u.dot(v) / (u.norm() * v.norm());
    arg.clamp(-1.0, 1.0).acos()
}

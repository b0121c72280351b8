use nalgebra::Point3;

use crate::float_types::Real;
use crate::geometry::Aabb;

/// Sphere with a non-negative radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Point3<Real>,
    pub radius: Real,
}

impl Sphere {
    pub fn new(center: Point3<Real>, radius: Real) -> Self {
        Self { center, radius }
    }

    /// Squared distance from the center to the closed box compared
    /// against r². Only axes where the center lies outside the box
    /// contribute.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let min = aabb.min();
        let max = aabb.max();
        let mut distance = 0.0;

        for i in 0..3 {
            if self.center[i] < min[i] {
                let t = self.center[i] - min[i];
                distance += t * t;
            } else if self.center[i] > max[i] {
                let t = self.center[i] - max[i];
                distance += t * t;
            }
        }

        distance <= self.radius * self.radius
    }

    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }
}

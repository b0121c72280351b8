use nalgebra::{Point3, Vector3};

use crate::float_types::{Real, EPSILON};
use crate::geometry::{Aabb, Triangle};

/// Ray with an origin and a direction.
///
/// The direction need not be a unit vector and may contain zero
/// components: the slab test works through the componentwise
/// reciprocal and tolerates the resulting infinities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<Real>,
    pub direction: Vector3<Real>,
}

impl Ray {
    pub fn new(origin: Point3<Real>, direction: Vector3<Real>) -> Self {
        Self { origin, direction }
    }

    /// Slab test (Williams et al.). `Real::min`/`Real::max` discard a
    /// NaN operand, so a 0·∞ product from a zero direction component
    /// cannot poison the running interval.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let inv = self.direction.map(Real::recip);
        let min = aabb.min();
        let max = aabb.max();

        let t0 = (min.x - self.origin.x) * inv.x;
        let t1 = (max.x - self.origin.x) * inv.x;
        let mut t_min = t0.min(t1);
        let mut t_max = t0.max(t1);

        let t0 = (min.y - self.origin.y) * inv.y;
        let t1 = (max.y - self.origin.y) * inv.y;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));

        let t0 = (min.z - self.origin.z) * inv.z;
        let t1 = (max.z - self.origin.z) * inv.z;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));

        t_max >= t_min.max(0.0)
    }

    /// Möller-Trumbore with back-face culling: only the face on the
    /// winding-normal side of the triangle reports a hit, and a ray
    /// parallel to the triangle plane reports a miss.
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let e0 = triangle[1] - triangle[0];
        let e1 = triangle[2] - triangle[0];

        let p = self.direction.cross(&e1);
        let det = e0.dot(&p);

        if det < EPSILON {
            return false;
        }

        let inv_det = det.recip();
        let s = self.origin - triangle[0];
        let u = inv_det * s.dot(&p);

        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(&e0);
        let v = inv_det * self.direction.dot(&q);

        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        inv_det * e1.dot(&q) > EPSILON
    }
}

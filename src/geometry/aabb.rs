use nalgebra::{Point3, Vector3};

use crate::float_types::Real;
use crate::geometry::Sphere;

/// Axis-aligned bounding box stored as a center and half-size.
///
/// The center/half-size form keeps octant subdivision and buffering a
/// pair of componentwise operations; the min/max corners are derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Point3<Real>,
    pub half_size: Vector3<Real>,
}

impl Aabb {
    pub fn new(center: Point3<Real>, half_size: Vector3<Real>) -> Self {
        Self { center, half_size }
    }

    /// Smallest box containing every point of the iterator. An empty
    /// input yields the degenerate box at the origin with zero
    /// half-size.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<Real>>) -> Self {
        let mut min = Vector3::repeat(Real::INFINITY);
        let mut max = Vector3::repeat(Real::NEG_INFINITY);
        let mut empty = true;

        for point in points {
            min = min.inf(&point.coords);
            max = max.sup(&point.coords);
            empty = false;
        }

        if empty {
            return Self::new(Point3::origin(), Vector3::zeros());
        }

        Self::new(Point3::from((max + min) * 0.5), (max - min) * 0.5)
    }

    /// Minimum corner.
    pub fn min(&self) -> Point3<Real> {
        self.center - self.half_size
    }

    /// Maximum corner.
    pub fn max(&self) -> Point3<Real> {
        self.center + self.half_size
    }

    /// Box with the half-size enlarged componentwise by `r`.
    pub fn buffer(&self, r: Real) -> Self {
        Self::new(self.center, self.half_size.add_scalar(r))
    }

    /// Child box for octant `k` in [0, 8): the half-size is halved and
    /// the center shifted per axis, with bit 2 selecting +x, bit 1 +y,
    /// and bit 0 +z.
    pub fn octant(&self, k: usize) -> Self {
        let half_size = self.half_size * 0.5;
        let mut center = self.center;

        for axis in 0..3 {
            if k & (4 >> axis) != 0 {
                center[axis] += half_size[axis];
            } else {
                center[axis] -= half_size[axis];
            }
        }

        Self::new(center, half_size)
    }

    /// Closed-interval overlap test: the projection intervals on all
    /// three axes must overlap.
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        (0..3).all(|i| a_min[i] <= b_max[i] && a_max[i] >= b_min[i])
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_aabb(self)
    }

    /// Closed-interval containment test.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        let (min, max) = (self.min(), self.max());

        (0..3).all(|i| point[i] >= min[i] && point[i] <= max[i])
    }
}

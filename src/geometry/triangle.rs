use std::ops::Index;

use nalgebra::{Point3, Vector3};

use crate::float_types::Real;
use crate::geometry::{Aabb, Ray};

/// Triangle over three points in counter-clockwise winding order; the
/// winding defines the outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle([Point3<Real>; 3]);

impl Triangle {
    pub fn new(p: Point3<Real>, q: Point3<Real>, r: Point3<Real>) -> Self {
        Self([p, q, r])
    }

    /// Winding normal (Q−P)×(R−P), not necessarily unit length.
    pub fn normal(&self) -> Vector3<Real> {
        (self.0[1] - self.0[0]).cross(&(self.0[2] - self.0[0]))
    }

    pub fn unit_normal(&self) -> Vector3<Real> {
        self.normal().normalize()
    }

    pub fn area(&self) -> Real {
        0.5 * self.normal().norm()
    }

    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        ray.intersects_triangle(self)
    }

    /// Separating axis test after Akenine-Möller. Thirteen candidate
    /// axes: the nine edge/box-axis cross products, the three box axes,
    /// and the triangle plane normal. No separating axis means overlap.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let h = aabb.half_size;

        // Move the box to the origin.
        let v0 = self.0[0] - aabb.center;
        let v1 = self.0[1] - aabb.center;
        let v2 = self.0[2] - aabb.center;

        let e0 = v1 - v0;
        let e1 = v2 - v1;
        let e2 = v0 - v2;

        // Edge e0: axes X01, Y02, Z12.
        let fe = e0.abs();
        if axis_separates(
            e0.z * v0.y - e0.y * v0.z,
            e0.z * v2.y - e0.y * v2.z,
            fe.z * h.y + fe.y * h.z,
        ) || axis_separates(
            -e0.z * v0.x + e0.x * v0.z,
            -e0.z * v2.x + e0.x * v2.z,
            fe.z * h.x + fe.x * h.z,
        ) || axis_separates(
            e0.y * v1.x - e0.x * v1.y,
            e0.y * v2.x - e0.x * v2.y,
            fe.y * h.x + fe.x * h.y,
        ) {
            return false;
        }

        // Edge e1: axes X01, Y02, Z0.
        let fe = e1.abs();
        if axis_separates(
            e1.z * v0.y - e1.y * v0.z,
            e1.z * v2.y - e1.y * v2.z,
            fe.z * h.y + fe.y * h.z,
        ) || axis_separates(
            -e1.z * v0.x + e1.x * v0.z,
            -e1.z * v2.x + e1.x * v2.z,
            fe.z * h.x + fe.x * h.z,
        ) || axis_separates(
            e1.y * v0.x - e1.x * v0.y,
            e1.y * v1.x - e1.x * v1.y,
            fe.y * h.x + fe.x * h.y,
        ) {
            return false;
        }

        // Edge e2: axes X2, Y1, Z12.
        let fe = e2.abs();
        if axis_separates(
            e2.z * v0.y - e2.y * v0.z,
            e2.z * v1.y - e2.y * v1.z,
            fe.z * h.y + fe.y * h.z,
        ) || axis_separates(
            -e2.z * v0.x + e2.x * v0.z,
            -e2.z * v1.x + e2.x * v1.z,
            fe.z * h.x + fe.x * h.z,
        ) || axis_separates(
            e2.y * v1.x - e2.x * v1.y,
            e2.y * v2.x - e2.x * v2.y,
            fe.y * h.x + fe.x * h.y,
        ) {
            return false;
        }

        // Box axes: the triangle's extent against the half-size.
        for i in 0..3 {
            let min = v0[i].min(v1[i]).min(v2[i]);
            let max = v0[i].max(v1[i]).max(v2[i]);

            if min > h[i] || max < -h[i] {
                return false;
            }
        }

        // Triangle plane against the box.
        !plane_separates(&e0.cross(&e1), &v0, &h)
    }
}

impl Index<usize> for Triangle {
    type Output = Point3<Real>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Whether the projection interval of two triangle vertices lies
/// entirely outside the box radius on a candidate axis.
fn axis_separates(p: Real, q: Real, radius: Real) -> bool {
    p.min(q) > radius || p.max(q) < -radius
}

/// Whether the plane through `vert` with the given normal misses the
/// origin-centered box of the given half-size.
fn plane_separates(normal: &Vector3<Real>, vert: &Vector3<Real>, half: &Vector3<Real>) -> bool {
    let mut v_min = Vector3::zeros();
    let mut v_max = Vector3::zeros();

    for i in 0..3 {
        if normal[i] > 0.0 {
            v_min[i] = -half[i] - vert[i];
            v_max[i] = half[i] - vert[i];
        } else {
            v_min[i] = half[i] - vert[i];
            v_max[i] = -half[i] - vert[i];
        }
    }

    if normal.dot(&v_min) > 0.0 {
        return true;
    }

    normal.dot(&v_max) < 0.0
}

//! Intersection capabilities and the runtime dispatch between them.
//!
//! Spatial indexes store heterogeneous items and answer heterogeneous
//! queries, but every shape involved is known statically. Items and
//! queries are therefore closed tagged unions rather than trait
//! objects, keeping the hot box-overlap path free of virtual dispatch,
//! and the query/item refinement is one exhaustive match.

use nalgebra::Point3;

use crate::float_types::Real;
use crate::geometry::{Aabb, Ray, Sphere, Triangle};

/// Capability of being tested against an axis-aligned box. Everything
/// a spatial index stores or answers implements this; node traversal
/// is expressed entirely in terms of it.
pub trait IntersectsAabb {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool;
}

/// Capability of being tested against a ray.
pub trait IntersectsRay {
    fn intersects_ray(&self, ray: &Ray) -> bool;
}

/// Capability of being tested against a triangle.
pub trait IntersectsTriangle {
    fn intersects_triangle(&self, triangle: &Triangle) -> bool;
}

/// Capability of being tested against a sphere.
pub trait IntersectsSphere {
    fn intersects_sphere(&self, sphere: &Sphere) -> bool;
}

/// Capability of being tested against a single point.
pub trait IntersectsPoint {
    fn intersects_point(&self, point: &Point3<Real>) -> bool;
}

impl IntersectsAabb for Aabb {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        Aabb::intersects_aabb(self, aabb)
    }
}

impl IntersectsRay for Aabb {
    fn intersects_ray(&self, ray: &Ray) -> bool {
        ray.intersects_aabb(self)
    }
}

impl IntersectsTriangle for Aabb {
    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        triangle.intersects_aabb(self)
    }
}

impl IntersectsSphere for Aabb {
    fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_aabb(self)
    }
}

impl IntersectsPoint for Aabb {
    fn intersects_point(&self, point: &Point3<Real>) -> bool {
        self.contains_point(point)
    }
}

impl IntersectsAabb for Triangle {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        Triangle::intersects_aabb(self, aabb)
    }
}

impl IntersectsRay for Triangle {
    fn intersects_ray(&self, ray: &Ray) -> bool {
        ray.intersects_triangle(self)
    }
}

impl IntersectsAabb for Sphere {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        Sphere::intersects_aabb(self, aabb)
    }
}

impl IntersectsPoint for Sphere {
    fn intersects_point(&self, point: &Point3<Real>) -> bool {
        self.contains_point(point)
    }
}

impl IntersectsAabb for Point3<Real> {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        aabb.contains_point(self)
    }
}

impl IntersectsSphere for Point3<Real> {
    fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.contains_point(self)
    }
}

/// An indexable item: the closed set of shapes a spatial index stores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Point(Point3<Real>),
    Aabb(Aabb),
    Sphere(Sphere),
    Triangle(Triangle),
}

impl IntersectsAabb for Shape {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        match self {
            Shape::Point(point) => aabb.contains_point(point),
            Shape::Aabb(other) => other.intersects_aabb(aabb),
            Shape::Sphere(sphere) => sphere.intersects_aabb(aabb),
            Shape::Triangle(triangle) => triangle.intersects_aabb(aabb),
        }
    }
}

impl From<Point3<Real>> for Shape {
    fn from(point: Point3<Real>) -> Self {
        Shape::Point(point)
    }
}

impl From<Aabb> for Shape {
    fn from(aabb: Aabb) -> Self {
        Shape::Aabb(aabb)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// A query shape: drives both the node traversal (by box overlap) and
/// the per-item refinement test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Query {
    Aabb(Aabb),
    Ray(Ray),
    Triangle(Triangle),
    Sphere(Sphere),
    Point(Point3<Real>),
}

impl IntersectsAabb for Query {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        match self {
            Query::Aabb(other) => other.intersects_aabb(aabb),
            Query::Ray(ray) => ray.intersects_aabb(aabb),
            Query::Triangle(triangle) => triangle.intersects_aabb(aabb),
            Query::Sphere(sphere) => sphere.intersects_aabb(aabb),
            Query::Point(point) => aabb.contains_point(point),
        }
    }
}

impl Query {
    /// Refinement test between this query and a candidate item. Pairs
    /// with an exact test use it; the remaining pairs are accepted
    /// conservatively on the strength of the node-level box overlap
    /// that produced the candidate.
    pub fn matches(&self, item: &Shape) -> bool {
        match (self, item) {
            (Query::Aabb(aabb), item) => item.intersects_aabb(aabb),

            (Query::Ray(ray), Shape::Triangle(triangle)) => triangle.intersects_ray(ray),
            (Query::Ray(ray), Shape::Aabb(aabb)) => ray.intersects_aabb(aabb),
            (Query::Ray(_), _) => true,

            (Query::Triangle(triangle), Shape::Aabb(aabb)) => triangle.intersects_aabb(aabb),
            (Query::Triangle(_), _) => true,

            (Query::Sphere(sphere), Shape::Point(point)) => sphere.contains_point(point),
            (Query::Sphere(sphere), Shape::Aabb(aabb)) => sphere.intersects_aabb(aabb),
            (Query::Sphere(_), _) => true,

            (Query::Point(point), Shape::Aabb(aabb)) => aabb.contains_point(point),
            (Query::Point(point), Shape::Sphere(sphere)) => sphere.contains_point(point),
            (Query::Point(_), _) => true,
        }
    }
}

impl From<Point3<Real>> for Query {
    fn from(point: Point3<Real>) -> Self {
        Query::Point(point)
    }
}

impl From<Aabb> for Query {
    fn from(aabb: Aabb) -> Self {
        Query::Aabb(aabb)
    }
}

impl From<Ray> for Query {
    fn from(ray: Ray) -> Self {
        Query::Ray(ray)
    }
}

impl From<Sphere> for Query {
    fn from(sphere: Sphere) -> Self {
        Query::Sphere(sphere)
    }
}

impl From<Triangle> for Query {
    fn from(triangle: Triangle) -> Self {
        Query::Triangle(triangle)
    }
}

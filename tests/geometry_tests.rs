use approx::assert_relative_eq;
use meshtk::float_types::EPSILON;
use meshtk::geometry::{Aabb, Ray, Sphere, Triangle};
use nalgebra::{Point3, Vector3};

fn unit_box() -> Aabb {
    Aabb::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.5, 0.5, 0.5))
}

#[test]
fn aabb_min_max() {
    let aabb = Aabb::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 1.0, 1.5));

    assert_eq!(aabb.min(), Point3::new(0.5, 1.0, 1.5));
    assert_eq!(aabb.max(), Point3::new(1.5, 3.0, 4.5));
}

#[test]
fn aabb_buffer() {
    let aabb = unit_box().buffer(0.25);

    assert_eq!(aabb.center, Point3::new(0.5, 0.5, 0.5));
    assert_eq!(aabb.half_size, Vector3::new(0.75, 0.75, 0.75));
}

#[test]
fn aabb_octants() {
    let aabb = Aabb::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0));

    assert_eq!(aabb.octant(0).center, Point3::new(0.5, 0.5, 0.5));
    assert_eq!(aabb.octant(4).center, Point3::new(1.5, 0.5, 0.5));
    assert_eq!(aabb.octant(2).center, Point3::new(0.5, 1.5, 0.5));
    assert_eq!(aabb.octant(1).center, Point3::new(0.5, 0.5, 1.5));
    assert_eq!(aabb.octant(7).center, Point3::new(1.5, 1.5, 1.5));
    assert_eq!(aabb.octant(7).half_size, Vector3::new(0.5, 0.5, 0.5));
}

#[test]
fn aabb_intersects_aabb() {
    let a = unit_box();
    let b = Aabb::new(Point3::new(1.25, 0.5, 0.5), Vector3::new(0.5, 0.5, 0.5));
    let c = Aabb::new(Point3::new(2.5, 0.5, 0.5), Vector3::new(0.5, 0.5, 0.5));

    assert!(a.intersects_aabb(&b));
    assert!(b.intersects_aabb(&a));
    assert!(!a.intersects_aabb(&c));
}

#[test]
fn aabb_intersects_aabb_touching_faces() {
    let a = unit_box();
    let b = Aabb::new(Point3::new(1.5, 0.5, 0.5), Vector3::new(0.5, 0.5, 0.5));

    assert!(a.intersects_aabb(&b));
}

#[test]
fn aabb_contains_point_closed_interval() {
    let aabb = unit_box();

    assert!(aabb.contains_point(&Point3::new(0.5, 0.5, 0.5)));
    assert!(aabb.contains_point(&Point3::new(1.0, 1.0, 1.0)));
    assert!(aabb.contains_point(&Point3::new(0.0, 0.0, 0.0)));
    assert!(!aabb.contains_point(&Point3::new(1.0 + 1e-12, 0.5, 0.5)));
}

#[test]
fn ray_intersects_aabb_axis_aligned_direction() {
    // A zero direction component must not break the slab arithmetic.
    let ray = Ray::new(Point3::new(-1.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));

    assert!(ray.intersects_aabb(&unit_box()));
}

#[test]
fn ray_intersects_aabb_along_box_axis() {
    let aabb = Aabb::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
    let ray = Ray::new(Point3::new(-2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));

    assert!(ray.intersects_aabb(&aabb));
}

#[test]
fn ray_intersects_aabb_miss_behind_origin() {
    let ray = Ray::new(Point3::new(-1.0, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0));

    assert!(!ray.intersects_aabb(&unit_box()));
}

#[test]
fn ray_intersects_aabb_miss_parallel_slab() {
    let ray = Ray::new(Point3::new(-1.0, 2.0, 0.5), Vector3::new(1.0, 0.0, 0.0));

    assert!(!ray.intersects_aabb(&unit_box()));
}

#[test]
fn ray_intersects_aabb_origin_inside() {
    let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.3, -0.2, 0.9));

    assert!(ray.intersects_aabb(&unit_box()));
}

#[test]
fn ray_intersects_aabb_diagonal() {
    let ray = Ray::new(Point3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

    assert!(ray.intersects_aabb(&unit_box()));
}

#[test]
fn ray_intersects_triangle_front_face() {
    let ray = Ray::new(Point3::new(0.5, 0.5, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
    );

    assert!(ray.intersects_triangle(&triangle));
}

#[test]
fn ray_intersects_triangle_back_face_culled() {
    let ray = Ray::new(Point3::new(0.5, 0.5, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    );

    assert!(!ray.intersects_triangle(&triangle));
}

#[test]
fn ray_intersects_triangle_parallel_miss() {
    let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
    );

    assert!(!ray.intersects_triangle(&triangle));
}

#[test]
fn ray_intersects_triangle_outside_edges() {
    let ray = Ray::new(Point3::new(2.0, 2.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
    );

    assert!(!ray.intersects_triangle(&triangle));
}

#[test]
fn triangle_normal_and_area() {
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    );

    assert_relative_eq!(triangle.normal(), Vector3::new(0.0, 0.0, 1.0));
    assert_relative_eq!(triangle.area(), 0.5 * triangle.normal().norm());
    assert_relative_eq!(triangle.unit_normal().norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn triangle_intersects_aabb_contained() {
    let triangle = Triangle::new(
        Point3::new(0.1, 0.1, 0.1),
        Point3::new(0.1, 0.1, 0.3),
        Point3::new(0.1, 0.3, 0.1),
    );

    assert!(triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_cross_face() {
    let triangle = Triangle::new(
        Point3::new(0.5, 0.5, 0.5),
        Point3::new(1.25, 1.75, 0.5),
        Point3::new(1.25, 0.25, 0.5),
    );

    assert!(triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_cross_edge() {
    let triangle = Triangle::new(
        Point3::new(0.25, -0.25, 0.5),
        Point3::new(1.25, 0.75, 0.5),
        Point3::new(1.25, -0.25, 0.5),
    );

    assert!(triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_cross_full() {
    let triangle = Triangle::new(
        Point3::new(-2.0, -1.0, 0.5),
        Point3::new(1.5, 3.0, 0.5),
        Point3::new(1.5, -1.0, 0.5),
    );

    assert!(triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_coplanar_with_face() {
    let triangle = Triangle::new(
        Point3::new(0.2, 0.2, 1.0),
        Point3::new(0.8, 0.2, 1.0),
        Point3::new(0.2, 0.8, 1.0),
    );

    assert!(triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_beyond_box() {
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 2.0),
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(1.0, 1.0, 2.0),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_plane() {
    let triangle = Triangle::new(
        Point3::new(1.1, 1.1, 0.9),
        Point3::new(0.5, 0.8, 1.5),
        Point3::new(0.9, 1.1, 0.9),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e0_x01() {
    let triangle = Triangle::new(
        Point3::new(0.5, 1.1, 0.9),
        Point3::new(0.5, 0.8, 1.5),
        Point3::new(0.5, 1.3, 1.2),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e0_y02() {
    let triangle = Triangle::new(
        Point3::new(1.1, 0.5, 0.9),
        Point3::new(0.8, 0.5, 1.5),
        Point3::new(1.3, 0.5, 1.2),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e0_z12() {
    let triangle = Triangle::new(
        Point3::new(1.1, 0.9, 0.5),
        Point3::new(0.8, 1.5, 0.5),
        Point3::new(1.3, 1.2, 0.5),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e1_x01() {
    let triangle = Triangle::new(
        Point3::new(0.5, 1.3, 1.2),
        Point3::new(0.5, 1.1, 0.9),
        Point3::new(0.5, 0.8, 1.5),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e1_y02() {
    let triangle = Triangle::new(
        Point3::new(1.3, 0.5, 1.2),
        Point3::new(1.1, 0.5, 0.9),
        Point3::new(0.8, 0.5, 1.5),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e1_z0() {
    let triangle = Triangle::new(
        Point3::new(1.3, 1.2, 0.5),
        Point3::new(1.1, 0.9, 0.5),
        Point3::new(0.8, 1.5, 0.5),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e2_x2() {
    let triangle = Triangle::new(
        Point3::new(0.5, 0.8, 1.5),
        Point3::new(0.5, 1.3, 1.2),
        Point3::new(0.5, 1.1, 0.9),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e2_y1() {
    let triangle = Triangle::new(
        Point3::new(0.8, 0.5, 1.5),
        Point3::new(1.3, 0.5, 1.2),
        Point3::new(1.1, 0.5, 0.9),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn triangle_intersects_aabb_miss_e2_z12() {
    let triangle = Triangle::new(
        Point3::new(0.8, 1.5, 0.5),
        Point3::new(1.3, 1.2, 0.5),
        Point3::new(1.1, 0.9, 0.5),
    );

    assert!(!triangle.intersects_aabb(&unit_box()));
}

#[test]
fn sphere_intersects_aabb() {
    let aabb = unit_box();

    assert!(Sphere::new(Point3::new(0.5, 0.5, 0.5), 0.1).intersects_aabb(&aabb));
    assert!(Sphere::new(Point3::new(1.5, 0.5, 0.5), 0.5).intersects_aabb(&aabb));
    assert!(!Sphere::new(Point3::new(2.0, 0.5, 0.5), 0.5).intersects_aabb(&aabb));
    assert!(!Sphere::new(Point3::new(2.0, 2.0, 2.0), 1.0).intersects_aabb(&aabb));
}

#[test]
fn sphere_contains_point() {
    let sphere = Sphere::new(Point3::new(1.0, 1.0, 1.0), 0.5);

    assert!(sphere.contains_point(&Point3::new(1.0, 1.0, 1.0)));
    assert!(sphere.contains_point(&Point3::new(1.5, 1.0, 1.0)));
    assert!(!sphere.contains_point(&Point3::new(1.5 + EPSILON, 1.0, 1.0)));
}

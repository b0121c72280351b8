#![allow(dead_code)]

use meshtk::surface::{HalfEdgeMesh, PolygonSoup};
use nalgebra::Point3;

/// Unit cube centered at the origin: 8 vertices, 12 triangles, closed
/// and consistently oriented.
pub const BOX_OBJ: &str = "\
v -0.5 -0.5 -0.5
v -0.5 -0.5 0.5
v -0.5 0.5 -0.5
v -0.5 0.5 0.5
v 0.5 -0.5 -0.5
v 0.5 -0.5 0.5
v 0.5 0.5 -0.5
v 0.5 0.5 0.5
f 1 2 3
f 2 4 3
f 5 7 6
f 7 8 6
f 1 5 2
f 5 6 2
f 3 4 7
f 4 8 7
f 1 3 5
f 3 7 5
f 2 6 4
f 6 8 4
";

/// The same cube with one face (index 10) wound backwards.
pub const BOX_INCONSISTENT_OBJ: &str = "\
v -0.5 -0.5 -0.5
v -0.5 -0.5 0.5
v -0.5 0.5 -0.5
v -0.5 0.5 0.5
v 0.5 -0.5 -0.5
v 0.5 -0.5 0.5
v 0.5 0.5 -0.5
v 0.5 0.5 0.5
f 1 2 3
f 2 4 3
f 5 7 6
f 7 8 6
f 1 5 2
f 5 6 2
f 3 4 7
f 4 8 7
f 1 3 5
f 3 7 5
f 4 6 2
f 6 8 4
";

/// The cube with the last face removed, leaving a triangular hole.
pub const BOX_OPEN_OBJ: &str = "\
v -0.5 -0.5 -0.5
v -0.5 -0.5 0.5
v -0.5 0.5 -0.5
v -0.5 0.5 0.5
v 0.5 -0.5 -0.5
v 0.5 -0.5 0.5
v 0.5 0.5 -0.5
v 0.5 0.5 0.5
f 1 2 3
f 2 4 3
f 5 7 6
f 7 8 6
f 1 5 2
f 5 6 2
f 3 4 7
f 4 8 7
f 1 3 5
f 3 7 5
f 2 6 4
";

/// The cube with each side in its own named group.
pub const BOX_GROUPS_OBJ: &str = "\
v -0.5 -0.5 -0.5
v -0.5 -0.5 0.5
v -0.5 0.5 -0.5
v -0.5 0.5 0.5
v 0.5 -0.5 -0.5
v 0.5 -0.5 0.5
v 0.5 0.5 -0.5
v 0.5 0.5 0.5
g left
f 1 2 3
f 2 4 3
g right
f 5 7 6
f 7 8 6
g front
f 1 5 2
f 5 6 2
g back
f 3 4 7
f 4 8 7
g bottom
f 1 3 5
f 3 7 5
g top
f 2 6 4
f 6 8 4
";

pub fn box_mesh() -> HalfEdgeMesh {
    HalfEdgeMesh::from_obj(BOX_OBJ.as_bytes()).unwrap()
}

pub fn box_mesh_inconsistent() -> HalfEdgeMesh {
    HalfEdgeMesh::from_obj(BOX_INCONSISTENT_OBJ.as_bytes()).unwrap()
}

pub fn box_mesh_open() -> HalfEdgeMesh {
    HalfEdgeMesh::from_obj(BOX_OPEN_OBJ.as_bytes()).unwrap()
}

pub fn box_mesh_groups() -> HalfEdgeMesh {
    HalfEdgeMesh::from_obj(BOX_GROUPS_OBJ.as_bytes()).unwrap()
}

/// Corner positions of the unit cube, indexed so that bit 2 selects
/// +x, bit 1 +y, and bit 0 +z.
pub fn box_corners() -> Vec<Point3<f64>> {
    (0..8)
        .map(|i| {
            Point3::new(
                if i & 4 != 0 { 0.5 } else { -0.5 },
                if i & 2 != 0 { 0.5 } else { -0.5 },
                if i & 1 != 0 { 0.5 } else { -0.5 },
            )
        })
        .collect()
}

/// The cube rebuilt with one independent quad per side, split into two
/// triangles each: 24 vertices, every side seam open.
pub fn duplicated_box_soup() -> PolygonSoup {
    let corners = box_corners();
    let quads = [
        [0, 1, 3, 2],
        [4, 6, 7, 5],
        [0, 4, 5, 1],
        [2, 3, 7, 6],
        [0, 2, 6, 4],
        [1, 5, 7, 3],
    ];

    let mut soup = PolygonSoup::new();

    for quad in quads {
        let base = soup.number_of_vertices();

        for corner in quad {
            soup.insert_vertex(corners[corner]);
        }

        soup.insert_face(&[base, base + 1, base + 3]);
        soup.insert_face(&[base + 1, base + 2, base + 3]);
    }

    soup
}

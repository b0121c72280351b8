use std::io::{Read, Write};

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::errors::{MeshError, ObjError};
use crate::float_types::Real;
use crate::geometry::{Aabb, Triangle};
use crate::io::{ObjReader, ObjWriter};
use crate::surface::PolygonSoup;

/// Mesh vertex: a position and one outgoing half-edge. `None` while
/// the vertex is isolated.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub origin: Point3<Real>,
    pub half_edge: Option<usize>,
}

/// Mesh face: one of its half-edges plus an optional patch assignment.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub half_edge: usize,
    pub patch: Option<usize>,
}

/// Directed edge bordering one face. `twin` is `None` on an open
/// boundary.
#[derive(Clone, Copy, Debug)]
pub struct HalfEdge {
    pub origin: usize,
    pub face: usize,
    pub prev: usize,
    pub next: usize,
    pub twin: Option<usize>,
}

impl HalfEdge {
    /// A half-edge without a twin borders an open boundary.
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// Named group of faces.
#[derive(Clone, Debug)]
pub struct Patch {
    pub name: String,
}

/// Half-edge surface mesh.
///
/// Vertices, faces, half-edges, and patches live in four parallel
/// arenas addressed by index. The builder creates them once; only
/// [`HalfEdgeMesh::orient`], [`HalfEdgeMesh::merge`], and
/// [`HalfEdgeMesh::zip_edges`] mutate them afterwards.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) patches: Vec<Patch>,
}

impl HalfEdgeMesh {
    /// Build the connectivity for a polygon soup.
    ///
    /// Half-edges are paired into twins by bucketing on the unordered
    /// vertex pair of their edge. A third half-edge landing in a
    /// bucket fails with [`MeshError::NonManifoldMesh`]; a bucket of
    /// one is an open boundary.
    pub fn from_polygon_soup(soup: &PolygonSoup) -> Result<Self, MeshError> {
        let mut mesh = Self {
            vertices: Vec::with_capacity(soup.number_of_vertices()),
            faces: Vec::with_capacity(soup.number_of_faces()),
            half_edges: Vec::with_capacity(3 * soup.number_of_faces()),
            patches: Vec::with_capacity(soup.number_of_patches()),
        };

        for pi in 0..soup.number_of_patches() {
            mesh.patches.push(Patch {
                name: soup.patch(pi).to_owned(),
            });
        }

        for vi in 0..soup.number_of_vertices() {
            mesh.vertices.push(Vertex {
                origin: soup.vertex(vi),
                half_edge: None,
            });
        }

        let mut edges: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for fi in 0..soup.number_of_faces() {
            let face_vertices = soup.face(fi);
            let sides = face_vertices.len();
            let base = mesh.half_edges.len();

            mesh.faces.push(Face {
                half_edge: base,
                patch: soup.face_patch(fi),
            });

            for (hi, &origin) in face_vertices.iter().enumerate() {
                mesh.half_edges.push(HalfEdge {
                    origin,
                    face: fi,
                    prev: base + (hi + sides - 1) % sides,
                    next: base + (hi + 1) % sides,
                    twin: None,
                });
                mesh.vertices[origin].half_edge = Some(base + hi);

                // Twin assignment ignores face orientation, so the
                // edge key is the sorted vertex pair.
                let end = face_vertices[(hi + 1) % sides];
                let bucket = edges.entry((origin.min(end), origin.max(end))).or_default();

                if bucket.len() == 2 {
                    return Err(MeshError::NonManifoldMesh);
                }

                bucket.push(base + hi);
            }
        }

        for bucket in edges.values() {
            if let [a, b] = bucket[..] {
                mesh.half_edges[a].twin = Some(b);
                mesh.half_edges[b].twin = Some(a);
            }
        }

        Ok(mesh)
    }

    /// Build a mesh straight from an OBJ stream (plain or gzip).
    pub fn from_obj(reader: impl Read) -> Result<Self, ObjError> {
        let soup = ObjReader::new().read(reader)?;
        Ok(Self::from_polygon_soup(&soup)?)
    }

    /// Write the mesh as OBJ, patches becoming `g` groups.
    pub fn write_obj(&self, writer: impl Write) -> Result<(), ObjError> {
        let mut obj = ObjWriter::new();
        obj.set_vertices(self.vertices.iter().map(|vertex| vertex.origin).collect());
        obj.set_faces((0..self.faces.len()).map(|fi| self.face_vertices(fi)).collect());
        obj.set_face_groups(self.faces.iter().map(|face| face.patch).collect());
        obj.set_groups(self.patches.iter().map(|patch| patch.name.clone()).collect());
        obj.write(writer)
    }

    /// Axis-aligned bounds over all vertex positions. An empty mesh
    /// yields the degenerate box at the origin.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|vertex| &vertex.origin))
    }

    /// Whether the mesh has no open boundaries.
    pub fn is_closed(&self) -> bool {
        self.half_edges.iter().all(|half_edge| !half_edge.is_boundary())
    }

    /// Whether every twin pair starts at differing vertices, i.e. all
    /// adjacent faces agree in winding.
    pub fn is_consistent(&self) -> bool {
        self.half_edges.iter().all(|half_edge| match half_edge.twin {
            Some(twin) => self.half_edges[twin].origin != half_edge.origin,
            None => true,
        })
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, id: usize) -> &Vertex {
        &self.vertices[id]
    }

    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn face(&self, id: usize) -> &Face {
        &self.faces[id]
    }

    /// Geometry of a triangular face; `None` when the face has more
    /// than three sides.
    pub fn face_triangle(&self, id: usize) -> Option<Triangle> {
        match self.face_vertices(id)[..] {
            [p, q, r] => Some(Triangle::new(
                self.vertices[p].origin,
                self.vertices[q].origin,
                self.vertices[r].origin,
            )),
            _ => None,
        }
    }

    pub fn number_of_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    pub fn half_edge(&self, id: usize) -> &HalfEdge {
        &self.half_edges[id]
    }

    pub fn number_of_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn patch(&self, id: usize) -> &Patch {
        &self.patches[id]
    }

    pub fn patch_names(&self) -> Vec<&str> {
        self.patches.iter().map(|patch| patch.name.as_str()).collect()
    }

    /// Faces assigned to the patch id.
    pub fn patch_faces(&self, id: usize) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.patch == Some(id))
            .map(|(fi, _)| fi)
            .collect()
    }
}

use nalgebra::Point3;

use crate::float_types::Real;

/// Staging container for polygonal surface data: flat arenas of
/// vertices and faces plus optional named patches.
///
/// Readers fill one of these and the half-edge builder consumes it.
/// Face vertices are zero-based indices wound counter-clockwise as
/// viewed along the outward normal.
#[derive(Clone, Debug, Default)]
pub struct PolygonSoup {
    vertices: Vec<Point3<Real>>,
    face_offsets: Vec<usize>,
    face_vertices: Vec<usize>,
    face_patches: Vec<Option<usize>>,
    patches: Vec<String>,
}

impl PolygonSoup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, id: usize) -> Point3<Real> {
        self.vertices[id]
    }

    pub fn insert_vertex(&mut self, vertex: Point3<Real>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn number_of_faces(&self) -> usize {
        self.face_offsets.len()
    }

    /// Ordered vertex ids of a face.
    pub fn face(&self, id: usize) -> &[usize] {
        let start = self.face_offsets[id];

        match self.face_offsets.get(id + 1) {
            Some(&end) => &self.face_vertices[start..end],
            None => &self.face_vertices[start..],
        }
    }

    pub fn face_patch(&self, id: usize) -> Option<usize> {
        self.face_patches[id]
    }

    /// Insert a face without a patch assignment.
    pub fn insert_face(&mut self, vertices: &[usize]) -> usize {
        self.face_offsets.push(self.face_vertices.len());
        self.face_vertices.extend_from_slice(vertices);
        self.face_patches.push(None);
        self.number_of_faces() - 1
    }

    pub fn insert_face_with_patch(&mut self, vertices: &[usize], patch: usize) -> usize {
        let id = self.insert_face(vertices);
        self.face_patches[id] = Some(patch);
        id
    }

    pub fn number_of_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn patch(&self, id: usize) -> &str {
        &self.patches[id]
    }

    pub fn insert_patch(&mut self, name: impl Into<String>) -> usize {
        self.patches.push(name.into());
        self.patches.len() - 1
    }
}

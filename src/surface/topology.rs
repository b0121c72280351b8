//! Traversal and adjacency queries over a half-edge mesh.

use std::collections::VecDeque;

use hashbrown::HashSet;
use nalgebra::Vector3;

use crate::errors::MeshError;
use crate::float_types::{Real, TAU};
use crate::geometry::angle_between;
use crate::surface::HalfEdgeMesh;

impl HalfEdgeMesh {
    /// Vertex ids adjacent to `id`, rotating around the vertex through
    /// twin links. On an inconsistently oriented mesh the rotation
    /// direction is picked per step from the twin's endpoints, so the
    /// same set comes back in a possibly different order.
    ///
    /// # Panics
    ///
    /// Panics when the rotation reaches an open boundary: the one-ring
    /// is only defined on a closed neighborhood.
    pub fn vertex_neighbors(&self, id: usize) -> Vec<usize> {
        let mut neighbors = Vec::new();
        let start = self.vertices[id].half_edge.expect("isolated vertex");
        let mut current = start;

        loop {
            let half_edge = &self.half_edges[current];
            let twin = half_edge.twin.expect("vertex neighbors requires a closed mesh");

            if half_edge.origin == id {
                neighbors.push(self.half_edges[half_edge.next].origin);
            } else {
                neighbors.push(half_edge.origin);
            }

            let twin_edge = &self.half_edges[twin];
            current = if twin_edge.origin != id {
                twin_edge.next
            } else {
                twin_edge.prev
            };

            if current == start {
                return neighbors;
            }
        }
    }

    /// Ids of the faces using the vertex, in rotation order.
    ///
    /// # Panics
    ///
    /// Panics when the rotation reaches an open boundary.
    pub fn vertex_faces(&self, id: usize) -> Vec<usize> {
        let mut faces = Vec::new();
        let start = self.vertices[id].half_edge.expect("isolated vertex");
        let mut current = start;

        loop {
            let half_edge = &self.half_edges[current];
            let twin = half_edge.twin.expect("vertex faces requires a closed mesh");

            faces.push(half_edge.face);

            let twin_edge = &self.half_edges[twin];
            current = if twin_edge.origin != id {
                twin_edge.next
            } else {
                twin_edge.prev
            };

            if current == start {
                return faces;
            }
        }
    }

    /// Gaussian curvature at a vertex by angle defect, normalized by
    /// the full area of the incident triangles: `3(2π − Σθ)/ΣA`.
    ///
    /// Note the denominator is the whole one-ring area rather than the
    /// barycentric third or a Voronoi cell. The mesh must be triangular
    /// and consistently oriented; hitting an open boundary fails with
    /// [`MeshError::OpenMesh`].
    pub fn vertex_curvature(&self, id: usize) -> Result<Real, MeshError> {
        let mut angle = TAU;
        let mut area = 0.0;

        let start = self.vertices[id].half_edge.expect("isolated vertex");
        let mut current = start;

        loop {
            let half_edge = &self.half_edges[current];
            let next = &self.half_edges[half_edge.next];
            let prev = &self.half_edges[half_edge.prev];

            let p = self.vertices[prev.origin].origin;
            let q = self.vertices[half_edge.origin].origin;
            let r = self.vertices[next.origin].origin;

            let u = p - q;
            let v = r - q;

            angle -= angle_between(&u, &v);
            area += 0.5 * u.cross(&v).norm();

            let Some(twin) = half_edge.twin else {
                return Err(MeshError::OpenMesh);
            };

            current = self.half_edges[twin].next;

            if current == start {
                return Ok(3.0 * angle / area);
            }
        }
    }

    /// Whether any half-edge incident to the vertex lacks a twin.
    /// Assumes a consistently oriented mesh; isolated vertices are not
    /// considered boundary.
    pub fn is_vertex_on_boundary(&self, id: usize) -> bool {
        let Some(start) = self.vertices[id].half_edge else {
            return false;
        };
        let mut current = start;

        loop {
            let half_edge = &self.half_edges[current];

            let Some(twin) = half_edge.twin else {
                return true;
            };

            current = self.half_edges[twin].next;

            if current == start {
                return false;
            }
        }
    }

    /// Vertex ids around the face, in winding order.
    pub fn face_vertices(&self, id: usize) -> Vec<usize> {
        self.face_half_edges(id)
            .into_iter()
            .map(|half_edge| self.half_edges[half_edge].origin)
            .collect()
    }

    /// Half-edge ids around the face, starting from the face's anchor.
    pub fn face_half_edges(&self, id: usize) -> Vec<usize> {
        let mut half_edges = Vec::new();
        let start = self.faces[id].half_edge;
        let mut current = start;

        loop {
            half_edges.push(current);
            current = self.half_edges[current].next;

            if current == start {
                return half_edges;
            }
        }
    }

    /// Ids of the faces sharing an edge with the face. Boundary edges
    /// contribute no neighbor.
    pub fn face_neighbors(&self, id: usize) -> Vec<usize> {
        self.face_half_edges(id)
            .into_iter()
            .filter_map(|half_edge| self.half_edges[half_edge].twin)
            .map(|twin| self.half_edges[twin].face)
            .collect()
    }

    /// Unit normal of the face by the Newell sum over its loop.
    pub fn face_normal(&self, id: usize) -> Vector3<Real> {
        let vertices = self.face_vertices(id);
        let mut normal = Vector3::zeros();

        for (i, &p) in vertices.iter().enumerate() {
            let q = vertices[(i + 1) % vertices.len()];
            normal += self.vertices[p]
                .origin
                .coords
                .cross(&self.vertices[q].origin.coords);
        }

        normal.normalize()
    }

    /// Partition of the face ids into edge-connected components.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut components = Vec::new();
        let mut visited = vec![false; self.faces.len()];

        for seed in 0..self.faces.len() {
            if visited[seed] {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::from([seed]);

            while let Some(current) = queue.pop_front() {
                if visited[current] {
                    continue;
                }

                visited[current] = true;
                component.push(current);

                for neighbor in self.face_neighbors(current) {
                    if !visited[neighbor] {
                        queue.push_back(neighbor);
                    }
                }
            }

            components.push(component);
        }

        components
    }

    /// Vertex ids common to two faces.
    pub fn shared_vertices(&self, i: usize, j: usize) -> Vec<usize> {
        let index: HashSet<usize> = self.face_vertices(i).into_iter().collect();

        self.face_vertices(j)
            .into_iter()
            .filter(|vertex| index.contains(vertex))
            .collect()
    }

    /// Twin pairs whose adjacent face normals differ by at least
    /// `threshold` radians. Each pair is reported once.
    pub fn feature_edges(&self, threshold: Real) -> Vec<(usize, usize)> {
        let mut visited = vec![false; self.half_edges.len()];
        let mut edges = Vec::new();

        for (i, half_edge) in self.half_edges.iter().enumerate() {
            if visited[i] {
                continue;
            }

            visited[i] = true;

            if let Some(twin) = half_edge.twin {
                visited[twin] = true;

                let u = self.face_normal(half_edge.face);
                let v = self.face_normal(self.half_edges[twin].face);

                if angle_between(&u, &v) >= threshold {
                    edges.push((i, twin));
                }
            }
        }

        edges
    }
}

//! Mutating mesh operations: merging, orientation repair, subset
//! extraction, and seam zipping.

use std::cmp::Ordering;
use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use crate::errors::MeshError;
use crate::float_types::{Real, EPSILON};
use crate::geometry::{Query, Sphere};
use crate::spatial::Octree;
use crate::surface::half_edge::{HalfEdge, Patch};
use crate::surface::{HalfEdgeMesh, PolygonSoup};

impl HalfEdgeMesh {
    /// Append another mesh, remapping its indices past the end of this
    /// one. Patches are unioned by name. No geometry is deduplicated;
    /// see [`HalfEdgeMesh::zip_edges`] for that.
    pub fn merge(&mut self, other: &HalfEdgeMesh) {
        let mut patch_ids: HashMap<String, usize> = HashMap::new();

        for patch in self.patches.iter().chain(&other.patches) {
            let next = patch_ids.len();
            patch_ids.entry(patch.name.clone()).or_insert(next);
        }

        let offset_vertices = self.vertices.len();
        let offset_faces = self.faces.len();
        let offset_half_edges = self.half_edges.len();

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend_from_slice(&other.faces);
        self.half_edges.extend_from_slice(&other.half_edges);

        let mut names = vec![String::new(); patch_ids.len()];
        for (name, &id) in &patch_ids {
            names[id] = name.clone();
        }
        self.patches = names.into_iter().map(|name| Patch { name }).collect();

        for vertex in &mut self.vertices[offset_vertices..] {
            if let Some(half_edge) = &mut vertex.half_edge {
                *half_edge += offset_half_edges;
            }
        }

        for face in &mut self.faces[offset_faces..] {
            face.half_edge += offset_half_edges;

            if let Some(patch) = face.patch {
                face.patch = Some(patch_ids[&other.patches[patch].name]);
            }
        }

        for half_edge in &mut self.half_edges[offset_half_edges..] {
            half_edge.origin += offset_vertices;
            half_edge.face += offset_faces;
            half_edge.prev += offset_half_edges;
            half_edge.next += offset_half_edges;

            if let Some(twin) = &mut half_edge.twin {
                *twin += offset_half_edges;
            }
        }
    }

    /// Orient each connected component so adjacent faces agree in
    /// winding. Distinct components may still disagree with each
    /// other.
    pub fn orient(&mut self) {
        let mut oriented = vec![false; self.faces.len()];

        for component in self.components() {
            let mut queue = VecDeque::from([component[0]]);

            while let Some(current) = queue.pop_front() {
                if oriented[current] {
                    continue;
                }

                oriented[current] = true;

                for neighbor in self.face_neighbors(current) {
                    if !oriented[neighbor] {
                        queue.push_back(neighbor);

                        if !self.is_face_consistent(current, neighbor) {
                            self.flip_face(neighbor);
                        }
                    }
                }
            }
        }
    }

    /// Whether faces `i` and `j` agree in winding across their shared
    /// edge. Faces sharing no edge are reported inconsistent.
    fn is_face_consistent(&self, i: usize, j: usize) -> bool {
        let half_edges: HashSet<usize> = self.face_half_edges(i).into_iter().collect();

        for candidate in self.face_half_edges(j) {
            if let Some(twin) = self.half_edges[candidate].twin {
                if half_edges.contains(&twin) {
                    return self.half_edges[candidate].origin != self.half_edges[twin].origin;
                }
            }
        }

        false
    }

    /// Reverse a face's half-edge cycle in place: prev and next swap
    /// and each origin shifts to the previous one. Twins are untouched.
    fn flip_face(&mut self, id: usize) {
        let face_half_edges = self.face_half_edges(id);
        let mut flipped = Vec::with_capacity(face_half_edges.len());

        for &hid in &face_half_edges {
            let half_edge = self.half_edges[hid];

            flipped.push(HalfEdge {
                origin: self.half_edges[half_edge.prev].origin,
                prev: half_edge.next,
                next: half_edge.prev,
                ..half_edge
            });
        }

        for (hid, half_edge) in face_half_edges.into_iter().zip(flipped) {
            self.half_edges[hid] = half_edge;
        }
    }

    /// Extract a subset of faces as a new mesh with condensed vertex
    /// and patch indices. Fails when the subset itself is non-manifold.
    pub fn extract_faces(&self, ids: &[usize]) -> Result<HalfEdgeMesh, MeshError> {
        let mut soup = PolygonSoup::new();
        let mut vertex_ids: HashMap<usize, usize> = HashMap::new();
        let mut patch_ids: HashMap<usize, usize> = HashMap::new();

        for &fid in ids {
            let face_vertices: Vec<usize> = self
                .face_vertices(fid)
                .into_iter()
                .map(|vid| {
                    *vertex_ids
                        .entry(vid)
                        .or_insert_with(|| soup.insert_vertex(self.vertices[vid].origin))
                })
                .collect();

            match self.faces[fid].patch {
                Some(pid) => {
                    let patch = *patch_ids
                        .entry(pid)
                        .or_insert_with(|| soup.insert_patch(self.patches[pid].name.clone()));
                    soup.insert_face_with_patch(&face_vertices, patch);
                },
                None => {
                    soup.insert_face(&face_vertices);
                },
            }
        }

        HalfEdgeMesh::from_polygon_soup(&soup)
    }

    /// Extract all faces assigned to any of the patch ids.
    pub fn extract_patches(&self, ids: &[usize]) -> Result<HalfEdgeMesh, MeshError> {
        let wanted: HashSet<usize> = ids.iter().copied().collect();

        let faces: Vec<usize> = self
            .faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.patch.is_some_and(|patch| wanted.contains(&patch)))
            .map(|(fi, _)| fi)
            .collect();

        self.extract_faces(&faces)
    }

    /// Extract all faces assigned to any of the patch names.
    pub fn extract_patch_names(&self, names: &[&str]) -> Result<HalfEdgeMesh, MeshError> {
        let wanted: HashSet<&str> = names.iter().copied().collect();

        let patches: Vec<usize> = self
            .patches
            .iter()
            .enumerate()
            .filter(|(_, patch)| wanted.contains(patch.name.as_str()))
            .map(|(pi, _)| pi)
            .collect();

        self.extract_patches(&patches)
    }

    /// Merge boundary vertices that coincide within the geometric
    /// tolerance and re-pair twins across the closed seams.
    ///
    /// Boundary vertices are deduplicated through an octree of the
    /// canonical positions seen so far; each duplicate maps to the
    /// lowest-index canonical vertex within [`EPSILON`]. Interior
    /// vertices are kept as-is. The vertex arena is compacted, so
    /// vertex ids are re-assigned; half-edges are rewritten in place.
    /// If re-pairing finds an edge shared by more than two half-edges,
    /// the zip fails with [`MeshError::NonManifoldMeshNear`] carrying
    /// the midpoint of the offending edge.
    pub fn zip_edges(&mut self) -> Result<(), MeshError> {
        if !self.is_consistent() {
            self.orient();
        }

        let mut octree = Octree::new(self.bounds().buffer(EPSILON));
        let mut vertices = Vec::new();
        let mut canonical = Vec::new();
        let mut remap = vec![0usize; self.vertices.len()];

        for (i, vertex) in self.vertices.iter().enumerate() {
            if self.is_vertex_on_boundary(i) {
                let query = Query::Sphere(Sphere::new(vertex.origin, EPSILON));
                let duplicates = octree.query(&query);

                if let Some(&id) = duplicates.iter().min() {
                    remap[i] = canonical[id];
                } else {
                    canonical.push(vertices.len());
                    remap[i] = vertices.len();
                    vertices.push(*vertex);
                    let _ = octree.insert(vertex.origin);
                }
            } else {
                remap[i] = vertices.len();
                vertices.push(*vertex);
            }
        }

        self.vertices = vertices;

        for half_edge in &mut self.half_edges {
            half_edge.origin = remap[half_edge.origin];
        }

        let mut edges: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (i, half_edge) in self.half_edges.iter().enumerate() {
            let a = half_edge.origin;
            let b = self.half_edges[half_edge.next].origin;
            let bucket = edges.entry((a.min(b), a.max(b))).or_default();

            if bucket.len() == 2 {
                let mid = nalgebra::center(&self.vertices[a].origin, &self.vertices[b].origin);

                return Err(MeshError::NonManifoldMeshNear {
                    x: mid.x,
                    y: mid.y,
                    z: mid.z,
                });
            }

            bucket.push(i);
        }

        for bucket in edges.values() {
            if let [a, b] = bucket[..] {
                self.half_edges[a].twin = Some(b);
                self.half_edges[b].twin = Some(a);
            }
        }

        Ok(())
    }

    /// Principal axes of the vertex cloud: the eigenvectors of the 3×3
    /// coordinate covariance matrix, sorted by descending eigenvalue
    /// magnitude. Meshes with fewer than two vertices get the Cartesian
    /// axes.
    pub fn principal_axes(&self) -> [Vector3<Real>; 3] {
        if self.vertices.len() < 2 {
            return [Vector3::x(), Vector3::y(), Vector3::z()];
        }

        let count = self.vertices.len() as Real;
        let mut mean = Vector3::zeros();

        for vertex in &self.vertices {
            mean += vertex.origin.coords;
        }

        mean /= count;

        let mut covariance = Matrix3::zeros();

        for vertex in &self.vertices {
            let d = vertex.origin.coords - mean;
            covariance += d * d.transpose();
        }

        covariance /= count - 1.0;

        let eigen = SymmetricEigen::new(covariance);
        let mut order = [0usize, 1, 2];

        order.sort_by(|&i, &j| {
            eigen.eigenvalues[j]
                .abs()
                .partial_cmp(&eigen.eigenvalues[i].abs())
                .unwrap_or(Ordering::Equal)
        });

        order.map(|i| eigen.eigenvectors.column(i).into_owned())
    }
}

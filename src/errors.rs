use crate::float_types::Real;

/// Topological errors raised while building or repairing a surface mesh.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum MeshError {
    /// An undirected edge is shared by more than two faces
    #[error("non-manifold mesh")]
    NonManifoldMesh,
    /// An undirected edge is shared by more than two faces; carries the
    /// midpoint of the offending edge so the fault can be located
    #[error("non-manifold mesh: near [{x} {y} {z}]")]
    NonManifoldMeshNear { x: Real, y: Real, z: Real },
    /// The operation reached an open boundary on a mesh it requires closed
    #[error("mesh must be closed")]
    OpenMesh,
}

/// Errors raised while reading or writing a Wavefront OBJ stream.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    /// A `v` line without exactly three coordinate fields
    #[error("line {line}: invalid vertex")]
    InvalidVertex { line: usize },
    /// An `f` line with fewer than three vertices or a reference that is
    /// not a positive integer
    #[error("line {line}: invalid face")]
    InvalidFace { line: usize },
    /// A vertex coordinate that failed to parse as a float
    #[error("line {line}: {source}")]
    ParseFloat {
        line: usize,
        source: std::num::ParseFloatError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Topological failure while assembling the parsed surface
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

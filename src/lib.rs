//! Surface mesh processing toolkit.
//!
//! The crate is built around two data structures: a linear
//! location-coded octree ([`spatial::Octree`]) for spatial queries over
//! geometric primitives, and a half-edge surface mesh
//! ([`surface::HalfEdgeMesh`]) for connectivity, traversal, orientation
//! repair, and zipping of open seams. The [`geometry`] module supplies
//! the primitives and the intersection tests both structures rely on,
//! and [`io`] reads and writes Wavefront OBJ surfaces.

#![forbid(unsafe_code)]

pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod io;
pub mod spatial;
pub mod surface;

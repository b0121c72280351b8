//! Mesh file format support.

pub mod obj;

pub use obj::{ObjReader, ObjWriter};

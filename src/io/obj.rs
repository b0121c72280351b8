//! Wavefront OBJ reading and writing.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::str::SplitWhitespace;

use flate2::read::GzDecoder;
use nalgebra::Point3;

use crate::errors::ObjError;
use crate::float_types::Real;
use crate::surface::PolygonSoup;

const PREFIX_VERTEX: &str = "v";
const PREFIX_FACE: &str = "f";
const PREFIX_GROUP: &str = "g";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Streaming OBJ reader producing a [`PolygonSoup`].
///
/// Plain ASCII and gzip-compressed streams are both accepted; the
/// compression is sniffed from the two-byte magic. Recognized line
/// prefixes are `v`, `f`, and `g`; any other line is skipped. Errors
/// carry the 1-based line number of the offending line.
#[derive(Debug, Default)]
pub struct ObjReader {
    soup: PolygonSoup,
    line: usize,
}

impl ObjReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the stream and return the parsed soup.
    pub fn read(mut self, reader: impl Read) -> Result<PolygonSoup, ObjError> {
        let mut buffer = BufReader::new(reader);
        let head = buffer.fill_buf()?;

        if head.starts_with(&GZIP_MAGIC) {
            self.parse(BufReader::new(GzDecoder::new(buffer)))?;
        } else {
            self.parse(buffer)?;
        }

        Ok(self.soup)
    }

    fn parse(&mut self, reader: impl BufRead) -> Result<(), ObjError> {
        for (number, line) in reader.lines().enumerate() {
            self.line = number + 1;
            let line = line?;
            let mut fields = line.split_whitespace();

            match fields.next() {
                Some(PREFIX_VERTEX) => self.parse_vertex(fields)?,
                Some(PREFIX_FACE) => self.parse_face(fields)?,
                Some(PREFIX_GROUP) => self.parse_group(fields),
                _ => {},
            }
        }

        Ok(())
    }

    fn parse_vertex(&mut self, fields: SplitWhitespace) -> Result<(), ObjError> {
        let fields: Vec<&str> = fields.collect();

        if fields.len() != 3 {
            return Err(ObjError::InvalidVertex { line: self.line });
        }

        let mut values = [0.0; 3];

        for (value, field) in values.iter_mut().zip(fields) {
            *value = field.parse().map_err(|source| ObjError::ParseFloat {
                line: self.line,
                source,
            })?;
        }

        self.soup.insert_vertex(Point3::from(values));
        Ok(())
    }

    fn parse_face(&mut self, fields: SplitWhitespace) -> Result<(), ObjError> {
        let mut face = Vec::new();

        for field in fields {
            // Keep only the vertex reference of a v/vt/vn triplet.
            let token = field.split('/').next().unwrap_or(field);

            let value: i64 = token
                .parse()
                .map_err(|_| ObjError::InvalidFace { line: self.line })?;

            if value <= 0 {
                return Err(ObjError::InvalidFace { line: self.line });
            }

            face.push(value as usize - 1);
        }

        if face.len() < 3 {
            return Err(ObjError::InvalidFace { line: self.line });
        }

        // Faces belong to the most recently declared group, if any.
        match self.soup.number_of_patches().checked_sub(1) {
            Some(patch) => self.soup.insert_face_with_patch(&face, patch),
            None => self.soup.insert_face(&face),
        };

        Ok(())
    }

    fn parse_group(&mut self, fields: SplitWhitespace) {
        let name = fields.collect::<Vec<_>>().join(" ");
        self.soup.insert_patch(name);
    }
}

/// Buffered OBJ writer.
///
/// Vertices come first, then `l` lines, then faces: faces without a
/// group precede any `g` header, and each group's faces follow its
/// header. Indices are written 1-based; coordinates with six decimal
/// places.
#[derive(Debug, Default)]
pub struct ObjWriter {
    vertices: Vec<Point3<Real>>,
    faces: Vec<Vec<usize>>,
    face_groups: Vec<Option<usize>>,
    lines: Vec<Vec<usize>>,
    groups: Vec<String>,
}

impl ObjWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vertices(&mut self, vertices: Vec<Point3<Real>>) {
        self.vertices = vertices;
    }

    pub fn set_faces(&mut self, faces: Vec<Vec<usize>>) {
        self.faces = faces;
    }

    /// Group of each face, parallel to the faces. Leaving this empty
    /// writes every face ungrouped.
    pub fn set_face_groups(&mut self, face_groups: Vec<Option<usize>>) {
        self.face_groups = face_groups;
    }

    pub fn set_lines(&mut self, lines: Vec<Vec<usize>>) {
        self.lines = lines;
    }

    pub fn set_groups(&mut self, groups: Vec<String>) {
        self.groups = groups;
    }

    pub fn write(&self, writer: impl Write) -> Result<(), ObjError> {
        let mut buffer = BufWriter::new(writer);

        for vertex in &self.vertices {
            writeln!(buffer, "v {:.6} {:.6} {:.6}", vertex.x, vertex.y, vertex.z)?;
        }

        for line in &self.lines {
            write!(buffer, "l")?;

            for vertex in line {
                write!(buffer, " {}", vertex + 1)?;
            }

            writeln!(buffer)?;
        }

        self.write_faces(&mut buffer, None)?;

        for gid in 0..self.groups.len() {
            if (0..self.faces.len()).any(|fi| self.face_group(fi) == Some(gid)) {
                writeln!(buffer, "g {}", self.groups[gid])?;
                self.write_faces(&mut buffer, Some(gid))?;
            }
        }

        buffer.flush()?;
        Ok(())
    }

    fn face_group(&self, face: usize) -> Option<usize> {
        self.face_groups.get(face).copied().flatten()
    }

    fn write_faces(&self, buffer: &mut impl Write, group: Option<usize>) -> Result<(), ObjError> {
        for (fi, face) in self.faces.iter().enumerate() {
            if self.face_group(fi) != group {
                continue;
            }

            write!(buffer, "f")?;

            for vertex in face {
                write!(buffer, " {}", vertex + 1)?;
            }

            writeln!(buffer)?;
        }

        Ok(())
    }
}

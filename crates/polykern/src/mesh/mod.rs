//! Face meshes and OFF text I/O (2D variant).
//!
//! The format: optional `#` comments and blank lines anywhere, a line
//! with the literal `OFF`, a counts line `V F E` (E ignored), V vertex
//! lines `x y [z]` (z dropped), F face lines
//! `k i0 .. i(k-1) [r g b]`. The writer emits z as `0.0` and the edge
//! count as `0`.
//!
//! The mesh is plain data; no geometry happens here. The core stays
//! I/O-free and this module stays tolerance-free.

use std::fmt;
use std::io::{self, BufRead, Write};

use nalgebra::Vector2;

type Vec2 = Vector2<f64>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec2>,
    pub faces: Vec<Face>,
}

/// A face: vertex indices into the mesh table plus an optional
/// color triplet carried through read -> transform -> write.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub verts: Vec<usize>,
    pub color: Option<[u8; 3]>,
}

impl Face {
    pub fn new(verts: Vec<usize>) -> Face {
        Face { verts, color: None }
    }
}

#[derive(Debug)]
pub enum OffError {
    /// The first meaningful line is not the `OFF` header.
    NotOff,
    BadCounts { line: usize },
    BadVertex { line: usize },
    BadFace { line: usize },
    /// The file ended before the announced counts were satisfied.
    Truncated,
    Io(io::Error),
}

impl fmt::Display for OffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffError::NotOff => write!(f, "file is not an OFF file"),
            OffError::BadCounts { line } => write!(f, "line {line}: malformed counts line"),
            OffError::BadVertex { line } => write!(f, "line {line}: malformed vertex"),
            OffError::BadFace { line } => write!(f, "line {line}: malformed face"),
            OffError::Truncated => write!(f, "unexpected end of file"),
            OffError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for OffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OffError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OffError {
    fn from(e: io::Error) -> Self {
        OffError::Io(e)
    }
}

/// Read a 2D-variant OFF mesh. Comments and blank lines are skipped
/// anywhere; vertex z coordinates are dropped; a face line reads
/// exactly its announced index count and an optional trailing color.
pub fn read_off<R: BufRead>(reader: R) -> Result<Mesh, OffError> {
    let mut lines = reader.lines().enumerate();
    let mut next_meaningful = || -> Result<Option<(usize, String)>, OffError> {
        for (i, line) in lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((i + 1, trimmed.to_string())));
        }
        Ok(None)
    };

    let (_, header) = next_meaningful()?.ok_or(OffError::Truncated)?;
    if header.split_whitespace().next() != Some("OFF") {
        return Err(OffError::NotOff);
    }

    let (counts_line, counts) = next_meaningful()?.ok_or(OffError::Truncated)?;
    let mut it = counts.split_whitespace();
    let n_vertices: usize = it
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(OffError::BadCounts { line: counts_line })?;
    let n_faces: usize = it
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(OffError::BadCounts { line: counts_line })?;
    // Edge count ignored.

    let mut vertices = Vec::with_capacity(n_vertices);
    for _ in 0..n_vertices {
        let (line_no, line) = next_meaningful()?.ok_or(OffError::Truncated)?;
        let mut it = line.split_whitespace();
        let x: f64 = it
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(OffError::BadVertex { line: line_no })?;
        let y: f64 = it
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(OffError::BadVertex { line: line_no })?;
        vertices.push(Vector2::new(x, y));
    }

    let mut faces = Vec::with_capacity(n_faces);
    for _ in 0..n_faces {
        let (line_no, line) = next_meaningful()?.ok_or(OffError::Truncated)?;
        let bad = || OffError::BadFace { line: line_no };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let k: usize = tokens.first().and_then(|t| t.parse().ok()).ok_or_else(bad)?;
        if tokens.len() < 1 + k {
            return Err(bad());
        }
        let mut verts = Vec::with_capacity(k);
        for t in &tokens[1..1 + k] {
            let idx: usize = t.parse().map_err(|_| bad())?;
            if idx >= vertices.len() {
                return Err(bad());
            }
            verts.push(idx);
        }
        let color = match tokens.len() - (1 + k) {
            0 => None,
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, t) in rgb.iter_mut().zip(&tokens[1 + k..]) {
                    *slot = t.parse().map_err(|_| bad())?;
                }
                Some(rgb)
            }
            _ => return Err(bad()),
        };
        faces.push(Face { verts, color });
    }

    Ok(Mesh { vertices, faces })
}

/// Write a mesh in the same 2D-variant OFF format.
pub fn write_off<W: Write>(mesh: &Mesh, mut writer: W) -> io::Result<()> {
    writeln!(writer, "OFF")?;
    writeln!(writer, "{} {} 0", mesh.vertices.len(), mesh.faces.len())?;
    for v in &mesh.vertices {
        writeln!(writer, "{} {} 0.0", v.x, v.y)?;
    }
    for face in &mesh.faces {
        write!(writer, "{}", face.verts.len())?;
        for idx in &face.verts {
            write!(writer, " {idx}")?;
        }
        if let Some([r, g, b]) = face.color {
            write!(writer, " {r} {g} {b}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Reverse the vertex order of every face; colors are preserved.
pub fn invert_faces(mesh: &Mesh) -> Mesh {
    Mesh {
        vertices: mesh.vertices.clone(),
        faces: mesh
            .faces
            .iter()
            .map(|f| Face {
                verts: f.verts.iter().rev().copied().collect(),
                color: f.color,
            })
            .collect(),
    }
}

use std::fmt;
use std::io;

use crate::graph::NodeId;

/// Ways a surface mesh can be unusable for shell extraction.
#[derive(Debug)]
pub enum MeshDefect {
    /// The mesh carries no face block at all.
    NoFaces,
    /// More than one face block; only single-surface meshes are supported.
    MultipleFaceBlocks(usize),
    /// A face with a corner count other than three.
    NonTriangularFace { line: usize, corners: usize },
    /// A vertex row that did not yield three coordinates.
    BadVertexRow { line: usize },
    /// A face corner that is not a usable vertex reference.
    BadFaceIndex { line: usize },
}

impl fmt::Display for MeshDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshDefect::NoFaces => write!(f, "mesh has no faces"),
            MeshDefect::MultipleFaceBlocks(n) => {
                write!(f, "mesh has {} face blocks, expected exactly one surface", n)
            }
            MeshDefect::NonTriangularFace { line, corners } => {
                write!(f, "face on line {} has {} corners, expected 3", line, corners)
            }
            MeshDefect::BadVertexRow { line } => {
                write!(f, "vertex on line {} does not have 3 numeric coordinates", line)
            }
            MeshDefect::BadFaceIndex { line } => {
                write!(f, "face on line {} has an unusable vertex index", line)
            }
        }
    }
}

/// Error type for the plotting pipeline.
///
/// Every error aborts the whole call; no partial scene is ever produced.
/// I/O errors from the file readers pass through unwrapped so the underlying
/// cause stays reachable via `source()`.
#[derive(Debug)]
pub enum PlotError {
    /// Mesh has no usable face block or malformed vertex/face rows.
    MalformedMesh(MeshDefect),
    /// The graph references a node id with no matching coordinate row.
    NodeCountMismatch { node: NodeId, rows: usize },
    /// A coordinate-table row that cannot be parsed.
    BadPositionRow { line: usize, reason: String },
    /// An edge-list row that cannot be parsed.
    BadEdgeRow { line: usize, reason: String },
    Io(io::Error),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::MalformedMesh(defect) => write!(f, "malformed mesh: {}", defect),
            PlotError::NodeCountMismatch { node, rows } => {
                write!(f, "node {} has no coordinate row (table has {} rows)", node, rows)
            }
            PlotError::BadPositionRow { line, reason } => {
                write!(f, "coordinate row on line {}: {}", line, reason)
            }
            PlotError::BadEdgeRow { line, reason } => {
                write!(f, "edge row on line {}: {}", line, reason)
            }
            PlotError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

impl From<MeshDefect> for PlotError {
    fn from(defect: MeshDefect) -> Self {
        PlotError::MalformedMesh(defect)
    }
}

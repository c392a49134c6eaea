use std::fs;
use std::path::Path;

use bevy::math::DVec3;
use log::debug;

use crate::error::{MeshDefect, PlotError};
use crate::scene::SurfacePrimitive;

/// Opacity of the anatomical shell; low enough to see the network inside.
const SHELL_OPACITY: f64 = 0.1;
const SHELL_COLOR: &str = "grey";
const SHELL_NAME: &str = "Brain Shell";

/// An anatomical surface mesh: vertex positions plus triangular faces grouped
/// into blocks (one block per `o`/`g` group of the source file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub points: Vec<DVec3>,
    pub face_blocks: Vec<Vec<[u32; 3]>>,
}

impl SurfaceMesh {
    /// Read a Wavefront OBJ file. Only `v` and `f` rows are consumed; `o` and
    /// `g` rows split faces into blocks, everything else is ignored.
    /// I/O errors pass through unwrapped.
    pub fn read_obj(path: &Path) -> Result<Self, PlotError> {
        let text = fs::read_to_string(path)?;
        let mesh = Self::parse_obj(&text)?;
        debug!(
            "read mesh with {} vertices, {} face blocks from {}",
            mesh.points.len(),
            mesh.face_blocks.len(),
            path.display()
        );
        Ok(mesh)
    }

    pub fn parse_obj(text: &str) -> Result<Self, PlotError> {
        let mut points = Vec::new();
        let mut blocks: Vec<Vec<[u32; 3]>> = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("v") => {
                    let mut axes = [0.0f64; 3];
                    for axis in &mut axes {
                        let raw = fields
                            .next()
                            .ok_or(MeshDefect::BadVertexRow { line: line_no })?;
                        *axis = raw
                            .parse()
                            .map_err(|_| MeshDefect::BadVertexRow { line: line_no })?;
                    }
                    points.push(DVec3::from_array(axes));
                }
                Some("f") => {
                    let corners = fields
                        .map(|field| parse_face_corner(field, points.len(), line_no))
                        .collect::<Result<Vec<u32>, MeshDefect>>()?;
                    if corners.len() != 3 {
                        return Err(MeshDefect::NonTriangularFace {
                            line: line_no,
                            corners: corners.len(),
                        }
                        .into());
                    }
                    let face = [corners[0], corners[1], corners[2]];
                    match blocks.last_mut() {
                        Some(block) => block.push(face),
                        None => blocks.push(vec![face]),
                    }
                }
                Some("o") | Some("g") => {
                    // a new group only opens a new block once faces exist
                    if blocks.last().is_some_and(|block| !block.is_empty()) {
                        blocks.push(Vec::new());
                    }
                }
                _ => {}
            }
        }
        blocks.retain(|block| !block.is_empty());
        Ok(SurfaceMesh {
            points,
            face_blocks: blocks,
        })
    }

    /// Wrap the mesh as the translucent "Brain Shell" surface primitive.
    ///
    /// Exactly one face block is accepted: a mesh with several blocks is
    /// rejected outright rather than silently dropping all but the first.
    /// Face indices are not range-checked against the vertex array.
    pub fn shell(&self) -> Result<SurfacePrimitive, PlotError> {
        let faces = match self.face_blocks.as_slice() {
            [] => return Err(MeshDefect::NoFaces.into()),
            [faces] => faces,
            blocks => return Err(MeshDefect::MultipleFaceBlocks(blocks.len()).into()),
        };

        let mut x = Vec::with_capacity(self.points.len());
        let mut y = Vec::with_capacity(self.points.len());
        let mut z = Vec::with_capacity(self.points.len());
        for point in &self.points {
            x.push(point.x);
            y.push(point.y);
            z.push(point.z);
        }

        let mut i = Vec::with_capacity(faces.len());
        let mut j = Vec::with_capacity(faces.len());
        let mut k = Vec::with_capacity(faces.len());
        for face in faces {
            i.push(face[0]);
            j.push(face[1]);
            k.push(face[2]);
        }

        Ok(SurfacePrimitive {
            x,
            y,
            z,
            i,
            j,
            k,
            color: SHELL_COLOR.into(),
            opacity: SHELL_OPACITY,
            name: SHELL_NAME.into(),
            show_legend: true,
            hoverable: false,
        })
    }
}

/// Resolve one `f` corner: `7`, `7/2`, `7//3` or a negative relative index.
fn parse_face_corner(field: &str, vertex_count: usize, line_no: usize) -> Result<u32, MeshDefect> {
    let index_part = field.split('/').next().unwrap_or(field);
    let value: i64 = index_part
        .parse()
        .map_err(|_| MeshDefect::BadFaceIndex { line: line_no })?;
    let resolved = if value < 0 {
        vertex_count as i64 + value
    } else {
        value - 1
    };
    if value == 0 || resolved < 0 {
        return Err(MeshDefect::BadFaceIndex { line: line_no });
    }
    u32::try_from(resolved).map_err(|_| MeshDefect::BadFaceIndex { line: line_no })
}

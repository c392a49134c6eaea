use std::fs;
use std::path::Path;

use bevy::math::DVec3;
use log::debug;

use crate::error::PlotError;
use crate::graph::{BrainNetwork, NodeId};

/// Dense table of node coordinates; row `i` belongs to node `i`.
///
/// Parsed from whitespace-delimited, headerless text: one row per node in id
/// order, at least three numeric columns, extra columns ignored. Rows beyond
/// the network's node count are allowed and simply unused.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAtlas {
    positions: Vec<DVec3>,
}

impl PositionAtlas {
    pub fn from_points(positions: Vec<DVec3>) -> Self {
        PositionAtlas { positions }
    }

    /// Read and parse a coordinate file. I/O errors pass through unwrapped.
    pub fn load(path: &Path) -> Result<Self, PlotError> {
        let text = fs::read_to_string(path)?;
        let atlas = Self::parse(&text)?;
        debug!("loaded {} node positions from {}", atlas.len(), path.display());
        Ok(atlas)
    }

    pub fn parse(text: &str) -> Result<Self, PlotError> {
        let mut positions = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let mut axes = [0.0f64; 3];
            for axis in &mut axes {
                let raw = fields.next().ok_or_else(|| PlotError::BadPositionRow {
                    line: line_no,
                    reason: "fewer than 3 columns".into(),
                })?;
                *axis = raw.parse().map_err(|_| PlotError::BadPositionRow {
                    line: line_no,
                    reason: format!("not a number: {:?}", raw),
                })?;
            }
            positions.push(DVec3::from_array(axes));
        }
        Ok(PositionAtlas { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Coordinate of a node, or `None` when its row is missing.
    pub fn position(&self, node: NodeId) -> Option<DVec3> {
        self.positions.get(node.index()).copied()
    }

    /// Upfront check of the dense zero-based invariant: every node of the
    /// network must have a coordinate row before any primitive is built.
    pub fn ensure_covers(&self, network: &BrainNetwork) -> Result<(), PlotError> {
        if network.node_count() > self.positions.len() {
            return Err(PlotError::NodeCountMismatch {
                node: NodeId(self.positions.len()),
                rows: self.positions.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let atlas = PositionAtlas::parse("0 0 0\n1 0 0\n1 1 0\n").unwrap();

        assert_eq!(atlas.len(), 3);
        assert_eq!(atlas.position(NodeId(2)), Some(DVec3::new(1.0, 1.0, 0.0)));
        assert_eq!(atlas.position(NodeId(3)), None);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_ignores_extra_columns() {
        let atlas = PositionAtlas::parse("\n-12.5 4 7.25 99 region_a\n\n3e1 0 -1\n").unwrap();

        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.position(NodeId(0)), Some(DVec3::new(-12.5, 4.0, 7.25)));
        assert_eq!(atlas.position(NodeId(1)), Some(DVec3::new(30.0, 0.0, -1.0)));
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let err = PositionAtlas::parse("1 2 3\n4 5\n").unwrap_err();
        assert!(matches!(err, PlotError::BadPositionRow { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let err = PositionAtlas::parse("1 2 left\n").unwrap_err();
        assert!(matches!(err, PlotError::BadPositionRow { line: 1, .. }));
    }

    #[test]
    fn test_ensure_covers() {
        let atlas = PositionAtlas::parse("0 0 0\n1 0 0\n").unwrap();

        let covered = BrainNetwork::new(2);
        assert!(atlas.ensure_covers(&covered).is_ok());

        let mut uncovered = BrainNetwork::new(2);
        uncovered.add_edge(NodeId(1), NodeId(2));
        let err = atlas.ensure_covers(&uncovered).unwrap_err();
        assert!(matches!(
            err,
            PlotError::NodeCountMismatch { node: NodeId(2), rows: 2 }
        ));
    }

    #[test]
    fn test_load_missing_file_passes_io_error_through() {
        let err = PositionAtlas::load(Path::new("/nonexistent/positions.txt")).unwrap_err();
        assert!(matches!(err, PlotError::Io(_)));
    }
}

use bevy::math::DVec3;

use super::primitives::LinePrimitive;
use crate::atlas::PositionAtlas;
use crate::error::PlotError;
use crate::graph::BrainNetwork;

const EDGE_COLOR: &str = "black";
const EDGE_WIDTH: f64 = 2.0;
const EDGE_OPACITY: f64 = 0.3;

/// Flat per-axis coordinate sequences for disconnected line segments.
///
/// Every segment contributes its two endpoints followed by a `None` break,
/// so each axis holds exactly `3 * segment_count` entries and consecutive
/// segments never join into a polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSegmentBuffer {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
}

impl EdgeSegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, from: DVec3, to: DVec3) {
        self.x.extend([Some(from.x), Some(to.x), None]);
        self.y.extend([Some(from.y), Some(to.y), None]);
        self.z.extend([Some(from.z), Some(to.z), None]);
    }

    /// Entries per axis, break sentinels included.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Build the segment buffer for every edge, in the network's own edge order.
/// Nothing is sorted or deduplicated; self-loops and parallel edges each
/// contribute one segment.
pub fn flatten_edges(
    network: &BrainNetwork,
    atlas: &PositionAtlas,
) -> Result<EdgeSegmentBuffer, PlotError> {
    let mut buffer = EdgeSegmentBuffer::new();
    for edge in network.edges() {
        let from = atlas.position(edge.a).ok_or(PlotError::NodeCountMismatch {
            node: edge.a,
            rows: atlas.len(),
        })?;
        let to = atlas.position(edge.b).ok_or(PlotError::NodeCountMismatch {
            node: edge.b,
            rows: atlas.len(),
        })?;
        buffer.push_segment(from, to);
    }
    Ok(buffer)
}

/// Wrap a segment buffer as the edge line primitive.
pub fn edge_trace(buffer: EdgeSegmentBuffer) -> LinePrimitive {
    LinePrimitive {
        x: buffer.x,
        y: buffer.y,
        z: buffer.z,
        color: EDGE_COLOR.into(),
        width: EDGE_WIDTH,
        opacity: EDGE_OPACITY,
        show_legend: false,
        hoverable: false,
    }
}

use super::primitives::{Colorbar, MarkerPrimitive};
use crate::atlas::PositionAtlas;
use crate::error::PlotError;
use crate::graph::BrainNetwork;

/// Scale applied to the weighted degree when deriving marker sizes.
const DEGREE_SCALE: f64 = 0.2;
/// Offset added to every size; keeps isolated nodes visible.
const SIZE_OFFSET: f64 = 1.0;
/// Multiplier turning a size value into a marker diameter.
const DIAMETER_SCALE: f64 = 10.0;
const MARKER_OPACITY: f64 = 0.85;

/// A per-node visual encoding: either supplied by the caller verbatim or
/// derived from the weighted degree. Resolved exactly once, at the top of the
/// composition, so the default-vs-override branch never recurs downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeStyle {
    Provided(Vec<f64>),
    FromDegree,
}

impl NodeStyle {
    pub fn from_override(value: Option<Vec<f64>>) -> Self {
        match value {
            Some(values) => NodeStyle::Provided(values),
            None => NodeStyle::FromDegree,
        }
    }
}

/// Default size law: `0.2 * weighted_degree` for every node, then `+ 1.0` on
/// every element. Pure function of the network, bit-reproducible.
pub fn node_sizes(network: &BrainNetwork) -> Vec<f64> {
    let mut sizes: Vec<f64> = network
        .weighted_degrees()
        .iter()
        .map(|degree| DEGREE_SCALE * degree)
        .collect();
    for size in &mut sizes {
        *size += SIZE_OFFSET;
    }
    sizes
}

/// Build the node marker primitive: coordinates for nodes `0..N`, sizes as
/// diameters, scalar colors with an attached scale legend.
pub fn marker_trace(
    network: &BrainNetwork,
    atlas: &PositionAtlas,
    sizes: &[f64],
    colors: &[f64],
) -> Result<MarkerPrimitive, PlotError> {
    let mut x = Vec::with_capacity(network.node_count());
    let mut y = Vec::with_capacity(network.node_count());
    let mut z = Vec::with_capacity(network.node_count());
    for node in network.nodes() {
        let position = atlas.position(node).ok_or(PlotError::NodeCountMismatch {
            node,
            rows: atlas.len(),
        })?;
        x.push(position.x);
        y.push(position.y);
        z.push(position.z);
    }

    Ok(MarkerPrimitive {
        x,
        y,
        z,
        sizes: sizes.iter().map(|size| DIAMETER_SCALE * size).collect(),
        colors: colors.to_vec(),
        opacity: MARKER_OPACITY,
        show_scale: true,
        colorbar: Colorbar::default(),
        show_legend: false,
        hoverable: false,
    })
}

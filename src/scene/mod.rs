mod edges;
mod encode;
mod primitives;

pub use edges::{EdgeSegmentBuffer, edge_trace, flatten_edges};
pub use encode::{NodeStyle, marker_trace, node_sizes};
pub use primitives::{Colorbar, LinePrimitive, MarkerPrimitive, SurfacePrimitive};

use log::info;
use serde::Serialize;

use crate::atlas::PositionAtlas;
use crate::error::PlotError;
use crate::graph::BrainNetwork;
use crate::mesh::SurfaceMesh;

/// Fixed presentation parameters of the composed scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

/// Canvas margins in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
    pub top: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            autosize: false,
            width: 800,
            height: 800,
            margin: Margin {
                left: 50,
                right: 50,
                bottom: 100,
                top: 100,
            },
        }
    }
}

/// The composed scene: a terminal, write-once artifact handed to the display
/// collaborator. Field order is draw order: surface first, then markers, then
/// edge lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub surface: SurfacePrimitive,
    pub markers: MarkerPrimitive,
    pub edges: LinePrimitive,
    pub layout: Layout,
}

impl Scene {
    /// Export the scene description as JSON; break sentinels become `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Merge the shell, node markers and edge segments into one scene.
///
/// Returns the scene together with the node-size array actually used, so the
/// caller can reuse the computed sizes without recomputation. Each style is
/// resolved exactly once: a provided array is used verbatim, the defaults are
/// the weighted-degree law for sizes and a by-value copy of the sizes for
/// colors.
pub fn compose(
    network: &BrainNetwork,
    atlas: &PositionAtlas,
    mesh: &SurfaceMesh,
    size_style: NodeStyle,
    color_style: NodeStyle,
) -> Result<(Scene, Vec<f64>), PlotError> {
    let surface = mesh.shell()?;

    let sizes = match size_style {
        NodeStyle::Provided(values) => values,
        NodeStyle::FromDegree => node_sizes(network),
    };
    let colors = match color_style {
        NodeStyle::Provided(values) => values,
        NodeStyle::FromDegree => sizes.clone(),
    };

    atlas.ensure_covers(network)?;
    let markers = marker_trace(network, atlas, &sizes, &colors)?;
    let edges = edge_trace(flatten_edges(network, atlas)?);

    info!(
        "composed scene: {} vertices, {} faces, {} nodes, {} edges",
        surface.x.len(),
        surface.i.len(),
        markers.x.len(),
        network.edge_count()
    );

    let scene = Scene {
        surface,
        markers,
        edges,
        layout: Layout::default(),
    };
    Ok((scene, sizes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn fixtures() -> (BrainNetwork, PositionAtlas, SurfaceMesh) {
        let mut network = BrainNetwork::new(3);
        network.add_weighted_edge(NodeId(0), NodeId(1), 2.0);
        network.add_weighted_edge(NodeId(1), NodeId(2), 1.0);
        let atlas = PositionAtlas::parse("0 0 0\n1 0 0\n1 1 0\n").unwrap();
        let mesh =
            SurfaceMesh::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 2 4\n")
                .unwrap();
        (network, atlas, mesh)
    }

    #[test]
    fn test_compose_layout_constants() {
        let (network, atlas, mesh) = fixtures();
        let (scene, _) = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::FromDegree,
            NodeStyle::FromDegree,
        )
        .unwrap();

        assert!(!scene.layout.autosize);
        assert_eq!((scene.layout.width, scene.layout.height), (800, 800));
        assert_eq!(scene.layout.margin.left, 50);
        assert_eq!(scene.layout.margin.right, 50);
        assert_eq!(scene.layout.margin.bottom, 100);
        assert_eq!(scene.layout.margin.top, 100);
    }

    #[test]
    fn test_compose_defaults_color_from_a_distinct_size_copy() {
        let (network, atlas, mesh) = fixtures();
        let (mut scene, sizes) = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::FromDegree,
            NodeStyle::FromDegree,
        )
        .unwrap();

        assert_eq!(scene.markers.colors, sizes);
        // mutating the color array must not touch the returned sizes
        scene.markers.colors[0] = 99.0;
        assert!((sizes[0] - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_compose_uses_overrides_verbatim() {
        let (network, atlas, mesh) = fixtures();
        let supplied_sizes = vec![3.0, 4.0, 5.0];
        let supplied_colors = vec![0.25, 0.5, 0.75];

        let (scene, sizes) = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::Provided(supplied_sizes.clone()),
            NodeStyle::Provided(supplied_colors.clone()),
        )
        .unwrap();

        assert_eq!(sizes, supplied_sizes);
        assert_eq!(scene.markers.colors, supplied_colors);
        assert_eq!(scene.markers.sizes, vec![30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let (network, atlas, mesh) = fixtures();
        let run = || {
            compose(
                &network,
                &atlas,
                &mesh,
                NodeStyle::FromDegree,
                NodeStyle::FromDegree,
            )
            .unwrap()
        };

        let (first_scene, first_sizes) = run();
        let (second_scene, second_sizes) = run();

        assert_eq!(first_sizes, second_sizes);
        assert_eq!(first_scene, second_scene);
    }

    #[test]
    fn test_compose_short_atlas_fails_before_any_primitive_is_built() {
        let (network, _, mesh) = fixtures();
        let atlas = PositionAtlas::parse("0 0 0\n1 0 0\n").unwrap();

        let err = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::FromDegree,
            NodeStyle::FromDegree,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlotError::NodeCountMismatch { node: NodeId(2), rows: 2 }
        ));
    }

    #[test]
    fn test_compose_zero_edges_keeps_an_empty_line_primitive() {
        let (_, atlas, mesh) = fixtures();
        let network = BrainNetwork::new(3);

        let (scene, _) = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::FromDegree,
            NodeStyle::FromDegree,
        )
        .unwrap();

        assert!(scene.edges.x.is_empty());
        assert_eq!(scene.edges.color, "black");
    }

    #[test]
    fn test_scene_json_export() {
        let (network, atlas, mesh) = fixtures();
        let (scene, _) = compose(
            &network,
            &atlas,
            &mesh,
            NodeStyle::FromDegree,
            NodeStyle::FromDegree,
        )
        .unwrap();

        let json = scene.to_json().unwrap();
        assert!(json.contains("\"name\": \"Brain Shell\""));
        assert!(json.contains("\"width\": 800"));
        // break sentinels serialize as nulls inside the edge buffers
        assert!(json.contains("null"));
        // draw order: surface before markers before edges
        let surface_at = json.find("\"surface\"").unwrap();
        let markers_at = json.find("\"markers\"").unwrap();
        let edges_at = json.find("\"edges\"").unwrap();
        assert!(surface_at < markers_at && markers_at < edges_at);
    }
}

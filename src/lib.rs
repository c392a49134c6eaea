//! Interactive 3D scenes of brain connectivity networks.
//!
//! One pipeline: wrap an anatomical surface mesh as a translucent shell,
//! encode per-node size and color from the network's weighted degrees, place
//! nodes at coordinates from an atlas file, flatten edges into disjoint line
//! segments, and compose everything into a single renderable [`scene::Scene`]
//! handed to a display collaborator.

pub mod atlas;
pub mod demo;
pub mod error;
pub mod graph;
pub mod mesh;
pub mod render;
pub mod scene;

use std::path::Path;

pub use atlas::PositionAtlas;
pub use error::{MeshDefect, PlotError};
pub use graph::{BrainNetwork, Edge, NodeId};
pub use mesh::SurfaceMesh;
pub use render::{BevyRender, Render};
pub use scene::{NodeStyle, Scene};

/// Compose the brain-network scene and hand it to the renderer.
///
/// Reads the coordinate table from `positions_path` and the surface mesh from
/// `mesh_path`; `node_size` and `node_color` override the degree-derived
/// defaults when given. Returns the renderer's display handle together with
/// the node-size array actually used, so callers can reuse the computed
/// sizes. Any failure aborts the whole call before rendering starts.
pub fn plot_brain_network<R: Render>(
    renderer: &R,
    network: &BrainNetwork,
    positions_path: &Path,
    mesh_path: &Path,
    node_size: Option<Vec<f64>>,
    node_color: Option<Vec<f64>>,
) -> Result<(R::Handle, Vec<f64>), PlotError> {
    let mesh = SurfaceMesh::read_obj(mesh_path)?;
    let atlas = PositionAtlas::load(positions_path)?;
    let (scene, sizes) = scene::compose(
        network,
        &atlas,
        &mesh,
        NodeStyle::from_override(node_size),
        NodeStyle::from_override(node_color),
    )?;
    Ok((renderer.display(scene), sizes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Pass-through renderer: the handle is the scene itself.
    struct SceneRender;

    impl Render for SceneRender {
        type Handle = Scene;

        fn display(&self, scene: Scene) -> Scene {
            scene
        }
    }

    fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
        let positions = dir.join("positions.txt");
        fs::write(&positions, "0 0 0\n1 0 0\n1 1 0\n").unwrap();
        let mesh = dir.join("shell.obj");
        fs::write(&mesh, "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 2 4\n").unwrap();
        (positions, mesh)
    }

    fn two_edge_network() -> BrainNetwork {
        let mut network = BrainNetwork::new(3);
        network.add_weighted_edge(NodeId(0), NodeId(1), 2.0);
        network.add_weighted_edge(NodeId(1), NodeId(2), 1.0);
        network
    }

    #[test]
    fn test_plot_brain_network_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let (positions, mesh) = write_fixtures(dir.path());
        let network = two_edge_network();

        let (scene, sizes) =
            plot_brain_network(&SceneRender, &network, &positions, &mesh, None, None).unwrap();

        for (actual, expected) in sizes.iter().zip([1.4, 1.6, 1.2]) {
            assert!((actual - expected).abs() < 1e-9);
        }
        assert_eq!(
            scene.edges.x,
            vec![Some(0.0), Some(1.0), None, Some(1.0), Some(1.0), None]
        );
        assert_eq!(scene.surface.name, "Brain Shell");
        assert_eq!((scene.layout.width, scene.layout.height), (800, 800));
    }

    #[test]
    fn test_plot_brain_network_returns_supplied_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let (positions, mesh) = write_fixtures(dir.path());
        let network = two_edge_network();
        let supplied = vec![2.0, 2.0, 2.0];

        let (scene, sizes) = plot_brain_network(
            &SceneRender,
            &network,
            &positions,
            &mesh,
            Some(supplied.clone()),
            None,
        )
        .unwrap();

        assert_eq!(sizes, supplied);
        // defaulted colors copy the supplied sizes
        assert_eq!(scene.markers.colors, supplied);
        assert_eq!(scene.markers.sizes, vec![20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_plot_brain_network_passes_io_errors_through() {
        let dir = tempfile::tempdir().unwrap();
        let (positions, _) = write_fixtures(dir.path());
        let network = two_edge_network();

        let err = plot_brain_network(
            &SceneRender,
            &network,
            &positions,
            &dir.path().join("missing.obj"),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::Io(_)));
    }

    #[test]
    fn test_plot_brain_network_short_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let (positions, mesh) = write_fixtures(dir.path());
        fs::write(&positions, "0 0 0\n1 0 0\n").unwrap();
        let network = two_edge_network();

        let err =
            plot_brain_network(&SceneRender, &network, &positions, &mesh, None, None).unwrap_err();
        assert!(matches!(
            err,
            PlotError::NodeCountMismatch { node: NodeId(2), rows: 2 }
        ));
    }
}

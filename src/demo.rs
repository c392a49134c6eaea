//! Synthetic network and shell for running the viewer without data files.

use std::f64::consts::{PI, TAU};

use bevy::math::DVec3;
use rand::Rng;

use crate::atlas::PositionAtlas;
use crate::graph::{BrainNetwork, NodeId};
use crate::mesh::SurfaceMesh;

/// Radius of the synthetic node cloud, in the same arbitrary units the
/// viewer frames automatically.
const CLOUD_RADIUS: f64 = 80.0;
/// Shell sits just outside the node cloud.
const SHELL_SCALE: f64 = 1.15;
/// Pairs closer than this fraction of the radius are candidate edges.
const NEIGHBOR_CUTOFF: f64 = 0.45;
/// Chance a candidate pair actually becomes an edge.
const EDGE_PROBABILITY: f64 = 0.55;

const GOLDEN_ANGLE: f64 = 2.399963229728653;

/// A random geometric network over nodes spread on a Fibonacci sphere.
/// Edge weights grow with proximity, so tight pairs plot as heavy links.
pub fn network(node_count: usize) -> (BrainNetwork, PositionAtlas) {
    let points = fibonacci_sphere(node_count, CLOUD_RADIUS);
    let mut network = BrainNetwork::new(node_count);
    let mut rng = rand::rng();

    let cutoff = CLOUD_RADIUS * NEIGHBOR_CUTOFF;
    for a in 0..node_count {
        for b in (a + 1)..node_count {
            let distance = points[a].distance(points[b]);
            if distance < cutoff && rng.random_bool(EDGE_PROBABILITY) {
                network.add_weighted_edge(NodeId(a), NodeId(b), cutoff / distance);
            }
        }
    }
    (network, PositionAtlas::from_points(points))
}

fn fibonacci_sphere(count: usize, radius: f64) -> Vec<DVec3> {
    (0..count)
        .map(|index| {
            let y = 1.0 - 2.0 * (index as f64 + 0.5) / count as f64;
            let ring = (1.0 - y * y).sqrt();
            let theta = GOLDEN_ANGLE * index as f64;
            DVec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius
        })
        .collect()
}

/// UV-sphere shell slightly larger than the node cloud, with a single face
/// block so it passes straight through the mesh adapter.
pub fn shell_mesh(rings: usize, segments: usize) -> SurfaceMesh {
    let radius = CLOUD_RADIUS * SHELL_SCALE;
    let mut points = Vec::with_capacity((rings + 1) * segments);
    for ring in 0..=rings {
        let phi = PI * ring as f64 / rings as f64;
        for segment in 0..segments {
            let theta = TAU * segment as f64 / segments as f64;
            points.push(
                DVec3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                ) * radius,
            );
        }
    }

    let vertex = |ring: usize, segment: usize| (ring * segments + segment % segments) as u32;
    let mut faces = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let a = vertex(ring, segment);
            let b = vertex(ring, segment + 1);
            let c = vertex(ring + 1, segment);
            let d = vertex(ring + 1, segment + 1);
            // skip the degenerate triangle at each pole
            if ring > 0 {
                faces.push([a, b, d]);
            }
            if ring < rings - 1 {
                faces.push([a, d, c]);
            }
        }
    }

    SurfaceMesh {
        points,
        face_blocks: vec![faces],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_covers_every_node() {
        let (network, atlas) = network(32);

        assert_eq!(network.node_count(), 32);
        assert_eq!(atlas.len(), 32);
        assert!(atlas.ensure_covers(&network).is_ok());
    }

    #[test]
    fn test_network_nodes_sit_on_the_cloud_sphere() {
        let (_, atlas) = network(16);
        for node in 0..16 {
            let position = atlas.position(NodeId(node)).unwrap();
            assert!((position.length() - CLOUD_RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shell_mesh_is_a_single_closed_block() {
        let mesh = shell_mesh(12, 16);

        assert_eq!(mesh.points.len(), 13 * 16);
        assert_eq!(mesh.face_blocks.len(), 1);
        // 2 triangles per quad, minus one per pole cap quad
        assert_eq!(mesh.face_blocks[0].len(), 16 * (2 * 12 - 2));
        assert!(mesh.shell().is_ok());
    }

    #[test]
    fn test_shell_mesh_faces_reference_real_vertices() {
        let mesh = shell_mesh(6, 8);
        let vertex_count = mesh.points.len() as u32;
        for face in &mesh.face_blocks[0] {
            assert!(face.iter().all(|&corner| corner < vertex_count));
        }
    }
}

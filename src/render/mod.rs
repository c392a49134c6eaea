mod camera;
mod colormap;
mod spawn;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::scene::Scene;

/// Display collaborator: consumes a composed scene and yields an opaque
/// display handle. The pipeline never looks inside the handle.
pub trait Render {
    type Handle;

    fn display(&self, scene: Scene) -> Self::Handle;
}

/// bevy-backed renderer. The handle is a fully configured [`App`]; running it
/// opens the interactive viewer window.
pub struct BevyRender;

impl Render for BevyRender {
    type Handle = App;

    fn display(&self, scene: Scene) -> App {
        let layout = scene.layout.clone();
        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Connectome".into(),
                resolution: WindowResolution::new(layout.width, layout.height),
                resizable: layout.autosize,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(SceneData(scene))
        .add_plugins(ViewerPlugin);
        app
    }
}

/// The composed scene, parked as a resource for the spawn systems.
#[derive(Resource)]
pub struct SceneData(pub Scene);

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (camera::setup_camera, spawn::spawn_scene).chain(),
        )
        .add_systems(Update, (camera::orbit_camera, spawn::toggle_shell));
    }
}

/// Center and half-extent of everything drawable in the scene. Falls back to
/// a unit box around the origin for an empty scene.
pub(crate) fn bounds(scene: &Scene) -> (Vec3, f32) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    {
        let mut extend = |x: f64, y: f64, z: f64| {
            let point = Vec3::new(x as f32, y as f32, z as f32);
            min = min.min(point);
            max = max.max(point);
        };
        for idx in 0..scene.surface.x.len() {
            extend(scene.surface.x[idx], scene.surface.y[idx], scene.surface.z[idx]);
        }
        for idx in 0..scene.markers.x.len() {
            extend(scene.markers.x[idx], scene.markers.y[idx], scene.markers.z[idx]);
        }
    }
    if min.x > max.x {
        return (Vec3::ZERO, 1.0);
    }
    let center = (min + max) * 0.5;
    let half_extent = ((max - min) * 0.5).max_element().max(1e-3);
    (center, half_extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::PositionAtlas;
    use crate::graph::{BrainNetwork, NodeId};
    use crate::mesh::SurfaceMesh;
    use crate::scene::{NodeStyle, compose};

    fn sample_scene() -> Scene {
        let mut network = BrainNetwork::new(2);
        network.add_edge(NodeId(0), NodeId(1));
        let atlas = PositionAtlas::parse("-2 0 0\n2 4 0\n").unwrap();
        let mesh = SurfaceMesh::parse_obj("v 0 0 -1\nv 1 0 0\nv 0 1 1\nf 1 2 3\n").unwrap();
        compose(&network, &atlas, &mesh, NodeStyle::FromDegree, NodeStyle::FromDegree)
            .unwrap()
            .0
    }

    #[test]
    fn test_bounds_cover_surface_and_markers() {
        let (center, half_extent) = bounds(&sample_scene());

        // x spans [-2, 2], y spans [0, 4], z spans [-1, 1]
        assert_eq!(center, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(half_extent, 2.0);
    }

    #[test]
    fn test_bounds_of_empty_scene_fall_back_to_unit_box() {
        let mut scene = sample_scene();
        scene.surface.x.clear();
        scene.surface.y.clear();
        scene.surface.z.clear();
        scene.markers.x.clear();
        scene.markers.y.clear();
        scene.markers.z.clear();

        assert_eq!(bounds(&scene), (Vec3::ZERO, 1.0));
    }
}

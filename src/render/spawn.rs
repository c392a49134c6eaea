use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::prelude::*;

use super::camera::MainCamera;
use super::{SceneData, colormap};
use crate::scene::{LinePrimitive, MarkerPrimitive, Scene, SurfacePrimitive};

/// Tag for the shell entity so its visibility can be toggled.
#[derive(Component)]
pub struct ShellSurface;

const COLORBAR_STRIPS: usize = 24;
/// Depth at which camera-anchored overlay quads sit.
const OVERLAY_DEPTH: f32 = 10.0;
/// Vertical field of view of the default perspective projection.
const CAMERA_FOV: f32 = std::f32::consts::FRAC_PI_4;

/// Turn the composed scene into renderable entities, in draw order: shell
/// first, then node markers, then edge segments, then the scale legend.
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cameras: Query<Entity, With<MainCamera>>,
    scene: Res<SceneData>,
) {
    let scene = &scene.0;
    let (_, half_extent) = super::bounds(scene);
    // rough canvas-pixel to world-unit conversion for diameters and widths
    let px_to_world = 2.0 * half_extent / scene.layout.height as f32;

    spawn_shell(&mut commands, &mut meshes, &mut materials, &scene.surface);
    spawn_markers(&mut commands, &mut meshes, &mut materials, &scene.markers, px_to_world);
    spawn_edges(&mut commands, &mut meshes, &mut materials, &scene.edges, px_to_world);
    if let Ok(camera) = cameras.single() {
        spawn_colorbar(&mut commands, &mut meshes, &mut materials, scene, camera);
    }

    info!("scene spawned; press S to toggle the shell");
}

/// Toggle shell visibility, the "uncover" affordance the surface legend
/// entry stands for.
pub fn toggle_shell(
    keys: Res<ButtonInput<KeyCode>>,
    scene: Res<SceneData>,
    mut shells: Query<&mut Visibility, With<ShellSurface>>,
) {
    if !scene.0.surface.show_legend || !keys.just_pressed(KeyCode::KeyS) {
        return;
    }
    for mut visibility in &mut shells {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}

fn surface_mesh(surface: &SurfacePrimitive) -> Mesh {
    let mut positions = Vec::with_capacity(surface.x.len());
    for idx in 0..surface.x.len() {
        positions.push([
            surface.x[idx] as f32,
            surface.y[idx] as f32,
            surface.z[idx] as f32,
        ]);
    }
    let mut indices = Vec::with_capacity(surface.i.len() * 3);
    for face in 0..surface.i.len() {
        indices.extend([surface.i[face], surface.j[face], surface.k[face]]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh.compute_smooth_normals();
    mesh
}

fn spawn_shell(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    surface: &SurfacePrimitive,
) {
    let mesh = meshes.add(surface_mesh(surface));
    let material = materials.add(StandardMaterial {
        base_color: paint(&surface.color).with_alpha(surface.opacity as f32),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.9,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        ShellSurface,
    ));
}

fn spawn_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    markers: &MarkerPrimitive,
    px_to_world: f32,
) {
    let sphere = meshes.add(Sphere::new(0.5));
    let ts = colormap::normalize(&markers.colors);
    for idx in 0..markers.x.len() {
        let (Some(&diameter), Some(&t)) = (markers.sizes.get(idx), ts.get(idx)) else {
            break;
        };
        let tint = colormap::sample(t);
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(tint.x, tint.y, tint.z, markers.opacity as f32),
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        let scale = (diameter as f32 * px_to_world).max(f32::EPSILON);
        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::from_xyz(
                markers.x[idx] as f32,
                markers.y[idx] as f32,
                markers.z[idx] as f32,
            )
            .with_scale(Vec3::splat(scale)),
        ));
    }
}

fn spawn_edges(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    edges: &LinePrimitive,
    px_to_world: f32,
) {
    let segments = line_segments(edges);
    if segments.is_empty() {
        return;
    }

    let cylinder = meshes.add(Cylinder::new(0.5, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: paint(&edges.color).with_alpha(edges.opacity as f32),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let thickness = (edges.width as f32 * px_to_world).max(f32::EPSILON);

    for (from, to) in segments {
        let axis = to - from;
        let length = axis.length();
        if length <= f32::EPSILON {
            // self-loops collapse to a point; nothing to draw
            continue;
        }
        let rotation = Quat::from_rotation_arc(Vec3::Y, axis / length);
        commands.spawn((
            Mesh3d(cylinder.clone()),
            MeshMaterial3d(material.clone()),
            Transform {
                translation: (from + to) * 0.5,
                rotation,
                scale: Vec3::new(thickness, length, thickness),
            },
        ));
    }
}

/// Camera-anchored gradient bar standing in for the marker scale legend.
fn spawn_colorbar(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene: &Scene,
    camera: Entity,
) {
    if !scene.markers.show_scale {
        return;
    }
    let layout = &scene.layout;
    let bar = &scene.markers.colorbar;

    let view_height = 2.0 * OVERLAY_DEPTH * (CAMERA_FOV * 0.5).tan();
    let view_width = view_height * layout.width as f32 / layout.height as f32;
    let bar_height = view_height * bar.len as f32;
    let bar_width = view_width * bar.thickness as f32 / layout.width as f32;
    let x = view_width * (bar.x as f32 - 0.5);
    // vertical margins shift the bar center; symmetric margins cancel out
    let y_offset = view_height * (layout.margin.bottom as f32 - layout.margin.top as f32)
        / (2.0 * layout.height as f32);

    let strip = meshes.add(
        Plane3d::default()
            .mesh()
            .size(bar_width, bar_height / COLORBAR_STRIPS as f32),
    );
    for index in 0..COLORBAR_STRIPS {
        let t = (index as f32 + 0.5) / COLORBAR_STRIPS as f32;
        let tint = colormap::sample(t);
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(tint.x, tint.y, tint.z),
            unlit: true,
            cull_mode: None,
            ..default()
        });
        let y = y_offset + bar_height * (t - 0.5);
        let entity = commands
            .spawn((
                Mesh3d(strip.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(x, y, -OVERLAY_DEPTH)
                    .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            ))
            .id();
        commands.entity(camera).add_child(entity);
    }
}

fn paint(name: &str) -> Color {
    match name {
        "grey" | "gray" => Color::srgb(0.5, 0.5, 0.5),
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        _ => Color::srgb(0.8, 0.2, 0.8),
    }
}

/// Split the per-axis buffers into drawable segments at each break sentinel.
fn line_segments(line: &LinePrimitive) -> Vec<(Vec3, Vec3)> {
    let mut segments = Vec::new();
    let mut run: Vec<Vec3> = Vec::new();
    for idx in 0..line.x.len() {
        let y = line.y.get(idx).copied().flatten();
        let z = line.z.get(idx).copied().flatten();
        match (line.x[idx], y, z) {
            (Some(x), Some(y), Some(z)) => {
                run.push(Vec3::new(x as f32, y as f32, z as f32));
            }
            _ => flush_run(&mut run, &mut segments),
        }
    }
    flush_run(&mut run, &mut segments);
    segments
}

fn flush_run(run: &mut Vec<Vec3>, segments: &mut Vec<(Vec3, Vec3)>) {
    for pair in run.windows(2) {
        segments.push((pair[0], pair[1]));
    }
    run.clear();
}

use std::f32::consts::FRAC_PI_4;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::SceneData;

/// Radians of orbit per pixel of drag.
const DRAG_SENSITIVITY: f32 = 0.008;
const ZOOM_STEP_PER_LINE: f32 = 0.1;
const ZOOM_STEP_PER_PIXEL: f32 = 0.002;
/// Keep the pitch shy of the poles so `looking_at` never degenerates.
const PITCH_LIMIT: f32 = 1.5;

#[derive(Component)]
pub struct MainCamera;

/// Orbit state around the scene center.
#[derive(Resource, Debug)]
pub struct OrbitState {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitState {
    fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        ) * self.radius;
        self.target + offset
    }
}

/// Spawn a perspective camera orbiting the scene bounds, plus lighting.
pub fn setup_camera(mut commands: Commands, scene: Res<SceneData>) {
    let (center, half_extent) = super::bounds(&scene.0);
    let state = OrbitState {
        target: center,
        radius: (half_extent * 3.0).max(1.0),
        yaw: FRAC_PI_4,
        pitch: 0.5,
    };

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(state.eye()).looking_at(state.target, Vec3::Y),
        MainCamera,
    ));
    commands.insert_resource(state);

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(center + Vec3::new(1.0, 2.0, 1.5) * half_extent)
            .looking_at(center, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 250.0,
        ..default()
    });
}

/// Drag to orbit, scroll to zoom.
pub fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    mut state: ResMut<OrbitState>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let mut moved = false;
    if buttons.pressed(MouseButton::Left) {
        for ev in motion.read() {
            state.yaw += ev.delta.x * DRAG_SENSITIVITY;
            state.pitch =
                (state.pitch + ev.delta.y * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            moved = true;
        }
    } else {
        motion.clear();
    }

    for ev in wheel.read() {
        let step = match ev.unit {
            MouseScrollUnit::Line => ev.y * ZOOM_STEP_PER_LINE,
            MouseScrollUnit::Pixel => ev.y * ZOOM_STEP_PER_PIXEL,
        };
        state.radius = (state.radius * (1.0 - step).clamp(0.2, 5.0)).max(0.05);
        moved = true;
    }

    if !moved {
        return;
    }
    if let Ok(mut transform) = cameras.single_mut() {
        *transform = Transform::from_translation(state.eye()).looking_at(state.target, Vec3::Y);
    }
}

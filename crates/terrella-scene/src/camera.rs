//! Orbit camera controls

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub distance: f32,
    pub target_distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        // Spherical equivalent of the initial pose at (12, 5, 4)
        let initial = Vec3::new(12.0, 5.0, 4.0);
        let distance = initial.length();
        Self {
            distance,
            target_distance: distance,
            azimuth: initial.x.atan2(initial.z),
            elevation: (initial.y / distance).asin(),
            sensitivity: 0.005,
            zoom_speed: 0.1,
            smooth_factor: 0.15,
        }
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera setup and orbit controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, update_camera);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 25.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_xyz(12.0, 5.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Orbit the camera around the globe with the polar axis up
pub(crate) fn update_camera(
    mut cameras: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut contexts: bevy_egui::EguiContexts,
) {
    // Don't process camera controls while the panel owns the pointer
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let motion = mouse_motion.delta;
    if mouse_button.pressed(MouseButton::Left) && !egui_wants_pointer && motion != Vec2::ZERO {
        settings.azimuth -= motion.x * settings.sensitivity;
        settings.elevation =
            (settings.elevation - motion.y * settings.sensitivity).clamp(-1.5, 1.5);
    }

    // Smooth zoom via target_distance
    if !egui_wants_pointer && mouse_scroll.delta.y != 0.0 {
        let zoom_factor = 1.0 - mouse_scroll.delta.y * settings.zoom_speed * 0.3;
        settings.target_distance = (settings.target_distance * zoom_factor).clamp(4.0, 40.0);
    }

    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    settings.distance += (settings.target_distance - settings.distance) * lerp_factor;

    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let x = settings.distance * settings.elevation.cos() * settings.azimuth.sin();
    let y = settings.distance * settings.elevation.sin();
    let z = settings.distance * settings.elevation.cos() * settings.azimuth.cos();
    transform.translation = Vec3::new(x, y, z);
    transform.look_at(Vec3::ZERO, Vec3::Y);
}

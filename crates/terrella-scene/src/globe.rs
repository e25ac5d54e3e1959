//! Globe and atmosphere scene setup

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use terrella_core::GLOBE_RADIUS;

/// Globe radius in render units
pub const RADIUS: f32 = GLOBE_RADIUS as f32;

/// Scale of the atmosphere shell relative to the globe surface
const ATMOSPHERE_SCALE: f32 = 1.04;

/// Alpha of the atmosphere shell, kept constant while its tint changes
pub(crate) const ATMOSPHERE_ALPHA: f32 = 0.18;

/// Marker component for the globe surface mesh
#[derive(Component)]
pub struct GlobeSurface;

/// Marker component for the atmosphere shell
#[derive(Component)]
pub struct AtmosphereShell;

/// Globe behavior settings
#[derive(Debug, Clone, Resource)]
pub struct GlobeSettings {
    /// Spin rate about the polar axis in radians per second, 0 disables
    pub spin_speed: f32,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self { spin_speed: 0.0 }
    }
}

/// Shared handles created at startup and reused by marker spawning
#[derive(Debug, Clone, Resource)]
pub struct GlobeAssets {
    pub stem_mesh: Handle<Mesh>,
    pub stem_material: Handle<StandardMaterial>,
}

/// Plugin for the globe, atmosphere, and ambient lighting
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlobeSettings>()
            .add_systems(Startup, setup_globe)
            .add_systems(Update, spin_globe);
    }
}

fn setup_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Low ambient fill so the night side stays readable
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.7, 0.8, 1.0),
        brightness: 120.0,
        ..default()
    });

    let sphere = meshes.add(Sphere::new(RADIUS).mesh().uv(64, 64));

    // The surface mesh carries the name token the occlusion pass filters on
    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.28, 0.52),
            perceptual_roughness: 0.85,
            ..default()
        })),
        Transform::default(),
        Name::new("earth"),
        GlobeSurface,
    ));

    // Inside-out translucent shell, slightly larger than the surface
    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.0, 0.667, 1.0, ATMOSPHERE_ALPHA),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            cull_mode: Some(Face::Front),
            ..default()
        })),
        Transform::from_scale(Vec3::splat(ATMOSPHERE_SCALE)),
        Name::new("atmosphere"),
        AtmosphereShell,
    ));

    // Stems share one mesh: a thin cylinder reaching from the globe center
    // to 0.5 beyond the surface, re-oriented per marker at spawn time.
    let stem_length = RADIUS + 0.5;
    let stem_mesh = meshes.add(Cylinder::new(0.004, stem_length));
    let stem_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.85, 0.2),
        unlit: true,
        ..default()
    });

    commands.insert_resource(GlobeAssets {
        stem_mesh,
        stem_material,
    });
}

fn spin_globe(
    settings: Res<GlobeSettings>,
    time: Res<Time>,
    mut globes: Query<&mut Transform, With<GlobeSurface>>,
) {
    if settings.spin_speed == 0.0 {
        return;
    }
    let Ok(mut transform) = globes.single_mut() else {
        return;
    };
    transform.rotate_y(settings.spin_speed * time.delta_secs());
}

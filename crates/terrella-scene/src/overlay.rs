//! Per-frame occlusion and screen placement of marker overlays

use bevy::prelude::*;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};

use terrella_core::{screen_offset, Occlusion, SurfaceHit};

use crate::camera::{update_camera, MainCamera};
use crate::globe::GlobeSurface;
use crate::markers::{MarkerOverlay, Markers};

/// Plugin for the frame passes: occlusion first, then screen placement,
/// both after camera movement
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (resolve_marker_occlusion, project_marker_overlays)
                .chain()
                .after(update_camera),
        );
    }
}

/// Hide markers whose anchor the globe surface blocks from the camera.
///
/// Each anchor is projected to normalized device coordinates and a ray is
/// cast back through that point into the scene, like a pointer pick at the
/// marker's screen position. The distance verdict is pure core logic.
fn resolve_marker_occlusion(
    markers: Res<Markers>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    globes: Query<&GlobalTransform, With<GlobeSurface>>,
    names: Query<&Name>,
    mut ray_cast: MeshRayCast,
    mut overlays: Query<(&MarkerOverlay, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(globe_transform) = globes.single() else {
        return;
    };

    // Intersect everything; non-globe hits are filtered out of the verdict,
    // not out of the cast.
    let filter = |_entity: Entity| true;
    let early_exit_test = |_entity: Entity| false;
    let settings = MeshRayCastSettings {
        visibility: RayCastVisibility::Any,
        filter: &filter,
        early_exit_test: &early_exit_test,
    };

    for (overlay, mut visibility) in &mut overlays {
        let Some(record) = markers.registry.get(overlay.id) else {
            continue;
        };
        let anchor = globe_transform.transform_point(anchor_to_vec3(record.anchor));
        let verdict = anchor_occlusion(
            camera,
            camera_transform,
            anchor,
            &names,
            &mut ray_cast,
            &settings,
        );
        *visibility = match verdict {
            Occlusion::Visible => Visibility::Visible,
            Occlusion::Hidden => Visibility::Hidden,
        };
    }
}

fn anchor_occlusion(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    anchor: Vec3,
    names: &Query<&Name>,
    ray_cast: &mut MeshRayCast,
    settings: &MeshRayCastSettings,
) -> Occlusion {
    // A failed projection (degenerate NaN anchor) cannot intersect anything
    let Some(ndc) = camera.world_to_ndc(camera_transform, anchor) else {
        return Occlusion::Visible;
    };
    let origin = camera_transform.translation();
    let Some(probe) = camera.ndc_to_world(camera_transform, Vec3::new(ndc.x, ndc.y, 0.5)) else {
        return Occlusion::Visible;
    };
    let Ok(direction) = Dir3::new(probe - origin) else {
        return Occlusion::Visible;
    };

    let hits: Vec<SurfaceHit> = ray_cast
        .cast_ray(Ray3d::new(origin, direction), settings)
        .iter()
        .map(|(entity, hit)| SurfaceHit {
            globe: names
                .get(*entity)
                .is_ok_and(|name| name.as_str() == "earth"),
            distance: hit.distance as f64,
        })
        .collect();

    terrella_core::occlusion::resolve(&hits, origin.distance(anchor) as f64)
}

/// Place each overlay at the viewport center plus its projected offset
fn project_marker_overlays(
    markers: Res<Markers>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    globes: Query<&GlobalTransform, With<GlobeSurface>>,
    mut overlays: Query<(&MarkerOverlay, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(globe_transform) = globes.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };

    for (overlay, mut node) in &mut overlays {
        let Some(record) = markers.registry.get(overlay.id) else {
            continue;
        };
        let anchor = globe_transform.transform_point(anchor_to_vec3(record.anchor));
        let Some(ndc) = camera.world_to_ndc(camera_transform, anchor) else {
            continue;
        };
        let offset = screen_offset(
            ndc.x as f64,
            ndc.y as f64,
            viewport.x as f64,
            viewport.y as f64,
        );
        node.left = Val::Px(viewport.x * 0.5 + offset[0] as f32);
        node.top = Val::Px(viewport.y * 0.5 + offset[1] as f32);
    }
}

fn anchor_to_vec3(anchor: [f64; 3]) -> Vec3 {
    Vec3::new(anchor[0] as f32, anchor[1] as f32, anchor[2] as f32)
}

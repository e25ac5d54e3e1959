//! Marker spawning, selection, and registry state

use bevy::prelude::*;
use tracing::info;

use terrella_core::{anchor_point, seed_locations, GeoLocation, MarkerId, MarkerRegistry, GLOBE_RADIUS};

use crate::globe::{GlobeAssets, GlobeSurface, RADIUS};

/// The marker registry plus the scene entities spawned for each entry
#[derive(Resource, Default)]
pub struct Markers {
    pub registry: MarkerRegistry,
    pub spawned: Vec<MarkerEntities>,
}

/// Scene entities belonging to one registry entry
#[derive(Debug, Clone, Copy)]
pub struct MarkerEntities {
    pub id: MarkerId,
    pub overlay: Entity,
    pub stem: Entity,
}

/// Root overlay node of one marker, positioned by the screen projector and
/// shown or hidden by the occlusion pass
#[derive(Component)]
pub struct MarkerOverlay {
    pub id: MarkerId,
}

/// Clickable numbered badge of one marker
#[derive(Component)]
pub struct MarkerBadge {
    pub id: MarkerId,
}

/// Expandable text panel of one marker, visible only while selected
#[derive(Component)]
pub struct MarkerLabel {
    pub id: MarkerId,
}

/// Radial stem line of one marker, child of the globe node
#[derive(Component)]
pub struct MarkerStem {
    pub id: MarkerId,
}

/// Plugin for marker registration and selection
pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Markers>()
            .add_systems(PostStartup, seed_markers)
            .add_systems(Update, (handle_badge_clicks, sync_label_visibility).chain());
    }
}

/// Register a location and spawn its stem and overlay.
///
/// This is the single construction path for both seed locations and form
/// submissions; identifiers stay continuous across the two.
pub fn spawn_marker(
    commands: &mut Commands,
    markers: &mut Markers,
    assets: &GlobeAssets,
    globe: Entity,
    location: GeoLocation,
) -> MarkerId {
    let name = location.name.clone();
    let latitude = location.latitude;
    let longitude = location.longitude;
    let anchor = anchor_point(&location, GLOBE_RADIUS);
    let id = markers.registry.add(location, anchor);

    // Stem: from the globe center to 0.5 beyond the surface, parented to
    // the globe node so it follows any spin.
    let radial = Vec3::new(anchor[0] as f32, anchor[1] as f32, anchor[2] as f32);
    let stem_length = RADIUS + 0.5;
    let (translation, rotation) = match Dir3::new(radial) {
        Ok(dir) => (
            *dir * (stem_length * 0.5),
            Quat::from_rotation_arc(Vec3::Y, *dir),
        ),
        // Degenerate anchors keep their stem off-screen
        Err(_) => (Vec3::NAN, Quat::IDENTITY),
    };
    let stem = commands
        .spawn((
            Mesh3d(assets.stem_mesh.clone()),
            MeshMaterial3d(assets.stem_material.clone()),
            Transform {
                translation,
                rotation,
                ..default()
            },
            Name::new(format!("stem {id}")),
            MarkerStem { id },
        ))
        .id();
    commands.entity(globe).add_child(stem);

    // Overlay: a zero-size absolutely positioned root, badge and label
    // pre-centered around it. Parked off-screen until the first projection
    // pass places it.
    let overlay = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(-1000.0),
                top: Val::Px(-1000.0),
                ..default()
            },
            MarkerOverlay { id },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(-11.0),
                        top: Val::Px(-11.0),
                        width: Val::Px(22.0),
                        height: Val::Px(22.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderRadius::MAX,
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
                    MarkerBadge { id },
                ))
                .with_children(|badge| {
                    badge.spawn((
                        Text::new(id.to_string()),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });

            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(16.0),
                        top: Val::Px(-10.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(6.0)),
                        row_gap: Val::Px(2.0),
                        ..default()
                    },
                    BorderRadius::all(Val::Px(6.0)),
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    Visibility::Hidden,
                    MarkerLabel { id },
                ))
                .with_children(|label| {
                    label.spawn((
                        Text::new(name.clone()),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    label.spawn((
                        Text::new(format!("lat: {latitude}")),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.75, 0.75)),
                    ));
                    label.spawn((
                        Text::new(format!("lon: {longitude}")),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.75, 0.75)),
                    ));
                });
        })
        .id();

    markers.spawned.push(MarkerEntities { id, overlay, stem });
    info!(%id, %name, "registered location");
    id
}

/// Feed the seed list through the regular registration path
fn seed_markers(
    mut commands: Commands,
    mut markers: ResMut<Markers>,
    assets: Res<GlobeAssets>,
    globes: Query<Entity, With<GlobeSurface>>,
) {
    let Ok(globe) = globes.single() else {
        return;
    };
    for location in seed_locations() {
        spawn_marker(&mut commands, &mut markers, &assets, globe, location);
    }
}

/// Toggle selection when a badge is clicked; the registry enforces that at
/// most one marker is selected
fn handle_badge_clicks(
    interactions: Query<(&Interaction, &MarkerBadge), (Changed<Interaction>, With<Button>)>,
    mut markers: ResMut<Markers>,
) {
    for (interaction, badge) in &interactions {
        if *interaction == Interaction::Pressed {
            markers.registry.toggle_selected(badge.id);
        }
    }
}

/// Mirror the registry's selection onto label visibility
fn sync_label_visibility(
    markers: Res<Markers>,
    mut labels: Query<(&MarkerLabel, &mut Visibility)>,
) {
    if !markers.is_changed() {
        return;
    }
    let selected = markers.registry.selected();
    for (label, mut visibility) in &mut labels {
        *visibility = if selected == Some(label.id) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::GlobePlugin;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::system::SystemState;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();
        app.add_plugins((GlobePlugin, MarkersPlugin));
        app
    }

    #[test]
    fn test_seed_locations_register_in_order() {
        let mut app = test_app();
        app.update();

        let markers = app.world().resource::<Markers>();
        assert_eq!(markers.registry.len(), 3);
        assert_eq!(markers.spawned.len(), 3);

        let ids: Vec<u32> = markers.registry.all().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let names: Vec<&str> = markers
            .registry
            .all()
            .iter()
            .map(|r| r.location.name.as_str())
            .collect();
        assert_eq!(names, vec!["Moscow", "Melbourne", "Beijing"]);

        for record in markers.registry.all() {
            let [x, y, z] = record.anchor;
            let norm = (x * x + y * y + z * z).sqrt();
            assert!((norm - GLOBE_RADIUS).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stems_are_children_of_the_globe() {
        let mut app = test_app();
        app.update();

        let world = app.world_mut();
        let globe = world
            .query_filtered::<Entity, With<GlobeSurface>>()
            .single(world)
            .unwrap();
        let stem_count = world.get::<Children>(globe).map(|c| c.len()).unwrap_or(0);
        assert_eq!(stem_count, 3);

        let mut stem_ids: Vec<u32> = world
            .query::<&MarkerStem>()
            .iter(world)
            .map(|stem| stem.id.0)
            .collect();
        stem_ids.sort_unstable();
        assert_eq!(stem_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_badge_click_toggles_selection() {
        let mut app = test_app();
        app.update();

        let world = app.world_mut();
        let mut badges: Vec<(Entity, MarkerId)> = world
            .query::<(Entity, &MarkerBadge)>()
            .iter(world)
            .map(|(entity, badge)| (entity, badge.id))
            .collect();
        badges.sort_by_key(|(_, id)| id.0);
        let (badge_entity, badge_id) = badges[0];

        world.entity_mut(badge_entity).insert(Interaction::Pressed);
        app.update();
        assert_eq!(
            app.world().resource::<Markers>().registry.selected(),
            Some(badge_id)
        );

        app.world_mut()
            .entity_mut(badge_entity)
            .insert(Interaction::Pressed);
        app.update();
        assert_eq!(app.world().resource::<Markers>().registry.selected(), None);
    }

    #[test]
    fn test_only_selected_label_is_visible() {
        let mut app = test_app();
        app.update();

        app.world_mut()
            .resource_mut::<Markers>()
            .registry
            .toggle_selected(MarkerId(2));
        app.update();

        let world = app.world_mut();
        let mut visible = Vec::new();
        for (label, visibility) in world.query::<(&MarkerLabel, &Visibility)>().iter(world) {
            if *visibility != Visibility::Hidden {
                visible.push(label.id);
            }
        }
        assert_eq!(visible, vec![MarkerId(2)]);
    }

    #[test]
    fn test_form_submission_extends_seeded_numbering() {
        let mut app = test_app();
        app.update();

        // A submission after seeding continues the identifier sequence.
        let world = app.world_mut();
        let globe = world
            .query_filtered::<Entity, With<GlobeSurface>>()
            .single(world)
            .unwrap();
        let assets = world.resource::<GlobeAssets>().clone();
        let mut state: SystemState<(Commands, ResMut<Markers>)> = SystemState::new(world);
        {
            let (mut commands, mut markers) = state.get_mut(world);
            let id = spawn_marker(
                &mut commands,
                &mut markers,
                &assets,
                globe,
                GeoLocation::new(48.8566, 2.3522, "Paris"),
            );
            assert_eq!(id, MarkerId(4));
        }
        state.apply(world);

        let markers = app.world().resource::<Markers>();
        assert_eq!(markers.registry.len(), 4);
        assert_eq!(markers.registry.get(MarkerId(4)).unwrap().location.name, "Paris");
    }
}

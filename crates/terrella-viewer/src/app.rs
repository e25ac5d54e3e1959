//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{DefaultPickingPlugins, prelude::MeshPickingPlugin};

use terrella_scene::{GlobeSettings, TerrellaScenePlugin};

use crate::Args;

/// Run the Bevy application
pub fn run(args: &Args) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.067))) // Deep space background
        .insert_resource(GlobeSettings {
            spin_speed: args.spin,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terrella".to_string(),
                ..default()
            }),
            ..default()
        }))
        // DefaultPickingPlugins provides core picking (PointerInputPlugin, PickingPlugin, InteractionPlugin)
        // MeshPickingPlugin must be added separately for 3D mesh raycasting
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(TerrellaScenePlugin)
        .run();
}

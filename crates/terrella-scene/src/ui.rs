//! Control panel using bevy_egui

use std::f32::consts::PI;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use tracing::warn;

use terrella_core::LocationForm;

use crate::globe::{GlobeAssets, GlobeSurface};
use crate::markers::{spawn_marker, Markers};
use crate::sun::SunSettings;

/// Location form state plus the pending rejection notice
#[derive(Debug, Clone, Default, Resource)]
pub struct IntakeState {
    pub form: LocationForm,
    pub notice: Option<String>,
}

/// Grouped system parameters for the panel system to work around Bevy's 16-param limit
#[derive(SystemParam)]
pub struct UiParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub commands: Commands<'w, 's>,
    pub intake: ResMut<'w, IntakeState>,
    pub sun: ResMut<'w, SunSettings>,
    pub markers: ResMut<'w, Markers>,
    pub assets: Option<Res<'w, GlobeAssets>>,
    pub globes: Query<'w, 's, Entity, With<GlobeSurface>>,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IntakeState>()
            // Panel runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(mut params: UiParams) {
    // Get the egui context - early return if not available
    let Ok(ctx) = params.contexts.ctx_mut() else { return };

    egui::SidePanel::left("controls_panel")
        .default_width(230.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Locations");
            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut params.intake.form.latitude)
                    .hint_text("Latitude"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut params.intake.form.longitude)
                    .hint_text("Longitude"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut params.intake.form.name).hint_text("Town name"),
            );
            ui.add_space(4.0);
            if ui.button("Add location").clicked() {
                submit_location(
                    &mut params.intake,
                    &mut params.commands,
                    &mut params.markers,
                    params.assets.as_deref(),
                    &params.globes,
                );
            }

            ui.add_space(12.0);
            ui.heading("Sun");
            ui.separator();

            // Edit a copy so the settings only register as changed when a
            // control actually moved
            let mut sun = params.sun.clone();
            ui.add(egui::Slider::new(&mut sun.phi, 0.0..=PI).text("phi"));
            ui.add(egui::Slider::new(&mut sun.theta, -PI..=PI).text("theta"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut sun.day_color);
                ui.label("Day color");
            });
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut sun.twilight_color);
                ui.label("Twilight color");
            });
            if sun != *params.sun {
                *params.sun = sun;
            }
        });

    // Rejected submissions block the rest of the UI until acknowledged
    if let Some(notice) = params.intake.notice.clone() {
        egui::Modal::new(egui::Id::new("intake_notice")).show(ctx, |ui| {
            ui.label(notice);
            ui.add_space(4.0);
            if ui.button("OK").clicked() {
                params.intake.notice = None;
            }
        });
    }
}

/// Validate the form; on success register the marker, otherwise raise the
/// notice for the modal
fn submit_location(
    intake: &mut IntakeState,
    commands: &mut Commands,
    markers: &mut Markers,
    assets: Option<&GlobeAssets>,
    globes: &Query<Entity, With<GlobeSurface>>,
) {
    match intake.form.submit() {
        Ok(location) => {
            let Some(assets) = assets else { return };
            let Ok(globe) = globes.single() else { return };
            spawn_marker(commands, markers, assets, globe, location);
            intake.form.clear();
        }
        Err(error) => {
            warn!(%error, "rejected location submission");
            intake.notice = Some(error.to_string());
        }
    }
}

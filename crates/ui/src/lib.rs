use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod convoy_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin).add_systems(
            Update,
            (convoy_panel::convoy_panel_ui, convoy_panel::view_state_ui),
        );
    }
}

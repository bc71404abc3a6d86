mod dialogs;
mod export_panel;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<export_panel::ExportPanelState>()
            // Side panel must render first so top and bottom panels fit beside it
            // Use chain() to enforce ordering
            .add_systems(
                EguiPrimaryContextPass,
                (
                    export_panel::export_panel_ui,
                    toolbar::toolbar_ui,
                    toolbar::status_bar_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                // Last: dialogs/overlays
                dialogs::config_reset_notification_ui.after(toolbar::status_bar_ui),
            );
    }
}

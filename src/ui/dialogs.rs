use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::theme;

/// Shown once at startup when the config file could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");

            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.colored_label(theme::ui::ERROR_TEXT, reason.as_str());
            }

            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}

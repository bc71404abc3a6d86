mod camera;
mod grid;
mod input;
mod params;
mod rendering;
mod state;
pub mod tools;

pub use state::{ActiveDrawing, HoverState};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;

/// Systems that read input and mutate the drawing, in order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanvasInput;

pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveDrawing>()
            .init_resource::<HoverState>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    state::apply_config_to_drawing.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts,
                    input::handle_edit_shortcuts,
                    input::update_hover,
                    input::handle_pointer,
                )
                    .chain()
                    .in_set(CanvasInput),
            )
            .add_systems(
                Update,
                (
                    grid::draw_grid,
                    rendering::render_elements,
                    rendering::render_preview,
                    rendering::render_hover,
                    rendering::render_origin,
                    tools::update_cursor_icon,
                )
                    .after(CanvasInput),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (input::handle_text_entry, rendering::render_text_labels).chain(),
            );
    }
}

//! Mouse and keyboard handling for the canvas.
//!
//! Every handler turns one input event into one call on [`Drawing`], so the
//! scene and the in-progress shape are never observed half-updated.
//!
//! [`Drawing`]: crate::model::Drawing

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::StoreCanvasSettingsRequest;

use super::params::{egui_wants_keyboard, is_cursor_over_ui, CanvasParams};
use super::state::{ActiveDrawing, HoverHit, HoverState};

/// Track the pointer, its snapped position and the element under it
pub fn update_hover(
    active: Res<ActiveDrawing>,
    mut hover: ResMut<HoverState>,
    canvas: CanvasParams,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        hover.clear();
        return;
    }

    let Some(cursor) = canvas.cursor_point() else {
        hover.clear();
        return;
    };

    let hit = active
        .drawing
        .scene()
        .hit_test_indexed(cursor)
        .map(|(index, touch)| HoverHit {
            index,
            point_index: touch.point_index,
        });

    hover.cursor = Some(cursor);
    hover.snapped = Some(active.drawing.snap(cursor));
    hover.hit = hit;
}

/// Left click places a point, right click moves the origin, middle click closes a polygon
pub fn handle_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    hover: Res<HoverState>,
    mut active: ResMut<ActiveDrawing>,
    mut store_events: MessageWriter<StoreCanvasSettingsRequest>,
) {
    // Cleared while the pointer is over a panel or outside the window
    let Some(snapped) = hover.snapped else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) && active.drawing.add_point(snapped) {
        debug!("Committed element #{}", active.drawing.elements().len());
    }

    if mouse_button.just_pressed(MouseButton::Right) {
        active.drawing.set_origin(snapped);
        let scene = active.drawing.scene();
        store_events.write(StoreCanvasSettingsRequest {
            origin: scene.origin(),
            grid_step: scene.grid_step(),
        });
    }

    if mouse_button.just_pressed(MouseButton::Middle) && active.drawing.commit_polygon() {
        debug!("Closed polygon #{}", active.drawing.elements().len());
    }
}

/// Undo, clear, commit, cancel and label backspace
pub fn handle_edit_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut active: ResMut<ActiveDrawing>,
    mut contexts: EguiContexts,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }

    let ctrl = keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if ctrl && shift && keyboard.just_pressed(KeyCode::Delete) {
        active.drawing.clear_all();
        return;
    }

    if ctrl && keyboard.just_pressed(KeyCode::KeyZ) {
        active.drawing.undo();
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        active.drawing.cancel();
    }

    if keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter])
        && active.drawing.commit_pending()
    {
        debug!("Committed element #{}", active.drawing.elements().len());
    }

    if keyboard.just_pressed(KeyCode::Backspace) {
        active.drawing.backspace_text();
    }
}

/// Feed typed characters into the label while the text tool is collecting one.
///
/// Reads egui's text events so the characters respect the keyboard layout and
/// dead keys.
pub fn handle_text_entry(mut contexts: EguiContexts, mut active: ResMut<ActiveDrawing>) -> Result {
    if !active.drawing.builder().is_text_entry() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    if ctx.wants_keyboard_input() {
        return Ok(());
    }

    let typed: Vec<String> = ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    });

    for c in typed.iter().flat_map(|text| text.chars()) {
        active.drawing.append_text_char(c);
    }

    Ok(())
}

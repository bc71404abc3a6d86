use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::config::StoreCanvasSettingsRequest;
use crate::model::ElementKind;

use super::params::egui_wants_keyboard;
use super::state::ActiveDrawing;

/// Tools in toolbar order
pub const ALL_TOOLS: [ElementKind; 5] = [
    ElementKind::Line,
    ElementKind::Rect,
    ElementKind::Oval,
    ElementKind::Polygon,
    ElementKind::Text,
];

pub fn display_name(tool: ElementKind) -> &'static str {
    match tool {
        ElementKind::Line => "Line (L)",
        ElementKind::Rect => "Rectangle (R)",
        ElementKind::Oval => "Oval (O)",
        ElementKind::Polygon => "Polygon (P)",
        ElementKind::Text => "Text (T)",
    }
}

/// Short usage hint shown in the status bar
pub fn usage_hint(tool: ElementKind) -> &'static str {
    match tool {
        ElementKind::Line => "Click start and end points",
        ElementKind::Rect => "Click two opposite corners",
        ElementKind::Oval => "Click the centre, then a corner of the bounding box",
        ElementKind::Polygon => "Click vertices, Enter or middle click to close",
        ElementKind::Text => "Click to place, type, Enter to finish",
    }
}

pub fn cursor_icon(tool: ElementKind) -> CursorIcon {
    match tool {
        ElementKind::Text => CursorIcon::System(SystemCursorIcon::Text),
        _ => CursorIcon::System(SystemCursorIcon::Crosshair),
    }
}

pub fn tool_for_key(key: KeyCode) -> Option<ElementKind> {
    match key {
        KeyCode::KeyL => Some(ElementKind::Line),
        KeyCode::KeyR => Some(ElementKind::Rect),
        KeyCode::KeyO => Some(ElementKind::Oval),
        KeyCode::KeyP => Some(ElementKind::Polygon),
        KeyCode::KeyT => Some(ElementKind::Text),
        _ => None,
    }
}

pub fn grid_step_for_key(key: KeyCode) -> Option<i32> {
    match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Some(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Some(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Some(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Some(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Some(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Some(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Some(9),
        _ => None,
    }
}

fn modifier_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
        KeyCode::AltLeft,
        KeyCode::AltRight,
    ])
}

/// Letter keys pick a tool, digit keys pick the grid step
pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut active: ResMut<ActiveDrawing>,
    mut store_events: MessageWriter<StoreCanvasSettingsRequest>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field or into a label
    if egui_wants_keyboard(&mut contexts) || active.drawing.builder().is_text_entry() {
        return;
    }
    if modifier_held(&keyboard) {
        return;
    }

    for key in keyboard.get_just_pressed() {
        if let Some(tool) = tool_for_key(*key) {
            active.drawing.set_tool(tool);
        } else if let Some(step) = grid_step_for_key(*key) {
            active.drawing.set_grid_step(step);
            let scene = active.drawing.scene();
            store_events.write(StoreCanvasSettingsRequest {
                origin: scene.origin(),
                grid_step: scene.grid_step(),
            });
        }
    }
}

pub fn update_cursor_icon(
    active: Res<ActiveDrawing>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, _window)) = window_query.single_mut() else {
        return;
    };

    // Use default cursor over UI, tool cursor on the canvas
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands
        .entity(entity)
        .insert(cursor_icon(active.drawing.tool()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        for tool in ALL_TOOLS {
            let name = display_name(tool);
            assert!(name.contains('('), "Display name should contain shortcut: {}", name);
            assert!(name.contains(')'), "Display name should contain shortcut: {}", name);
        }
    }

    #[test]
    fn test_every_tool_has_a_key() {
        let keys = [
            KeyCode::KeyL,
            KeyCode::KeyR,
            KeyCode::KeyO,
            KeyCode::KeyP,
            KeyCode::KeyT,
        ];
        let mapped: Vec<ElementKind> = keys.iter().filter_map(|k| tool_for_key(*k)).collect();
        assert_eq!(mapped, ALL_TOOLS.to_vec());
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(tool_for_key(KeyCode::KeyQ), None);
        assert_eq!(grid_step_for_key(KeyCode::Digit0), None);
        assert_eq!(grid_step_for_key(KeyCode::KeyA), None);
    }

    #[test]
    fn test_digit_keys_map_to_grid_steps() {
        assert_eq!(grid_step_for_key(KeyCode::Digit1), Some(1));
        assert_eq!(grid_step_for_key(KeyCode::Digit5), Some(5));
        assert_eq!(grid_step_for_key(KeyCode::Numpad9), Some(9));
    }

    #[test]
    fn test_text_tool_has_text_cursor() {
        assert_eq!(
            cursor_icon(ElementKind::Text),
            CursorIcon::System(SystemCursorIcon::Text)
        );
        assert_eq!(
            cursor_icon(ElementKind::Polygon),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
    }
}

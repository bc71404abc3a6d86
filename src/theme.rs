//! Centralized color theme for the application.
//!
//! This module provides all colors used for canvas rendering and the egui panels.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Paper background
pub const CANVAS_BACKGROUND: Color = Color::WHITE;

/// Stroke for committed elements
pub const ELEMENT_STROKE: Color = Color::BLACK;

/// Semi-transparent blue for the shape being placed
pub const PREVIEW_STROKE: Color = Color::srgba(0.2, 0.4, 1.0, 0.6);

/// Dots on points already placed for the current shape
pub const PENDING_POINT: Color = Color::srgb(0.2, 0.4, 1.0);

/// Element under the pointer
pub const HOVER_STROKE: Color = Color::srgb(1.0, 0.5, 0.0);

/// Control point under the pointer
pub const HOVER_POINT: Color = Color::srgb(0.9, 0.1, 0.1);

/// Origin cross
pub const ORIGIN_MARKER: Color = Color::srgba(0.8, 0.0, 0.0, 0.8);

/// Faint grid lines
pub const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.2);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Green for success messages
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bevy_to_egui_black() {
        assert_eq!(bevy_to_egui(Color::BLACK), egui::Color32::BLACK);
    }

    #[test]
    fn test_bevy_to_egui_keeps_alpha() {
        let converted = bevy_to_egui(Color::srgba(1.0, 0.0, 0.0, 0.5));
        assert_eq!(converted.a(), 127);
    }
}

//! SystemParam bundles and helpers shared by the canvas systems.
//!
//! The model works in canvas pixels: origin at the window's top-left corner,
//! y growing downwards, the same frame the window reports the cursor in.
//! Gizmos draw in bevy world space (y up, centred on the camera), so every
//! rendered point goes through a [`CanvasFrame`].

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::model::Point;

use super::camera::CanvasCamera;

/// Maps canvas pixels onto world coordinates for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    /// World position of the canvas pixel (0, 0)
    top_left: Vec2,
}

impl CanvasFrame {
    pub fn new(top_left: Vec2) -> Self {
        Self { top_left }
    }

    pub fn to_world(&self, point: Point) -> Vec2 {
        self.top_left + Vec2::new(point.x as f32, -(point.y as f32))
    }
}

/// Round a viewport position to the nearest canvas pixel
pub fn viewport_to_canvas(position: Vec2) -> Point {
    Point::new(position.x.round() as i32, position.y.round() as i32)
}

/// Bundled camera and window queries for cursor and rendering conversions
#[derive(SystemParam)]
pub struct CanvasParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<CanvasCamera>>,
}

impl CanvasParams<'_, '_> {
    /// Canvas position of the cursor, if it is inside the window
    pub fn cursor_point(&self) -> Option<Point> {
        let window = self.window.single().ok()?;
        window.cursor_position().map(viewport_to_canvas)
    }

    /// Conversion from canvas pixels to world space for this frame
    pub fn frame(&self) -> Option<CanvasFrame> {
        let (camera, transform) = self.camera.single().ok()?;
        camera
            .viewport_to_world_2d(transform, Vec2::ZERO)
            .ok()
            .map(CanvasFrame::new)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Check if an egui widget has keyboard focus
pub fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_flips_y() {
        let frame = CanvasFrame::new(Vec2::new(-550.0, 300.0));
        assert_eq!(frame.to_world(Point::new(0, 0)), Vec2::new(-550.0, 300.0));
        assert_eq!(frame.to_world(Point::new(550, 300)), Vec2::new(0.0, 0.0));
        assert_eq!(frame.to_world(Point::new(1100, 600)), Vec2::new(550.0, -300.0));
    }

    #[test]
    fn test_viewport_rounds_to_nearest_pixel() {
        assert_eq!(viewport_to_canvas(Vec2::new(10.4, 20.6)), Point::new(10, 21));
        assert_eq!(viewport_to_canvas(Vec2::new(0.0, 0.0)), Point::ORIGIN);
    }
}

//! Resources holding the drawing and what the pointer is over.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::model::{Drawing, Point, Scene};

/// The scene being drawn plus the shape currently being placed
#[derive(Resource, Default)]
pub struct ActiveDrawing {
    pub drawing: Drawing,
}

/// Element (and control point) under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverHit {
    /// Index into the scene's element list
    pub index: usize,
    /// 1-based control point index, `None` for an interior touch
    pub point_index: Option<usize>,
}

/// Pointer position over the canvas, refreshed every frame
#[derive(Resource, Default)]
pub struct HoverState {
    /// Raw pointer position, `None` when the pointer is off the canvas or over a panel
    pub cursor: Option<Point>,
    /// Pointer position after grid snapping
    pub snapped: Option<Point>,
    pub hit: Option<HoverHit>,
}

impl HoverState {
    pub fn clear(&mut self) {
        self.cursor = None;
        self.snapped = None;
        self.hit = None;
    }
}

/// Origin used when the config does not pin one
pub fn default_origin() -> Point {
    Point::new(CANVAS_WIDTH / 2, CANVAS_HEIGHT / 2)
}

/// Startup system: seed the drawing with the persisted origin and grid step
pub fn apply_config_to_drawing(config: Res<AppConfig>, mut active: ResMut<ActiveDrawing>) {
    let origin = config.data.origin.unwrap_or_else(default_origin);
    active.drawing = Drawing::new(Scene::new(origin, config.data.grid_step));
    info!(
        "Canvas ready: origin {}, grid step {}",
        origin, config.data.grid_step
    );
}

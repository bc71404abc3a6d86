use bevy::prelude::*;

use crate::constants::GRID_DRAW_MIN_STEP;
use crate::theme;

use super::params::CanvasParams;
use super::state::ActiveDrawing;

/// Canvas coordinates of the grid lines along one axis, aligned to the origin
pub fn grid_lines(origin: i32, step: i32, extent: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1);
    let first = origin.rem_euclid(step);
    (0..)
        .map(move |k| first + k * step)
        .take_while(move |line| *line <= extent)
}

pub fn draw_grid(mut gizmos: Gizmos, active: Res<ActiveDrawing>, canvas: CanvasParams) {
    let scene = active.drawing.scene();
    let step = scene.grid_step();
    if step < GRID_DRAW_MIN_STEP {
        return;
    }

    let Ok(window) = canvas.window.single() else {
        return;
    };
    let Some(frame) = canvas.frame() else {
        return;
    };

    let width = window.width().ceil() as i32;
    let height = window.height().ceil() as i32;
    let origin = scene.origin();
    let grid_color = theme::GRID_COLOR;

    for x in grid_lines(origin.x, step, width) {
        gizmos.line_2d(
            frame.to_world((x, 0).into()),
            frame.to_world((x, height).into()),
            grid_color,
        );
    }

    for y in grid_lines(origin.y, step, height) {
        gizmos.line_2d(
            frame.to_world((0, y).into()),
            frame.to_world((width, y).into()),
            grid_color,
        );
    }
}

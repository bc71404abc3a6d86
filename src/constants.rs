//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// Width of the drawing area left of the export panel, used to centre the default origin
pub const CANVAS_WIDTH: i32 = 800;

/// Height of the drawing area, used to centre the default origin
pub const CANVAS_HEIGHT: i32 = 600;

/// Pixel radius within which a pointer counts as touching a control point
pub const HIT_RADIUS: i32 = 5;

/// Font size used to draw and measure text labels
pub const TEXT_FONT_SIZE: i32 = 24;

/// Placeholder written between the anchor and the label of an exported `text` line
pub const TEXT_RESERVED: i32 = 154;

/// Smallest grid step (1 disables snapping)
pub const MIN_GRID_STEP: i32 = 1;

/// Largest grid step reachable from the digit keys
pub const MAX_GRID_STEP: i32 = 9;

/// Grid lines are only drawn from this step upwards
pub const GRID_DRAW_MIN_STEP: i32 = 5;

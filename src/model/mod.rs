//! Vector element model: the shapes, the scene that orders them and the
//! builder that turns pointer input into new shapes.
//!
//! Nothing here knows about windows or rendering; the canvas and UI plugins
//! drive a [`Drawing`] and read back its elements.
//!
//! ## Module Structure
//!
//! - [`point`] - Integer coordinates
//! - [`element`] - Element variants, hit testing, translation, description text
//! - [`touch`] - Hit test results
//! - [`text_metrics`] - Deterministic label measurement
//! - [`grid`] - Pointer snapping
//! - [`scene`] - Ordered element collection with origin and grid step
//! - [`builder`] - In-progress shape state machine
//! - [`drawing`] - Scene plus builder, the input-facing surface
//! - [`parse`] - Reading a scene description back
//! - [`tikz`] - TikZ export
//!
//! ## Coordinate frames
//!
//! Stored elements use screen coordinates (y down). The scene description is
//! written in the export frame: `x' = x - origin.x`, `y' = origin.y - y`.

pub mod builder;
pub mod drawing;
pub mod element;
pub mod grid;
pub mod parse;
pub mod point;
pub mod scene;
pub mod text_metrics;
pub mod tikz;
pub mod touch;

pub use builder::{Builder, Pending};
pub use drawing::Drawing;
pub use element::{Element, ElementKind, Shape};
pub use point::Point;
pub use scene::Scene;

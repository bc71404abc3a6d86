//! Scene plus in-progress shape: the surface the input layer drives.

use bevy::log::debug;

use super::builder::Builder;
use super::element::{Element, ElementKind};
use super::parse::ParseError;
use super::point::Point;
use super::scene::Scene;
use super::touch::Touch;

/// A scene together with the shape currently being placed.
///
/// Every method is one discrete input event and leaves the pair consistent,
/// so a renderer reading between calls never sees a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    scene: Scene,
    builder: Builder,
}

impl Drawing {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            builder: Builder::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    pub fn tool(&self) -> ElementKind {
        self.builder.tool()
    }

    pub fn set_tool(&mut self, tool: ElementKind) {
        if tool != self.builder.tool() {
            debug!("Tool changed to {}", tool);
        }
        self.builder.set_tool(tool);
    }

    /// Snap a raw pointer position with the scene's origin and grid step
    pub fn snap(&self, raw: Point) -> Point {
        self.scene.snap(raw)
    }

    fn commit(&mut self, element: Option<Element>) -> bool {
        match element {
            Some(element) => {
                self.scene.append(element);
                true
            }
            None => false,
        }
    }

    /// Place an already snapped point; returns whether a shape was committed
    pub fn add_point(&mut self, point: Point) -> bool {
        let element = self.builder.add_point(point);
        self.commit(element)
    }

    pub fn commit_polygon(&mut self) -> bool {
        let element = self.builder.commit_polygon();
        self.commit(element)
    }

    pub fn commit_text(&mut self) -> bool {
        let element = self.builder.commit_text();
        self.commit(element)
    }

    /// Commit whatever the active tool can finish right now
    pub fn commit_pending(&mut self) -> bool {
        match self.builder.tool() {
            ElementKind::Polygon => self.commit_polygon(),
            ElementKind::Text => self.commit_text(),
            _ => false,
        }
    }

    pub fn append_text_char(&mut self, c: char) -> bool {
        self.builder.append_text_char(c)
    }

    pub fn backspace_text(&mut self) -> Option<char> {
        self.builder.backspace_text()
    }

    /// Drop the shape being placed without committing it
    pub fn cancel(&mut self) {
        self.builder.cancel();
    }

    /// Remove the most recently committed element
    pub fn undo(&mut self) -> Option<Element> {
        self.scene.remove_last()
    }

    /// Remove every committed element; the shape being placed is kept
    pub fn clear_all(&mut self) {
        self.scene.clear();
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.scene.set_origin(origin);
    }

    pub fn set_grid_step(&mut self, step: i32) {
        self.scene.set_grid_step(step);
    }

    pub fn hit_test(&self, pos: Point) -> Option<Touch<'_>> {
        self.scene.hit_test(pos)
    }

    pub fn serialize(&self) -> String {
        self.scene.serialize()
    }

    /// Append elements from a scene description; see [`Scene::import`]
    pub fn import(&mut self, description: &str) -> Result<usize, ParseError> {
        self.scene.import(description)
    }

    /// Preview of the shape being placed if it were finished at `cursor`
    pub fn preview(&self, cursor: Point) -> Option<Element> {
        self.builder.preview(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_clicks_commit_to_scene() {
        let mut drawing = Drawing::default();
        drawing.set_tool(ElementKind::Line);
        assert!(!drawing.add_point(Point::new(0, 0)));
        assert!(drawing.add_point(Point::new(10, 0)));
        assert_eq!(drawing.serialize(), "line 0 0 10 0\n");
    }

    #[test]
    fn test_snapped_points_feed_builder() {
        let mut drawing = Drawing::new(Scene::new(Point::ORIGIN, 5));
        drawing.set_tool(ElementKind::Rect);
        let a = drawing.snap(Point::new(12, 13));
        let b = drawing.snap(Point::new(29, 31));
        drawing.add_point(a);
        drawing.add_point(b);
        assert_eq!(drawing.elements(), &[Element::rect(10, 15, 30, 30)]);
    }

    #[test]
    fn test_commit_pending_dispatches_by_tool() {
        let mut drawing = Drawing::default();
        drawing.set_tool(ElementKind::Polygon);
        drawing.add_point(Point::new(0, 0));
        drawing.add_point(Point::new(5, 0));
        drawing.add_point(Point::new(5, 5));
        assert!(drawing.commit_pending());
        assert_eq!(drawing.elements().len(), 1);

        drawing.set_tool(ElementKind::Text);
        drawing.add_point(Point::new(1, 1));
        drawing.append_text_char('x');
        assert!(drawing.commit_pending());
        assert_eq!(drawing.elements()[1], Element::text("x", 1, 1));

        drawing.set_tool(ElementKind::Line);
        assert!(!drawing.commit_pending());
    }

    #[test]
    fn test_clear_all_keeps_builder() {
        let mut drawing = Drawing::default();
        drawing.add_point(Point::new(0, 0));
        drawing.add_point(Point::new(1, 1));
        drawing.add_point(Point::new(2, 2));
        drawing.clear_all();
        assert!(drawing.elements().is_empty());
        assert_eq!(drawing.builder().points(), &[Point::new(2, 2)]);
    }

    #[test]
    fn test_cancel_keeps_scene() {
        let mut drawing = Drawing::default();
        drawing.add_point(Point::new(0, 0));
        drawing.add_point(Point::new(1, 1));
        drawing.add_point(Point::new(2, 2));
        drawing.cancel();
        assert_eq!(drawing.elements().len(), 1);
        assert!(drawing.builder().is_empty());
    }

    #[test]
    fn test_undo_removes_last_commit() {
        let mut drawing = Drawing::default();
        assert_eq!(drawing.undo(), None);
        drawing.add_point(Point::new(0, 0));
        drawing.add_point(Point::new(1, 1));
        assert_eq!(drawing.undo(), Some(Element::line(0, 0, 1, 1)));
        assert!(drawing.elements().is_empty());
    }

    #[test]
    fn test_import_appends_after_existing() {
        let mut drawing = Drawing::new(Scene::new(Point::new(100, 100), 1));
        drawing.add_point(Point::new(100, 100));
        drawing.add_point(Point::new(110, 100));
        assert_eq!(drawing.import("line 0 0 0 10\n"), Ok(1));
        assert_eq!(drawing.elements()[1], Element::line(100, 100, 100, 90));
        assert!(drawing.import("circle 1 2 3").is_err());
        assert_eq!(drawing.elements().len(), 2);
    }

    #[test]
    fn test_hit_test_through_facade() {
        let mut drawing = Drawing::default();
        drawing.set_tool(ElementKind::Rect);
        drawing.add_point(Point::new(0, 0));
        drawing.add_point(Point::new(100, 100));
        let touch = drawing.hit_test(Point::new(99, 99)).unwrap();
        assert_eq!(touch.point_index, Some(2));
    }
}

//! The ordered element collection and its export frame.

use bevy::log::{debug, warn};

use crate::constants::MIN_GRID_STEP;

use super::element::Element;
use super::grid::snap_to_grid;
use super::parse::{parse_scene, ParseError};
use super::point::Point;
use super::touch::Touch;

/// Elements in draw order (back to front) plus the export origin and grid step.
///
/// Origin and grid step never touch stored coordinates; they only feed
/// pointer snapping and the frame used by [`Scene::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    elements: Vec<Element>,
    origin: Point,
    grid_step: i32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Point::ORIGIN, MIN_GRID_STEP)
    }
}

impl Scene {
    pub fn new(origin: Point, grid_step: i32) -> Self {
        Self {
            elements: Vec::new(),
            origin,
            grid_step: grid_step.max(MIN_GRID_STEP),
        }
    }

    /// Read-only view in draw order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add on top of everything drawn so far
    pub fn append(&mut self, element: Element) {
        debug!("Appending {} as element #{}", element.kind(), self.elements.len());
        self.elements.push(element);
    }

    /// Drop the most recently appended element; empty scenes are left alone
    pub fn remove_last(&mut self) -> Option<Element> {
        let removed = self.elements.pop();
        if let Some(ref element) = removed {
            debug!("Removed last element ({})", element.kind());
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} elements", self.elements.len());
        self.elements.clear();
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        debug!("Origin set to {}", origin);
        self.origin = origin;
    }

    pub fn grid_step(&self) -> i32 {
        self.grid_step
    }

    /// Set the snapping pitch; values below 1 are raised to 1
    pub fn set_grid_step(&mut self, step: i32) {
        if step < MIN_GRID_STEP {
            warn!("Ignoring grid step {}, using {}", step, MIN_GRID_STEP);
        }
        self.grid_step = step.max(MIN_GRID_STEP);
        debug!("Grid step set to {}", self.grid_step);
    }

    /// Snap a raw pointer position to this scene's grid
    pub fn snap(&self, raw: Point) -> Point {
        snap_to_grid(raw, self.origin, self.grid_step)
    }

    /// Export-frame coordinates of a screen position
    pub fn to_export(&self, screen: Point) -> Point {
        screen.translated(self.origin.x, self.origin.y)
    }

    /// Topmost element under `pos` together with its index in draw order.
    ///
    /// Elements are scanned front to back so shapes drawn later win over
    /// shapes they cover.
    pub fn hit_test_indexed(&self, pos: Point) -> Option<(usize, Touch<'_>)> {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, element)| element.touch(pos).map(|touch| (index, touch)))
    }

    /// Topmost element under `pos`
    pub fn hit_test(&self, pos: Point) -> Option<Touch<'_>> {
        self.hit_test_indexed(pos).map(|(_, touch)| touch)
    }

    /// Elements mapped into the export frame, in draw order
    pub fn exported(&self) -> impl Iterator<Item = Element> + '_ {
        self.elements
            .iter()
            .map(|element| element.translated(self.origin.x, self.origin.y))
    }

    /// Scene description: one line per element in the export frame
    pub fn serialize(&self) -> String {
        self.exported()
            .map(|element| format!("{}\n", element))
            .collect()
    }

    /// Append every element of a scene description written relative to the
    /// current origin.
    ///
    /// The description is parsed and mapped in full before anything is
    /// added, so a malformed line or a coordinate that leaves the i32 range
    /// leaves the scene unchanged. Returns how many elements were added.
    pub fn import(&mut self, description: &str) -> Result<usize, ParseError> {
        let (ox, oy) = (self.origin.x, self.origin.y);
        let mapped = parse_scene(description)?
            .into_iter()
            .map(|(line, element)| {
                element
                    .from_export(ox, oy)
                    .map(Element::normalized)
                    .ok_or(ParseError::OutOfRange { line })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let count = mapped.len();
        self.elements.extend(mapped);
        debug!("Imported {} elements", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> (Element, Element, Element) {
        (
            Element::line(0, 0, 10, 10),
            Element::rect(0, 0, 20, 20),
            Element::oval(5, 5, 2, 2),
        )
    }

    #[test]
    fn test_scene_default() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert_eq!(scene.origin(), Point::ORIGIN);
        assert_eq!(scene.grid_step(), 1);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let (a, b, c) = abc();
        let mut scene = Scene::default();
        scene.append(a.clone());
        scene.append(b.clone());
        scene.append(c.clone());
        assert_eq!(scene.elements(), &[a, b, c]);
    }

    #[test]
    fn test_remove_last_is_lifo() {
        let (a, b, c) = abc();
        let mut scene = Scene::default();
        scene.append(a.clone());
        scene.append(b.clone());
        scene.append(c.clone());

        assert_eq!(scene.remove_last(), Some(c));
        assert_eq!(scene.elements(), &[a, b]);
    }

    #[test]
    fn test_remove_last_on_empty_scene() {
        let mut scene = Scene::new(Point::new(4, 4), 3);
        let before = scene.clone();
        assert_eq!(scene.remove_last(), None);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_clear_keeps_settings() {
        let (a, b, _) = abc();
        let mut scene = Scene::new(Point::new(7, 8), 4);
        scene.append(a);
        scene.append(b);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.origin(), Point::new(7, 8));
        assert_eq!(scene.grid_step(), 4);
    }

    #[test]
    fn test_grid_step_is_at_least_one() {
        let mut scene = Scene::default();
        scene.set_grid_step(0);
        assert_eq!(scene.grid_step(), 1);
        scene.set_grid_step(-4);
        assert_eq!(scene.grid_step(), 1);
        scene.set_grid_step(9);
        assert_eq!(scene.grid_step(), 9);
        assert_eq!(Scene::new(Point::ORIGIN, 0).grid_step(), 1);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = Scene::default();
        scene.append(Element::rect(0, 0, 100, 100));
        scene.append(Element::rect(50, 50, 150, 150));

        let (index, touch) = scene.hit_test_indexed(Point::new(75, 75)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(touch.element, &Element::rect(50, 50, 150, 150));
        assert!(touch.is_interior());
    }

    #[test]
    fn test_hit_test_falls_through_to_lower_elements() {
        let mut scene = Scene::default();
        scene.append(Element::rect(0, 0, 100, 100));
        scene.append(Element::line(200, 200, 300, 300));

        let touch = scene.hit_test(Point::new(10, 10)).unwrap();
        assert_eq!(touch.element.kind(), crate::model::ElementKind::Rect);
        assert!(scene.hit_test(Point::new(500, 500)).is_none());
    }

    #[test]
    fn test_hit_test_empty_scene() {
        assert!(Scene::default().hit_test(Point::ORIGIN).is_none());
    }

    #[test]
    fn test_serialize_single_line() {
        let mut scene = Scene::default();
        scene.append(Element::line(0, 0, 10, 0));
        assert_eq!(scene.serialize(), "line 0 0 10 0\n");
    }

    #[test]
    fn test_serialize_uses_origin_and_keeps_storage() {
        let mut scene = Scene::new(Point::new(400, 300), 1);
        scene.append(Element::line(400, 300, 500, 200));
        scene.append(Element::text("hi", 410, 310));

        assert_eq!(
            scene.serialize(),
            "line 0 0 100 100\ntext 10 -10 154 \"hi\"\n"
        );
        assert_eq!(scene.elements()[0], Element::line(400, 300, 500, 200));
    }

    #[test]
    fn test_serialize_empty_scene() {
        assert_eq!(Scene::default().serialize(), "");
    }

    #[test]
    fn test_origin_change_does_not_move_elements() {
        let mut scene = Scene::default();
        scene.append(Element::rect(10, 10, 20, 20));
        scene.set_origin(Point::new(10, 10));
        assert_eq!(scene.elements()[0], Element::rect(10, 10, 20, 20));
        assert_eq!(scene.serialize(), "rect 0 0 10 -10\n");
    }

    #[test]
    fn test_snap_uses_scene_settings() {
        let scene = Scene::new(Point::ORIGIN, 5);
        assert_eq!(scene.snap(Point::new(12, 13)), Point::new(10, 15));
    }

    #[test]
    fn test_frame_conversions_are_inverse() {
        let scene = Scene::new(Point::new(400, 300), 1);
        let screen = Point::new(123, 456);
        let exported = scene.to_export(screen);
        assert_eq!(exported, Point::new(-277, -156));
        assert_eq!(exported.checked_from_export(400, 300), Some(screen));
    }

    #[test]
    fn test_import_restores_serialized_scene() {
        let mut scene = Scene::new(Point::new(400, 300), 1);
        scene.append(Element::line(1, 2, 3, 4));
        scene.append(Element::rect(100, 100, 200, 250));
        scene.append(Element::oval(400, 300, 30, 20));
        scene.append(Element::polygon(vec![
            Point::new(10, 10),
            Point::new(50, 10),
            Point::new(30, 40),
        ]));
        scene.append(Element::text("label", 410, 290));

        let mut copy = Scene::new(Point::new(400, 300), 1);
        let added = copy.import(&scene.serialize()).unwrap();

        assert_eq!(added, 5);
        assert_eq!(copy.elements(), scene.elements());
    }

    #[test]
    fn test_import_normalizes_hand_written_rect() {
        let mut scene = Scene::default();
        scene.import("rect 0 0 10 10\n").unwrap();
        // y flips to (0, -10), stored min-first
        assert_eq!(scene.elements()[0], Element::rect(0, -10, 10, 0));
    }

    #[test]
    fn test_import_failure_leaves_scene_unchanged() {
        let mut scene = Scene::default();
        scene.append(Element::line(0, 0, 1, 1));
        let before = scene.clone();

        assert!(scene.import("line 0 0 1 1\nline 1 2\n").is_err());
        assert_eq!(scene, before);
    }

    #[test]
    fn test_import_rejects_coordinates_past_i32() {
        let mut scene = Scene::new(Point::new(400, 300), 1);
        scene.append(Element::line(0, 0, 1, 1));
        let before = scene.clone();

        let err = scene
            .import("line 1 1 2 2\n\nline 2147483647 0 0 0\n")
            .unwrap_err();
        assert_eq!(err, ParseError::OutOfRange { line: 3 });
        assert_eq!(scene, before);
    }

    #[test]
    fn test_serialize_saturates_far_elements() {
        let mut scene = Scene::new(Point::new(400, 300), 1);
        scene.append(Element::line(i32::MIN, 0, 0, 0));
        assert_eq!(
            scene.serialize(),
            format!("line {} 300 -400 300\n", i32::MIN)
        );
    }
}

//! In-progress shape state.
//!
//! The builder collects snapped points (and, for text, typed characters) for
//! the active tool and turns them into an [`Element`] once the shape is
//! complete. It never touches the scene itself: every operation that completes
//! a shape returns the new element and the caller decides where it goes.

use super::element::{Element, ElementKind};
use super::point::Point;

/// What has been placed so far for the current shape
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    Empty,
    /// Points placed for a line, rectangle, oval or polygon
    Points(Vec<Point>),
    /// Text tool: anchor fixed, label being typed
    Label { anchor: Point, text: String },
}

/// Accumulates input for the active tool
#[derive(Debug, Clone, Default)]
pub struct Builder {
    tool: ElementKind,
    pending: Pending,
}

impl Builder {
    pub fn new(tool: ElementKind) -> Self {
        Self {
            tool,
            pending: Pending::Empty,
        }
    }

    pub fn tool(&self) -> ElementKind {
        self.tool
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == Pending::Empty
    }

    /// Buffered points (the text anchor counts as one)
    pub fn points(&self) -> &[Point] {
        match &self.pending {
            Pending::Empty => &[],
            Pending::Points(points) => points,
            Pending::Label { anchor, .. } => std::slice::from_ref(anchor),
        }
    }

    /// Label typed so far, while the text tool is collecting one
    pub fn text(&self) -> Option<&str> {
        match &self.pending {
            Pending::Label { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_text_entry(&self) -> bool {
        matches!(self.pending, Pending::Label { .. })
    }

    /// Switch tools, discarding anything buffered
    pub fn set_tool(&mut self, tool: ElementKind) {
        self.tool = tool;
        self.cancel();
    }

    /// Discard buffered points and text without committing
    pub fn cancel(&mut self) {
        self.pending = Pending::Empty;
    }

    /// Feed a snapped point to the active tool.
    ///
    /// Lines, rectangles and ovals complete on their second point and are
    /// returned. Polygons keep collecting until [`Builder::commit_polygon`].
    /// For text the point becomes the label anchor; clicking again while
    /// typing moves the anchor and keeps the label.
    pub fn add_point(&mut self, point: Point) -> Option<Element> {
        if self.tool == ElementKind::Text {
            match &mut self.pending {
                Pending::Label { anchor, .. } => *anchor = point,
                _ => {
                    self.pending = Pending::Label {
                        anchor: point,
                        text: String::new(),
                    }
                }
            }
            return None;
        }

        match &mut self.pending {
            Pending::Points(points) => points.push(point),
            _ => self.pending = Pending::Points(vec![point]),
        }

        if !self.tool.is_two_point() {
            return None;
        }

        let Pending::Points(points) = &self.pending else {
            return None;
        };
        let [first, second] = points[..] else {
            return None;
        };
        let element = two_point_element(self.tool, first, second);
        self.cancel();
        Some(element)
    }

    /// Close the polygon being placed; needs at least 2 points
    pub fn commit_polygon(&mut self) -> Option<Element> {
        if self.tool != ElementKind::Polygon {
            return None;
        }
        match &self.pending {
            Pending::Points(points) if points.len() >= 2 => {
                let element = Element::polygon(points.clone());
                self.cancel();
                Some(element)
            }
            _ => None,
        }
    }

    /// Finish the label being typed; empty labels are not committed
    pub fn commit_text(&mut self) -> Option<Element> {
        match &self.pending {
            Pending::Label { anchor, text } if !text.is_empty() => {
                let element = Element::text(text.clone(), anchor.x, anchor.y);
                self.cancel();
                Some(element)
            }
            _ => None,
        }
    }

    /// Type one character into the label; control characters are ignored.
    ///
    /// Returns whether the character was taken.
    pub fn append_text_char(&mut self, c: char) -> bool {
        match &mut self.pending {
            Pending::Label { text, .. } if !c.is_control() => {
                text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last typed character
    pub fn backspace_text(&mut self) -> Option<char> {
        match &mut self.pending {
            Pending::Label { text, .. } => text.pop(),
            _ => None,
        }
    }

    /// The element that would exist if the shape were finished at `cursor`.
    ///
    /// Two-point tools preview the shape a click at `cursor` would commit.
    /// Polygons preview the buffered vertices plus the cursor and text previews
    /// the label typed so far.
    pub fn preview(&self, cursor: Point) -> Option<Element> {
        match &self.pending {
            Pending::Empty => None,
            Pending::Label { anchor, text } => Some(Element::text(text.clone(), anchor.x, anchor.y)),
            Pending::Points(points) => match self.tool {
                ElementKind::Polygon => {
                    let mut vertices = points.clone();
                    vertices.push(cursor);
                    Some(Element::polygon(vertices))
                }
                tool if tool.is_two_point() => points
                    .first()
                    .map(|first| two_point_element(tool, *first, cursor)),
                _ => None,
            },
        }
    }
}

/// Build a two-point shape: endpoints for lines, opposite corners for
/// rectangles, centre then rim point for ovals
fn two_point_element(tool: ElementKind, first: Point, second: Point) -> Element {
    match tool {
        ElementKind::Rect => Element::rect(first.x, first.y, second.x, second.y),
        ElementKind::Oval => Element::oval(first.x, first.y, second.x - first.x, second.y - first.y),
        _ => Element::line(first.x, first.y, second.x, second.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_default_builder_is_empty_line_tool() {
        let builder = Builder::default();
        assert_eq!(builder.tool(), ElementKind::Line);
        assert!(builder.is_empty());
        assert!(builder.points().is_empty());
    }

    #[test]
    fn test_line_commits_on_second_point() {
        let mut builder = Builder::new(ElementKind::Line);
        assert_eq!(builder.add_point(p(0, 0)), None);
        assert_eq!(builder.points(), &[p(0, 0)]);
        assert_eq!(builder.add_point(p(10, 0)), Some(Element::line(0, 0, 10, 0)));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_rect_commit_is_normalized() {
        let mut builder = Builder::new(ElementKind::Rect);
        builder.add_point(p(10, 10));
        assert_eq!(builder.add_point(p(0, 0)), Some(Element::rect(0, 0, 10, 10)));
    }

    #[test]
    fn test_oval_uses_center_then_rim() {
        let mut builder = Builder::new(ElementKind::Oval);
        builder.add_point(p(50, 50));
        assert_eq!(builder.add_point(p(40, 70)), Some(Element::oval(50, 50, 10, 20)));
    }

    #[test]
    fn test_polygon_collects_until_commit() {
        let mut builder = Builder::new(ElementKind::Polygon);
        for point in [p(0, 0), p(10, 0), p(10, 10), p(0, 10)] {
            assert_eq!(builder.add_point(point), None);
        }
        assert_eq!(builder.points().len(), 4);

        let polygon = builder.commit_polygon().unwrap();
        assert_eq!(polygon.args(), vec![0, 0, 10, 0, 10, 10, 0, 10]);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_polygon_commit_needs_two_points() {
        let mut builder = Builder::new(ElementKind::Polygon);
        assert_eq!(builder.commit_polygon(), None);
        builder.add_point(p(1, 1));
        assert_eq!(builder.commit_polygon(), None);
        // The single point stays buffered
        assert_eq!(builder.points(), &[p(1, 1)]);
        builder.add_point(p(2, 2));
        assert!(builder.commit_polygon().is_some());
    }

    #[test]
    fn test_commit_polygon_ignored_for_other_tools() {
        let mut builder = Builder::new(ElementKind::Line);
        builder.add_point(p(1, 1));
        assert_eq!(builder.commit_polygon(), None);
        assert_eq!(builder.points().len(), 1);
    }

    #[test]
    fn test_text_entry_flow() {
        let mut builder = Builder::new(ElementKind::Text);
        assert_eq!(builder.add_point(p(5, 6)), None);
        assert!(builder.is_text_entry());
        assert_eq!(builder.text(), Some(""));

        for c in "Hix".chars() {
            assert!(builder.append_text_char(c));
        }
        assert_eq!(builder.backspace_text(), Some('x'));
        assert_eq!(builder.text(), Some("Hi"));

        assert_eq!(builder.commit_text(), Some(Element::text("Hi", 5, 6)));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_empty_label_does_not_commit() {
        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(p(0, 0));
        assert_eq!(builder.commit_text(), None);
        assert!(builder.is_text_entry());
    }

    #[test]
    fn test_text_second_click_moves_anchor() {
        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(p(0, 0));
        builder.append_text_char('a');
        builder.add_point(p(30, 40));
        assert_eq!(builder.commit_text(), Some(Element::text("a", 30, 40)));
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(p(0, 0));
        assert!(!builder.append_text_char('\n'));
        assert!(builder.append_text_char('a'));
        assert!(!builder.append_text_char('\t'));
        assert!(builder.append_text_char('b'));
        assert_eq!(builder.text(), Some("ab"));
    }

    #[test]
    fn test_text_operations_outside_entry_are_noops() {
        let mut builder = Builder::new(ElementKind::Text);
        assert!(!builder.append_text_char('a'));
        assert_eq!(builder.backspace_text(), None);
        assert_eq!(builder.commit_text(), None);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_tool_change_discards_buffer() {
        let mut builder = Builder::new(ElementKind::Polygon);
        builder.add_point(p(1, 1));
        builder.add_point(p(2, 2));
        builder.set_tool(ElementKind::Rect);
        assert!(builder.is_empty());
        // A fresh rectangle needs two new points
        assert_eq!(builder.add_point(p(3, 3)), None);
    }

    #[test]
    fn test_tool_change_discards_text() {
        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(p(1, 1));
        builder.append_text_char('z');
        builder.set_tool(ElementKind::Text);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_cancel_discards_everything() {
        let mut builder = Builder::new(ElementKind::Line);
        builder.add_point(p(4, 4));
        builder.cancel();
        assert!(builder.is_empty());
        builder.cancel();
        assert!(builder.is_empty());
    }

    #[test]
    fn test_preview_two_point_tools() {
        let mut builder = Builder::new(ElementKind::Rect);
        assert_eq!(builder.preview(p(9, 9)), None);
        builder.add_point(p(10, 10));
        assert_eq!(builder.preview(p(0, 5)), Some(Element::rect(0, 5, 10, 10)));

        builder.set_tool(ElementKind::Oval);
        builder.add_point(p(10, 10));
        assert_eq!(builder.preview(p(13, 6)), Some(Element::oval(10, 10, 3, 4)));
    }

    #[test]
    fn test_preview_polygon_includes_cursor() {
        let mut builder = Builder::new(ElementKind::Polygon);
        builder.add_point(p(0, 0));
        let preview = builder.preview(p(5, 5)).unwrap();
        assert_eq!(preview.args(), vec![0, 0, 5, 5]);
    }

    #[test]
    fn test_preview_text_shows_label() {
        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(p(2, 3));
        builder.append_text_char('q');
        assert_eq!(builder.preview(p(100, 100)), Some(Element::text("q", 2, 3)));
    }
}

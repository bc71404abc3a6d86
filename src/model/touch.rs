//! Proximity query results.

use super::element::Element;
use super::point::Point;

/// Result of a hit test: the pointer is on `element`, optionally on one of its
/// named control points.
///
/// `point_index` is 1-based and follows the order of
/// [`Element::control_points`]. `None` means the pointer is inside the element
/// but not on a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch<'a> {
    pub element: &'a Element,
    pub point_index: Option<usize>,
}

impl<'a> Touch<'a> {
    pub fn interior(element: &'a Element) -> Self {
        Self {
            element,
            point_index: None,
        }
    }

    pub fn at_point(element: &'a Element, index: usize) -> Self {
        Self {
            element,
            point_index: Some(index),
        }
    }

    /// Coordinates of the touched control point, if any
    pub fn point(&self) -> Option<Point> {
        self.point_index
            .and_then(|index| self.element.point_touch(index))
    }

    pub fn is_interior(&self) -> bool {
        self.point_index.is_none()
    }
}

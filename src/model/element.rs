//! Committed drawing primitives.
//!
//! An [`Element`] is one shape in the scene. Every variant can describe how to
//! draw itself ([`Element::shape`]), map itself into the export frame
//! ([`Element::translated`]), answer proximity queries ([`Element::touch`]) and
//! print itself as one line of the scene description (`Display`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HIT_RADIUS, TEXT_RESERVED};

use super::point::Point;
use super::text_metrics;
use super::touch::Touch;

/// Element variant tag, also used as the active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElementKind {
    #[default]
    Line,
    Rect,
    Oval,
    Polygon,
    Text,
}

impl ElementKind {
    /// Keyword used in the scene description
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Rect => "rect",
            ElementKind::Oval => "oval",
            ElementKind::Polygon => "polygon",
            ElementKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "line" => Some(ElementKind::Line),
            "rect" => Some(ElementKind::Rect),
            "oval" => Some(ElementKind::Oval),
            "polygon" => Some(ElementKind::Polygon),
            "text" => Some(ElementKind::Text),
            _ => None,
        }
    }

    /// Kinds that commit as soon as two points are placed
    pub fn is_two_point(&self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Rect | ElementKind::Oval)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One shape in the scene.
///
/// Elements are values: nothing mutates them once they are in a scene, and
/// translating one builds a new element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    /// Segment between two endpoints, stored verbatim
    Line { start: Point, end: Point },
    /// Axis-aligned rectangle `(x0, y0, x1, y1)`.
    ///
    /// [`Element::rect`] stores the min corner in `p0` and the max corner in
    /// `p1`. Translated copies keep the corner order and may therefore have
    /// `p0.y > p1.y`.
    Rect { p0: Point, p1: Point },
    /// Axis-aligned ellipse centred at `center` with non-negative semi-axes
    Oval { center: Point, rx: i32, ry: i32 },
    /// Closed polygon; the last vertex connects back to the first
    Polygon { vertices: Vec<Point> },
    /// Label centred on `anchor`
    Text { anchor: Point, label: String },
}

/// Renderer-facing geometry of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    /// Connected segments, closed back to the first point when `closed`
    Polyline { points: Vec<Point>, closed: bool },
    Ellipse { center: Point, rx: i32, ry: i32 },
    /// Label of `size` (width, height) centred on `anchor`
    Label {
        anchor: Point,
        text: &'a str,
        size: (i32, i32),
    },
}

impl Element {
    pub fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Element::Line {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// Rectangle from any two opposite corners; the click order is not kept
    pub fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Element::Rect {
            p0: Point::new(x1.min(x2), y1.min(y2)),
            p1: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    /// Ellipse centred at `(cx, cy)`; the sign of the semi-axes is dropped
    pub fn oval(cx: i32, cy: i32, a: i32, b: i32) -> Self {
        Element::Oval {
            center: Point::new(cx, cy),
            rx: a.saturating_abs(),
            ry: b.saturating_abs(),
        }
    }

    pub fn polygon(vertices: Vec<Point>) -> Self {
        debug_assert!(
            vertices.len() >= 2,
            "polygon needs at least 2 vertices, got {}",
            vertices.len()
        );
        Element::Polygon { vertices }
    }

    pub fn text(label: impl Into<String>, x: i32, y: i32) -> Self {
        Element::Text {
            anchor: Point::new(x, y),
            label: label.into(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line { .. } => ElementKind::Line,
            Element::Rect { .. } => ElementKind::Rect,
            Element::Oval { .. } => ElementKind::Oval,
            Element::Polygon { .. } => ElementKind::Polygon,
            Element::Text { .. } => ElementKind::Text,
        }
    }

    /// Ordered integer arguments, as written in the scene description
    pub fn args(&self) -> Vec<i32> {
        match self {
            Element::Line { start, end } => vec![start.x, start.y, end.x, end.y],
            Element::Rect { p0, p1 } => vec![p0.x, p0.y, p1.x, p1.y],
            Element::Oval { center, rx, ry } => vec![center.x, center.y, *rx, *ry],
            Element::Polygon { vertices } => vertices.iter().flat_map(|p| [p.x, p.y]).collect(),
            Element::Text { anchor, .. } => vec![anchor.x, anchor.y],
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Element::Text { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Copy of this element in the export frame: `x' = x - origin_x`,
    /// `y' = origin_y - y` for every coordinate pair.
    ///
    /// Oval semi-axes are lengths, not coordinates, so only the centre moves.
    /// Text keeps its label. Coordinates that leave the i32 range saturate.
    /// The inverse mapping is [`Element::from_export`].
    pub fn translated(&self, origin_x: i32, origin_y: i32) -> Element {
        let map = |p: &Point| p.translated(origin_x, origin_y);
        match self {
            Element::Line { start, end } => Element::Line {
                start: map(start),
                end: map(end),
            },
            Element::Rect { p0, p1 } => Element::Rect {
                p0: map(p0),
                p1: map(p1),
            },
            Element::Oval { center, rx, ry } => Element::Oval {
                center: map(center),
                rx: *rx,
                ry: *ry,
            },
            Element::Polygon { vertices } => Element::Polygon {
                vertices: vertices.iter().map(map).collect(),
            },
            Element::Text { anchor, label } => Element::Text {
                anchor: map(anchor),
                label: label.clone(),
            },
        }
    }

    /// Screen-frame element for one given in the export frame of `origin`.
    ///
    /// `None` when a mapped coordinate does not fit in i32.
    pub fn from_export(&self, origin_x: i32, origin_y: i32) -> Option<Element> {
        let map = |p: &Point| p.checked_from_export(origin_x, origin_y);
        let element = match self {
            Element::Line { start, end } => Element::Line {
                start: map(start)?,
                end: map(end)?,
            },
            Element::Rect { p0, p1 } => Element::Rect {
                p0: map(p0)?,
                p1: map(p1)?,
            },
            Element::Oval { center, rx, ry } => Element::Oval {
                center: map(center)?,
                rx: *rx,
                ry: *ry,
            },
            Element::Polygon { vertices } => Element::Polygon {
                vertices: vertices.iter().map(map).collect::<Option<_>>()?,
            },
            Element::Text { anchor, label } => Element::Text {
                anchor: map(anchor)?,
                label: label.clone(),
            },
        };
        Some(element)
    }

    /// Re-establish the screen-frame invariants (ordered rectangle corners,
    /// non-negative radii) on an element built from external input
    pub fn normalized(self) -> Element {
        match self {
            Element::Rect { p0, p1 } => Element::rect(p0.x, p0.y, p1.x, p1.y),
            Element::Oval { center, rx, ry } => Element::oval(center.x, center.y, rx, ry),
            other => other,
        }
    }

    /// Named control points in index order; index `i + 1` names element `i`.
    ///
    /// - Line: the two endpoints
    /// - Rect: top-left, bottom-right, bottom-left, top-right
    /// - Oval: the axis extrema +x, -x, +y, -y, clamped to the i32 range
    /// - Polygon: every vertex
    /// - Text: none
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Element::Line { start, end } => vec![*start, *end],
            Element::Rect { p0, p1 } => vec![
                *p0,
                *p1,
                Point::new(p0.x, p1.y),
                Point::new(p1.x, p0.y),
            ],
            Element::Oval { center, rx, ry } => vec![
                Point::new(center.x.saturating_add(*rx), center.y),
                Point::new(center.x.saturating_sub(*rx), center.y),
                Point::new(center.x, center.y.saturating_add(*ry)),
                Point::new(center.x, center.y.saturating_sub(*ry)),
            ],
            Element::Polygon { vertices } => vertices.clone(),
            Element::Text { .. } => Vec::new(),
        }
    }

    /// Control point named by a 1-based `index` from [`Element::touch`].
    ///
    /// Index 0 (interior) and indices past the last control point give `None`.
    pub fn point_touch(&self, index: usize) -> Option<Point> {
        let slot = index.checked_sub(1)?;
        self.control_points().get(slot).copied()
    }

    /// Hit test the pointer at `pos`.
    ///
    /// Control points win over the interior; among control points the lowest
    /// index wins. Lines have no interior, polygons are only touchable on
    /// their vertices and text only inside its label box.
    pub fn touch(&self, pos: Point) -> Option<Touch<'_>> {
        if let Some(slot) = self
            .control_points()
            .iter()
            .position(|p| p.is_near(pos, HIT_RADIUS))
        {
            return Some(Touch::at_point(self, slot + 1));
        }

        self.contains(pos).then(|| Touch::interior(self))
    }

    /// Strict interior containment used after control points miss
    fn contains(&self, pos: Point) -> bool {
        match self {
            Element::Line { .. } | Element::Polygon { .. } => false,
            Element::Rect { p0, p1 } => {
                let (min_x, max_x) = (p0.x.min(p1.x), p0.x.max(p1.x));
                let (min_y, max_y) = (p0.y.min(p1.y), p0.y.max(p1.y));
                pos.x > min_x && pos.x < max_x && pos.y > min_y && pos.y < max_y
            }
            Element::Oval { center, rx, ry } => {
                let dx = i128::from(pos.x) - i128::from(center.x);
                let dy = i128::from(pos.y) - i128::from(center.y);
                let a2 = i128::from(*rx) * i128::from(*rx);
                let b2 = i128::from(*ry) * i128::from(*ry);
                dx * dx * b2 + dy * dy * a2 < a2 * b2
            }
            Element::Text { anchor, label } => {
                let (width, height) = text_metrics::label_size(label);
                let dx = (i64::from(pos.x) - i64::from(anchor.x)).abs();
                let dy = (i64::from(pos.y) - i64::from(anchor.y)).abs();
                dx * 2 < i64::from(width) && dy * 2 < i64::from(height)
            }
        }
    }

    /// Geometry for the renderer
    pub fn shape(&self) -> Shape<'_> {
        match self {
            Element::Line { start, end } => Shape::Polyline {
                points: vec![*start, *end],
                closed: false,
            },
            Element::Rect { p0, p1 } => Shape::Polyline {
                points: vec![
                    *p0,
                    Point::new(p1.x, p0.y),
                    *p1,
                    Point::new(p0.x, p1.y),
                ],
                closed: true,
            },
            Element::Oval { center, rx, ry } => Shape::Ellipse {
                center: *center,
                rx: *rx,
                ry: *ry,
            },
            Element::Polygon { vertices } => Shape::Polyline {
                points: vertices.clone(),
                closed: true,
            },
            Element::Text { anchor, label } => Shape::Label {
                anchor: *anchor,
                text: label,
                size: text_metrics::label_size(label),
            },
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Element::Text { anchor, label } = self {
            return write!(
                f,
                "text {} {} {} \"{}\"",
                anchor.x, anchor.y, TEXT_RESERVED, label
            );
        }

        f.write_str(self.kind().name())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

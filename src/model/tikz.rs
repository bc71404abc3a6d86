//! TikZ rendering of a scene for inclusion in LaTeX documents.
//!
//! Coordinates come from the export frame (y up, relative to the origin) and
//! are scaled so that 100 pixels become one TikZ unit.

use std::fmt::Write;

use super::element::Element;
use super::point::Point;
use super::scene::Scene;

/// Pixels per TikZ unit at scale 1
const PIXELS_PER_UNIT: f64 = 100.0;

fn scaled(value: i32, scale: f64) -> f64 {
    f64::from(value) / PIXELS_PER_UNIT * scale
}

fn coord(point: Point, scale: f64) -> String {
    format!("({},{})", scaled(point.x, scale), scaled(point.y, scale))
}

/// Label text with LaTeX special characters escaped
fn escape_latex(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '{' | '}' | '%' | '&' | '#' | '_' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One TikZ command for an element already in the export frame
pub fn element_to_tikz(element: &Element, scale: f64) -> String {
    match element {
        Element::Line { start, end } => {
            format!("\\draw {} -- {};", coord(*start, scale), coord(*end, scale))
        }
        Element::Rect { p0, p1 } => format!(
            "\\draw {} rectangle {};",
            coord(*p0, scale),
            coord(*p1, scale)
        ),
        Element::Oval { center, rx, ry } => format!(
            "\\draw {} ellipse ({} and {});",
            coord(*center, scale),
            scaled(*rx, scale),
            scaled(*ry, scale)
        ),
        Element::Polygon { vertices } => {
            let path: Vec<String> = vertices.iter().map(|p| coord(*p, scale)).collect();
            format!("\\draw {} -- cycle;", path.join(" -- "))
        }
        Element::Text { anchor, label } => {
            format!(
                "\\node[scale=1] at {} {{{}}};",
                coord(*anchor, scale),
                escape_latex(label)
            )
        }
    }
}

/// Whole scene as a `tikzpicture` environment
pub fn to_tikz(scene: &Scene, scale: f64) -> String {
    let mut code = String::from("\\begin{tikzpicture}\n");
    for element in scene.exported() {
        // Writing into a String cannot fail
        let _ = writeln!(code, "  {}", element_to_tikz(&element, scale));
    }
    code.push_str("\\end{tikzpicture}\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_scaled_by_hundred() {
        let line = Element::line(120, 300, 110, 310);
        assert_eq!(element_to_tikz(&line, 1.0), "\\draw (1.2,3) -- (1.1,3.1);");
    }

    #[test]
    fn test_scale_factor_applies() {
        let line = Element::line(100, 0, 0, 50);
        assert_eq!(element_to_tikz(&line, 2.0), "\\draw (2,0) -- (0,1);");
    }

    #[test]
    fn test_rect_and_oval() {
        let rect = Element::rect(0, 0, 200, 100).translated(0, 0);
        assert_eq!(element_to_tikz(&rect, 1.0), "\\draw (0,0) rectangle (2,-1);");

        let oval = Element::oval(100, 100, 50, 25);
        assert_eq!(
            element_to_tikz(&oval, 1.0),
            "\\draw (1,1) ellipse (0.5 and 0.25);"
        );
    }

    #[test]
    fn test_polygon_is_closed() {
        let poly = Element::polygon(vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)]);
        assert_eq!(
            element_to_tikz(&poly, 1.0),
            "\\draw (0,0) -- (1,0) -- (1,1) -- cycle;"
        );
    }

    #[test]
    fn test_text_node() {
        let text = Element::text("ABCDEF", 0, 0);
        assert_eq!(element_to_tikz(&text, 1.0), "\\node[scale=1] at (0,0) {ABCDEF};");
    }

    #[test]
    fn test_text_node_escapes_special_characters() {
        let text = Element::text("50% a}b", 0, 0);
        assert_eq!(
            element_to_tikz(&text, 1.0),
            "\\node[scale=1] at (0,0) {50\\% a\\}b};"
        );
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("plain text"), "plain text");
        assert_eq!(escape_latex("{}%&#_$"), "\\{\\}\\%\\&\\#\\_\\$");
        assert_eq!(
            escape_latex("a\\b~c^d"),
            "a\\textbackslash{}b\\textasciitilde{}c\\textasciicircum{}d"
        );
    }

    #[test]
    fn test_scene_uses_export_frame() {
        let mut scene = Scene::new(Point::new(100, 100), 1);
        scene.append(Element::line(100, 100, 200, 0));
        assert_eq!(
            to_tikz(&scene, 1.0),
            "\\begin{tikzpicture}\n  \\draw (0,0) -- (1,1);\n\\end{tikzpicture}\n"
        );
    }

    #[test]
    fn test_empty_scene() {
        assert_eq!(
            to_tikz(&Scene::default(), 1.0),
            "\\begin{tikzpicture}\n\\end{tikzpicture}\n"
        );
    }
}

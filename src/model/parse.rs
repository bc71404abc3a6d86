//! Reading a scene description back into elements.
//!
//! The accepted grammar is exactly what [`Element`]'s `Display` writes, one
//! element per line:
//!
//! ```text
//! line <x1> <y1> <x2> <y2>
//! rect <x0> <y0> <x1> <y1>
//! oval <cx> <cy> <rx> <ry>
//! polygon <x0> <y0> ... <xn> <yn>
//! text <x> <y> <reserved> "<label>"
//! ```
//!
//! Values are taken as-is, in whatever frame the text was written in.

use std::str::FromStr;

use super::element::{Element, ElementKind};
use super::point::Point;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: empty element description")]
    Empty { line: usize },
    #[error("line {line}: unknown element kind `{kind}`")]
    UnknownKind { line: usize, kind: String },
    #[error("line {line}: `{kind}` expects {expected} numbers, found {found}")]
    Arity {
        line: usize,
        kind: ElementKind,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: polygon needs an even number of at least 4 numbers, found {found}")]
    PolygonArity { line: usize, found: usize },
    #[error("line {line}: `{token}` is not an integer")]
    NotInteger { line: usize, token: String },
    #[error("line {line}: text label must be wrapped in double quotes")]
    UnquotedLabel { line: usize },
    #[error("line {line}: coordinates fall outside the drawable range")]
    OutOfRange { line: usize },
}

impl ParseError {
    /// 1-based line the error was found on
    pub fn line(&self) -> usize {
        match self {
            ParseError::Empty { line }
            | ParseError::UnknownKind { line, .. }
            | ParseError::Arity { line, .. }
            | ParseError::PolygonArity { line, .. }
            | ParseError::NotInteger { line, .. }
            | ParseError::UnquotedLabel { line }
            | ParseError::OutOfRange { line } => *line,
        }
    }
}

/// Split off the first whitespace-delimited token
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

fn parse_int(token: &str, line: usize) -> Result<i32, ParseError> {
    token.parse().map_err(|_| ParseError::NotInteger {
        line,
        token: token.to_string(),
    })
}

fn parse_ints(rest: &str, line: usize) -> Result<Vec<i32>, ParseError> {
    rest.split_whitespace()
        .map(|token| parse_int(token, line))
        .collect()
}

fn expect_four(kind: ElementKind, args: &[i32], line: usize) -> Result<[i32; 4], ParseError> {
    <[i32; 4]>::try_from(args).map_err(|_| ParseError::Arity {
        line,
        kind,
        expected: 4,
        found: args.len(),
    })
}

fn parse_text(rest: &str, line: usize) -> Result<Element, ParseError> {
    let mut numbers = [0i32; 3];
    let mut rest = rest;
    for (found, slot) in numbers.iter_mut().enumerate() {
        let Some((token, tail)) = next_token(rest) else {
            return Err(ParseError::Arity {
                line,
                kind: ElementKind::Text,
                expected: 3,
                found,
            });
        };
        *slot = parse_int(token, line)?;
        rest = tail;
    }

    // The reserved field is read for validation only
    let [x, y, _reserved] = numbers;

    let quoted = rest.trim();
    let label = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(ParseError::UnquotedLabel { line })?;

    Ok(Element::text(label, x, y))
}

/// Parse one description line; `line` is only used for error reporting
pub fn parse_element(input: &str, line: usize) -> Result<Element, ParseError> {
    let (keyword, rest) = next_token(input).ok_or(ParseError::Empty { line })?;
    let kind = ElementKind::from_name(keyword).ok_or_else(|| ParseError::UnknownKind {
        line,
        kind: keyword.to_string(),
    })?;

    if kind == ElementKind::Text {
        return parse_text(rest, line);
    }

    let args = parse_ints(rest, line)?;
    let element = match kind {
        ElementKind::Line => {
            let [x1, y1, x2, y2] = expect_four(kind, &args, line)?;
            Element::line(x1, y1, x2, y2)
        }
        ElementKind::Rect => {
            // Exported rectangles are y-flipped, keep their corner order
            let [x0, y0, x1, y1] = expect_four(kind, &args, line)?;
            Element::Rect {
                p0: Point::new(x0, y0),
                p1: Point::new(x1, y1),
            }
        }
        ElementKind::Oval => {
            let [cx, cy, rx, ry] = expect_four(kind, &args, line)?;
            Element::oval(cx, cy, rx, ry)
        }
        ElementKind::Polygon => {
            if args.len() < 4 || args.len() % 2 != 0 {
                return Err(ParseError::PolygonArity {
                    line,
                    found: args.len(),
                });
            }
            Element::polygon(
                args.chunks_exact(2)
                    .map(|pair| Point::new(pair[0], pair[1]))
                    .collect(),
            )
        }
        ElementKind::Text => unreachable!("text handled above"),
    };

    Ok(element)
}

/// Parse a whole scene description, skipping blank lines.
///
/// Each element comes with the 1-based line it was read from. Fails on the
/// first malformed line; nothing is returned in that case.
pub fn parse_scene(input: &str) -> Result<Vec<(usize, Element)>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| parse_element(text, index + 1).map(|element| (index + 1, element)))
        .collect()
}

impl FromStr for Element {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_element(s, 1)
    }
}

//! Integer canvas coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D integer coordinate pair.
///
/// In the screen frame `x` grows to the right and `y` grows downwards, matching
/// pointer coordinates. Exported values live in the flipped frame produced by
/// [`Element::translated`](super::Element::translated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, in i128 so any pair of i32 points fits
    pub fn distance_squared(self, other: Point) -> i128 {
        let dx = i128::from(self.x) - i128::from(other.x);
        let dy = i128::from(self.y) - i128::from(other.y);
        dx * dx + dy * dy
    }

    /// Whether `other` lies within `radius` pixels of this point (inclusive)
    pub fn is_near(self, other: Point, radius: i32) -> bool {
        let r = i64::from(radius);
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        if dx > r || dy > r {
            return false;
        }
        dx * dx + dy * dy <= r * r
    }

    /// Screen-to-export change of basis: shift by `-origin.x`, flip y around `origin.y`.
    ///
    /// Results outside the i32 range saturate.
    pub fn translated(self, origin_x: i32, origin_y: i32) -> Point {
        Point::new(
            self.x.saturating_sub(origin_x),
            origin_y.saturating_sub(self.y),
        )
    }

    /// Inverse of [`Point::translated`]; `None` when the screen position
    /// does not fit in i32
    pub fn checked_from_export(self, origin_x: i32, origin_y: i32) -> Option<Point> {
        Some(Point::new(
            self.x.checked_add(origin_x)?,
            origin_y.checked_sub(self.y)?,
        ))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

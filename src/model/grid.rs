//! Grid snapping for incoming pointer coordinates.

use super::point::Point;

/// Snap a single coordinate to the nearest multiple of `step` measured from `origin`.
///
/// Exact halves round towards positive infinity.
fn snap_axis(value: i32, origin: i32, step: i32) -> i32 {
    let step = i64::from(step);
    let offset = i64::from(value) - i64::from(origin);
    let cells = (2 * offset + step).div_euclid(2 * step);
    let snapped = cells * step + i64::from(origin);
    snapped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Snap `position` to the grid of pitch `step` anchored at `origin`.
///
/// `snapped = round((raw - origin) / step) * step + origin`, applied to x and
/// y independently. A step of 1 or less leaves the position untouched.
pub fn snap_to_grid(position: Point, origin: Point, step: i32) -> Point {
    if step <= 1 {
        return position;
    }

    Point::new(
        snap_axis(position.x, origin.x, step),
        snap_axis(position.y, origin.y, step),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_step_one_returns_original() {
        let pos = Point::new(33, 47);
        assert_eq!(snap_to_grid(pos, Point::new(3, 9), 1), pos);
    }

    #[test]
    fn test_snap_to_nearest_multiple() {
        let result = snap_to_grid(Point::new(12, 13), Point::ORIGIN, 5);
        assert_eq!(result, Point::new(10, 15));
    }

    #[test]
    fn test_snap_relative_to_origin() {
        // Grid lines sit at 2, 7, 12, 17, ...
        let result = snap_to_grid(Point::new(13, 16), Point::new(2, 2), 5);
        assert_eq!(result, Point::new(12, 17));
    }

    #[test]
    fn test_snap_half_rounds_up() {
        let result = snap_to_grid(Point::new(5, -5), Point::ORIGIN, 10);
        assert_eq!(result, Point::new(10, 0));
    }

    #[test]
    fn test_snap_negative_coordinates() {
        let result = snap_to_grid(Point::new(-12, -13), Point::ORIGIN, 5);
        assert_eq!(result, Point::new(-10, -15));
    }

    #[test]
    fn test_snap_already_on_grid() {
        let pos = Point::new(45, 90);
        assert_eq!(snap_to_grid(pos, Point::ORIGIN, 9), pos);
    }

    #[test]
    fn test_snap_preserves_cell() {
        // Everything within half a step of 20 lands on 20
        let step = 10;
        for raw in 15..25 {
            let result = snap_to_grid(Point::new(raw, raw), Point::ORIGIN, step);
            assert_eq!(result, Point::new(20, 20), "raw {} should snap to 20", raw);
        }
    }

    #[test]
    fn test_snap_extreme_values_saturate() {
        let result = snap_to_grid(Point::new(i32::MAX, i32::MIN), Point::ORIGIN, 9);
        assert_eq!(result, Point::new(2_147_483_646, -2_147_483_646));
    }
}

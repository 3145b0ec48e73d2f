//! Edge attachment points on node borders

use crate::layout::{BoundingBox, Point};

/// Side of a node box an edge attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Midpoint of one side of a box
pub fn attachment_point(bounds: &BoundingBox, side: Side) -> Point {
    match side {
        Side::Top => Point::new(bounds.x + bounds.width / 2.0, bounds.y),
        Side::Bottom => Point::new(bounds.x + bounds.width / 2.0, bounds.bottom()),
        Side::Left => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
        Side::Right => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
    }
}

/// Pick the facing sides of two boxes
///
/// Layer bands stack vertically, so vertical attachment wins unless the boxes
/// sit side by side.
pub fn facing_sides(from: &BoundingBox, to: &BoundingBox) -> (Side, Side) {
    let dx = to.center().x - from.center().x;
    let dy = to.center().y - from.center().y;
    let v_overlap = from.y < to.bottom() && from.bottom() > to.y;

    if v_overlap || dx.abs() > dy.abs() * 1.5 {
        if dx >= 0.0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else if dy >= 0.0 {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    }
}

/// Start and end of a straight edge between two boxes
pub fn edge_endpoints(from: &BoundingBox, to: &BoundingBox) -> (Point, Point) {
    let (a, b) = facing_sides(from, to);
    (attachment_point(from, a), attachment_point(to, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_points() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(attachment_point(&bounds, Side::Top), Point::new(50.0, 0.0));
        assert_eq!(attachment_point(&bounds, Side::Bottom), Point::new(50.0, 50.0));
        assert_eq!(attachment_point(&bounds, Side::Left), Point::new(0.0, 25.0));
        assert_eq!(attachment_point(&bounds, Side::Right), Point::new(100.0, 25.0));
    }

    #[test]
    fn test_stacked_boxes_attach_vertically() {
        let upper = BoundingBox::new(0.0, 0.0, 180.0, 60.0);
        let lower = BoundingBox::new(125.0, 200.0, 180.0, 60.0);
        assert_eq!(facing_sides(&upper, &lower), (Side::Bottom, Side::Top));
        assert_eq!(facing_sides(&lower, &upper), (Side::Top, Side::Bottom));
    }

    #[test]
    fn test_same_band_attaches_horizontally() {
        let left = BoundingBox::new(-125.0, 200.0, 180.0, 60.0);
        let right = BoundingBox::new(125.0, 200.0, 180.0, 60.0);
        let (start, end) = edge_endpoints(&left, &right);
        assert_eq!(start, Point::new(55.0, 230.0));
        assert_eq!(end, Point::new(125.0, 230.0));
    }
}

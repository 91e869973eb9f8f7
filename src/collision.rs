/// Axis-aligned bounding-box test shared by every entity pair.

use crate::entities::Rect;

/// `true` when the rectangles share interior area. Each near edge must be
/// strictly before the other's far edge on both axes, so rectangles that only
/// touch along an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

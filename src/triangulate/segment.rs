//! Constraint segments.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A constraint segment to be honored by a conforming triangulation.
///
/// Splitting replaces a segment with its two halves; the payload tag is
/// carried onto both, so a caller can map every final sub-segment back to
/// the constraint it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSegment<F> {
    /// Start coordinate.
    pub start: Point2<F>,
    /// End coordinate.
    pub end: Point2<F>,
    /// Opaque caller tag, preserved across splits.
    pub data: Option<usize>,
}

impl<F: Float> ConstraintSegment<F> {
    /// Creates a constraint segment.
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        ConstraintSegment {
            start,
            end,
            data: None,
        }
    }

    /// Creates a constraint segment carrying a caller tag.
    pub fn with_data(start: Point2<F>, end: Point2<F>, data: usize) -> Self {
        ConstraintSegment {
            start,
            end,
            data: Some(data),
        }
    }

    /// Returns the segment's midpoint.
    pub fn midpoint(&self) -> Point2<F> {
        self.start.midpoint(self.end)
    }

    /// Returns the segment geometry.
    pub fn as_segment(&self) -> Segment2<F> {
        Segment2::new(self.start, self.end)
    }

    /// Splits at a point, producing the two halves with the same tag.
    pub fn split_at(&self, point: Point2<F>) -> (Self, Self) {
        (
            ConstraintSegment {
                start: self.start,
                end: point,
                data: self.data,
            },
            ConstraintSegment {
                start: point,
                end: self.end,
                data: self.data,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_data() {
        let seg: ConstraintSegment<f64> =
            ConstraintSegment::with_data(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 7);
        let (a, b) = seg.split_at(Point2::new(4.0, 0.0));
        assert_eq!(a.start, seg.start);
        assert_eq!(a.end, Point2::new(4.0, 0.0));
        assert_eq!(b.start, Point2::new(4.0, 0.0));
        assert_eq!(b.end, seg.end);
        assert_eq!(a.data, Some(7));
        assert_eq!(b.data, Some(7));
    }

    #[test]
    fn test_midpoint() {
        let seg: ConstraintSegment<f64> =
            ConstraintSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 4.0));
        assert_eq!(seg.midpoint(), Point2::new(5.0, 2.0));
    }
}

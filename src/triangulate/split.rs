//! Split-point selection strategies for constraint enforcement.

use super::segment::ConstraintSegment;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Strategy for choosing the point at which an encroached constraint
/// segment is split.
pub trait SplitPointFinder<F: Float> {
    /// Chooses a split point for `seg`, given the encroaching site.
    fn find_split_point(&self, seg: &ConstraintSegment<F>, encroach: Point2<F>) -> Point2<F>;
}

/// Splits every encroached segment at its midpoint.
///
/// Simple and always converging toward shorter segments, but it can
/// produce many more Steiner points than necessary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointSplitPointFinder;

impl<F: Float> SplitPointFinder<F> for MidpointSplitPointFinder {
    fn find_split_point(&self, seg: &ConstraintSegment<F>, _encroach: Point2<F>) -> Point2<F> {
        seg.midpoint()
    }
}

/// Splits near the projection of the encroaching site, pushed far enough
/// from the segment ends that the new sub-segments are no longer
/// encroached by it.
///
/// The split point is the encroaching site's projection onto the segment,
/// clamped so that it keeps a minimum distance from both endpoints: 80%
/// of the diameter of the largest circle around the projection that
/// excludes the encroaching site, and never past the midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEncroachingSplitPointFinder;

impl<F: Float> SplitPointFinder<F> for NonEncroachingSplitPointFinder {
    fn find_split_point(&self, seg: &ConstraintSegment<F>, encroach: Point2<F>) -> Point2<F> {
        let line = seg.as_segment();
        let mid_len = line.length() * F::from(0.5).unwrap();

        let proj_t = line.project(encroach).max(F::zero()).min(F::one());
        let proj = line.point_at(proj_t);
        let non_encroach_diam = proj.distance(encroach) * F::from(1.6).unwrap();
        let max_split_len = non_encroach_diam.min(mid_len);

        split_at(line, proj, max_split_len)
    }
}

/// Clamps a chosen split point so it keeps `minimum_len` distance from
/// both segment endpoints.
fn split_at<F: Float>(line: Segment2<F>, pt: Point2<F>, minimum_len: F) -> Point2<F> {
    let seg_len = line.length();
    if seg_len <= F::zero() {
        return pt;
    }
    let min_frac = minimum_len / seg_len;
    if pt.distance(line.start) < minimum_len {
        return line.point_at(min_frac);
    }
    if pt.distance(line.end) < minimum_len {
        return line.point_at(F::one() - min_frac);
    }
    pt
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> ConstraintSegment<f64> {
        ConstraintSegment::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn test_midpoint_finder() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let pt = MidpointSplitPointFinder.find_split_point(&s, Point2::new(2.0, 1.0));
        assert_eq!(pt, Point2::new(5.0, 0.0));
    }

    #[test]
    fn test_non_encroaching_central_encroacher() {
        let s = seg(0.0, 0.0, 100.0, 0.0);
        let pt = NonEncroachingSplitPointFinder.find_split_point(&s, Point2::new(50.0, 1.0));
        // Central encroacher projects to the midpoint, which is kept.
        assert_relative_eq!(pt.x, 50.0, epsilon = 1e-12);
        assert_relative_eq!(pt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_encroaching_near_endpoint() {
        let s = seg(0.0, 0.0, 100.0, 0.0);
        // Projects to (1, 0), two units from the encroacher: the minimum
        // split length 1.6 * 2 = 3.2 exceeds the projection's distance
        // from the start, so the split point is pushed out to x = 3.2.
        let pt = NonEncroachingSplitPointFinder.find_split_point(&s, Point2::new(1.0, 2.0));
        assert_relative_eq!(pt.x, 3.2, epsilon = 1e-9);
        assert_relative_eq!(pt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_split_point_is_on_segment() {
        let s = seg(3.0, 4.0, 13.0, 24.0);
        let enc = Point2::new(7.0, 9.0);
        let pt = NonEncroachingSplitPointFinder.find_split_point(&s, enc);
        let line = s.as_segment();
        assert!(line.distance_to_point(pt) < 1e-9);
        assert!(pt.distance(line.start) > 0.0);
        assert!(pt.distance(line.end) > 0.0);
    }
}

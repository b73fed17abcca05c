//! Index-accelerated noder and its intersection strategies.

use super::chain::{chains_of, overlap_pairs, MonotoneChain};
use super::segment_string::SegmentString;
use crate::algorithm::{edge_fraction, LineIntersection, RobustLineIntersector};
use crate::index::StrTree;
use crate::primitives::Point2;
use num_traits::Float;

/// Strategy invoked by the noder for every candidate segment pair.
///
/// Implementations decide what an intersection means: the
/// [`IntersectionAdder`] records it on both strings, the
/// [`InteriorIntersectionFinder`] only checks for one and stops.
pub trait SegmentIntersector<F: Float> {
    /// Processes the candidate pair: segment `seg0` of string `i0`
    /// against segment `seg1` of string `i1`.
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<F>],
        i0: usize,
        seg0: usize,
        i1: usize,
        seg1: usize,
    );

    /// When `true`, the noder stops feeding candidate pairs early.
    fn is_done(&self) -> bool {
        false
    }
}

/// Computes all intersections in a collection of segment strings, using a
/// spatial index of monotone chains to prune candidate pairs.
///
/// # Example
///
/// ```
/// use robustum::Point2;
/// use robustum::noding::{IndexNoder, IntersectionAdder, SegmentString};
///
/// let mut strings = vec![
///     SegmentString::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)], 0),
///     SegmentString::new(vec![Point2::new(0.0, 10.0), Point2::new(10.0, 0.0)], 1),
/// ];
/// let mut adder = IntersectionAdder::new();
/// IndexNoder::new().compute_nodes(&mut strings, &mut adder);
///
/// // Both strings now carry the crossing at (5, 5).
/// assert_eq!(strings[0].node_count(), 1);
/// assert_eq!(strings[1].node_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexNoder;

impl IndexNoder {
    /// Creates a noder.
    pub fn new() -> Self {
        IndexNoder
    }

    /// Runs the intersector over every candidate segment pair in the
    /// collection, including each string against itself.
    pub fn compute_nodes<F: Float, SI: SegmentIntersector<F>>(
        &self,
        strings: &mut [SegmentString<F>],
        intersector: &mut SI,
    ) {
        let mut chains: Vec<MonotoneChain<F>> = Vec::new();
        for (i, s) in strings.iter().enumerate() {
            chains.extend(chains_of(s.coordinates(), i));
        }

        let mut tree: StrTree<F, usize> = StrTree::new();
        for (ci, chain) in chains.iter().enumerate() {
            tree.insert(chain.bounds, ci);
        }

        for ci in 0..chains.len() {
            // Each unordered chain pair is examined once.
            let candidates: Vec<usize> = tree
                .query(&chains[ci].bounds)
                .into_iter()
                .copied()
                .filter(|&cj| cj > ci)
                .collect();
            for cj in candidates {
                let (a, b) = (&chains[ci], &chains[cj]);
                let pairs = overlap_pairs(
                    strings[a.string_index].coordinates(),
                    a.start,
                    a.end,
                    strings[b.string_index].coordinates(),
                    b.start,
                    b.end,
                );
                for (s0, s1) in pairs {
                    intersector.process_intersections(
                        strings,
                        chains[ci].string_index,
                        s0,
                        chains[cj].string_index,
                        s1,
                    );
                    if intersector.is_done() {
                        return;
                    }
                }
            }
        }
    }
}

/// Records every non-trivial intersection on both involved strings.
///
/// Trivial intersections are the inevitable shared endpoints of adjacent
/// segments within one string (including the closure of a ring); they are
/// not recorded and do not count as intersections found.
#[derive(Debug, Clone)]
pub struct IntersectionAdder<F> {
    li: RobustLineIntersector,
    /// True once any non-trivial intersection has been found.
    pub has_intersection: bool,
    /// True once a proper (interior-interior) intersection has been
    /// found.
    pub has_proper: bool,
    /// The first proper intersection point found.
    pub proper_point: Option<Point2<F>>,
    /// Number of non-trivial intersections processed.
    pub num_intersections: usize,
}

impl<F: Float> Default for IntersectionAdder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> IntersectionAdder<F> {
    /// Creates an adder with a fresh robust intersector.
    pub fn new() -> Self {
        IntersectionAdder {
            li: RobustLineIntersector::new(),
            has_intersection: false,
            has_proper: false,
            proper_point: None,
            num_intersections: 0,
        }
    }

    /// A single-point intersection between adjacent segments of the same
    /// string at their shared vertex carries no information.
    fn is_trivial(
        strings: &[SegmentString<F>],
        i0: usize,
        seg0: usize,
        i1: usize,
        seg1: usize,
        single_point: bool,
    ) -> bool {
        if i0 != i1 || !single_point {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        if strings[i0].is_closed() {
            let last = strings[i0].segment_count() - 1;
            if (seg0 == 0 && seg1 == last) || (seg1 == 0 && seg0 == last) {
                return true;
            }
        }
        false
    }
}

impl<F: Float> SegmentIntersector<F> for IntersectionAdder<F> {
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<F>],
        i0: usize,
        seg0: usize,
        i1: usize,
        seg1: usize,
    ) {
        if i0 == i1 && seg0 == seg1 {
            return;
        }
        let p0 = strings[i0].segment(seg0);
        let p1 = strings[i1].segment(seg1);
        let result = self.li.compute(p0.start, p0.end, p1.start, p1.end);
        if !result.has_intersection() {
            return;
        }
        let single_point = matches!(result, LineIntersection::Point { .. });
        if Self::is_trivial(strings, i0, seg0, i1, seg1, single_point) {
            return;
        }

        self.has_intersection = true;
        self.num_intersections += 1;
        if result.is_proper() && !self.has_proper {
            self.has_proper = true;
            if let LineIntersection::Point { point, .. } = result {
                self.proper_point = Some(point);
            }
        }

        for pt in result.points() {
            let f0 = edge_fraction(pt, p0.start, p0.end);
            strings[i0].add_intersection(pt, seg0, f0);
            let f1 = edge_fraction(pt, p1.start, p1.end);
            strings[i1].add_intersection(pt, seg1, f1);
        }
    }
}

/// Finds one intersection point interior to at least one of the segments
/// involved, then stops.
///
/// This is the validation strategy: in a fully noded collection, segments
/// may share endpoints but may never meet in a segment interior.
#[derive(Debug, Clone)]
pub struct InteriorIntersectionFinder<F> {
    li: RobustLineIntersector,
    /// The first interior intersection found, with the two offending
    /// segments' endpoints.
    pub intersection: Option<(Point2<F>, [Point2<F>; 4])>,
}

impl<F: Float> Default for InteriorIntersectionFinder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> InteriorIntersectionFinder<F> {
    /// Creates a finder.
    pub fn new() -> Self {
        InteriorIntersectionFinder {
            li: RobustLineIntersector::new(),
            intersection: None,
        }
    }
}

impl<F: Float> SegmentIntersector<F> for InteriorIntersectionFinder<F> {
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<F>],
        i0: usize,
        seg0: usize,
        i1: usize,
        seg1: usize,
    ) {
        if self.intersection.is_some() {
            return;
        }
        if i0 == i1 && seg0 == seg1 {
            return;
        }
        let s0 = strings[i0].segment(seg0);
        let s1 = strings[i1].segment(seg1);
        let result = self.li.compute(s0.start, s0.end, s1.start, s1.end);
        // An intersection point is interior unless it coincides with an
        // endpoint of both segments. Exactly duplicated segments therefore
        // pass; partial collinear overlap does not.
        let endpoint_of_both = |point: Point2<F>| {
            (point == s0.start || point == s0.end) && (point == s1.start || point == s1.end)
        };
        let interior_pt = if result.is_proper() {
            result.points().first().copied()
        } else {
            result.points().into_iter().find(|&pt| !endpoint_of_both(pt))
        };
        if let Some(pt) = interior_pt {
            self.intersection = Some((pt, [s0.start, s0.end, s1.start, s1.end]));
        }
    }

    fn is_done(&self) -> bool {
        self.intersection.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(coords: &[(f64, f64)], source: usize) -> SegmentString<f64> {
        SegmentString::new(
            coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            source,
        )
    }

    #[test]
    fn test_crossing_recorded_on_both_strings() {
        let mut strings = vec![
            string(&[(0.0, 0.0), (10.0, 10.0)], 0),
            string(&[(0.0, 10.0), (10.0, 0.0)], 1),
        ];
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);
        assert!(adder.has_intersection);
        assert!(adder.has_proper);
        assert_eq!(adder.proper_point, Some(Point2::new(5.0, 5.0)));
        assert_eq!(strings[0].node_count(), 1);
        assert_eq!(strings[1].node_count(), 1);
    }

    #[test]
    fn test_ring_closure_is_trivial() {
        let mut strings = vec![string(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            0,
        )];
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);
        assert!(!adder.has_intersection);
        assert_eq!(strings[0].node_count(), 0);
    }

    #[test]
    fn test_self_crossing_ring_found() {
        // Figure-eight: segments 0 and 2 cross at (1, 1).
        let mut strings = vec![string(
            &[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)],
            0,
        )];
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);
        assert!(adder.has_proper);
        assert_eq!(adder.proper_point, Some(Point2::new(1.0, 1.0)));
        // One crossing, recorded once for each involved segment.
        assert_eq!(strings[0].node_count(), 2);
    }

    #[test]
    fn test_shared_endpoint_between_strings_recorded_not_proper() {
        let mut strings = vec![
            string(&[(0.0, 0.0), (5.0, 5.0)], 0),
            string(&[(5.0, 5.0), (10.0, 0.0)], 1),
        ];
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);
        assert!(adder.has_intersection);
        assert!(!adder.has_proper);
    }

    #[test]
    fn test_noding_idempotence() {
        // Node a crossing pair, split the results, re-node: no new nodes.
        let mut strings = vec![
            string(&[(0.0, 0.0), (10.0, 10.0)], 0),
            string(&[(0.0, 10.0), (10.0, 0.0)], 1),
        ];
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);

        let mut renoded: Vec<SegmentString<f64>> = Vec::new();
        for s in &strings {
            for piece in s.noded_coordinates() {
                renoded.push(SegmentString::new(piece, s.source()));
            }
        }
        assert_eq!(renoded.len(), 4);

        let mut second = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut renoded, &mut second);
        assert!(!second.has_proper);
        // Shared endpoints at the node are found but add no split points.
        for s in &renoded {
            for piece in s.noded_coordinates() {
                assert_eq!(piece.len(), 2);
            }
            assert_eq!(s.noded_coordinates().len(), 1);
        }
    }

    #[test]
    fn test_interior_finder_flags_unnoded() {
        let mut strings = vec![
            string(&[(0.0, 0.0), (10.0, 0.0)], 0),
            string(&[(5.0, -5.0), (5.0, 5.0)], 1),
        ];
        let mut finder = InteriorIntersectionFinder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut finder);
        let (pt, _) = finder.intersection.expect("should find interior intersection");
        assert_eq!(pt, Point2::new(5.0, 0.0));
    }

    #[test]
    fn test_interior_finder_accepts_noded() {
        let mut strings = vec![
            string(&[(0.0, 0.0), (5.0, 0.0)], 0),
            string(&[(5.0, 0.0), (10.0, 0.0)], 1),
            string(&[(5.0, -5.0), (5.0, 0.0)], 2),
        ];
        let mut finder = InteriorIntersectionFinder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut finder);
        assert!(finder.intersection.is_none());
    }
}

//! Monotone chains for coarse intersection pruning.
//!
//! A monotone chain is a maximal run of segments heading into the same
//! quadrant. Within one chain no two segments can properly intersect, and
//! a chain's envelope is exactly the envelope of its end sections, which
//! makes chain-versus-chain overlap a cheap recursive envelope test.

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

/// A maximal monotone run of segments within one segment string.
#[derive(Debug, Clone)]
pub struct MonotoneChain<F> {
    /// Index of the owning string in the collection being noded.
    pub string_index: usize,
    /// Index of the chain's first coordinate.
    pub start: usize,
    /// Index of the chain's last coordinate.
    pub end: usize,
    /// Envelope of the chain's coordinates.
    pub bounds: Aabb2<F>,
}

/// Splits a coordinate sequence into its monotone chains.
pub fn chains_of<F: Float>(pts: &[Point2<F>], string_index: usize) -> Vec<MonotoneChain<F>> {
    let mut chains = Vec::new();
    let mut start = 0usize;
    while start < pts.len() - 1 {
        let end = chain_end(pts, start);
        let bounds = Aabb2::from_points(pts[start..=end].iter().copied()).unwrap();
        chains.push(MonotoneChain {
            string_index,
            start,
            end,
            bounds,
        });
        start = end;
    }
    chains
}

/// Finds the index of the last coordinate of the monotone chain starting
/// at `start`.
fn chain_end<F: Float>(pts: &[Point2<F>], start: usize) -> usize {
    // Skip leading repeated points so the chain has a direction.
    let mut first_seg = start;
    while first_seg < pts.len() - 1 && pts[first_seg] == pts[first_seg + 1] {
        first_seg += 1;
    }
    if first_seg >= pts.len() - 1 {
        return pts.len() - 1;
    }
    let quadrant = (pts[first_seg + 1] - pts[first_seg]).quadrant();
    let mut last = first_seg + 1;
    while last < pts.len() - 1 {
        if pts[last] != pts[last + 1] && (pts[last + 1] - pts[last]).quadrant() != quadrant {
            break;
        }
        last += 1;
    }
    last
}

/// Enumerates the segment index pairs of two chain sections whose
/// envelopes overlap, by recursive bisection.
///
/// The returned pairs are candidates only; the caller still runs the
/// exact intersection test on each.
pub fn overlap_pairs<F: Float>(
    pts0: &[Point2<F>],
    start0: usize,
    end0: usize,
    pts1: &[Point2<F>],
    start1: usize,
    end1: usize,
) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    recurse(pts0, start0, end0, pts1, start1, end1, &mut out);
    out
}

fn recurse<F: Float>(
    pts0: &[Point2<F>],
    start0: usize,
    end0: usize,
    pts1: &[Point2<F>],
    start1: usize,
    end1: usize,
    out: &mut Vec<(usize, usize)>,
) {
    // Single segment on both sides: a candidate pair.
    if end0 - start0 == 1 && end1 - start1 == 1 {
        out.push((start0, start1));
        return;
    }
    let env0 = Aabb2::from_points(pts0[start0..=end0].iter().copied()).unwrap();
    let env1 = Aabb2::from_points(pts1[start1..=end1].iter().copied()).unwrap();
    if !env0.intersects(env1) {
        return;
    }
    let mid0 = (start0 + end0) / 2;
    let mid1 = (start1 + end1) / 2;
    if start0 < mid0 {
        if start1 < mid1 {
            recurse(pts0, start0, mid0, pts1, start1, mid1, out);
        }
        if mid1 < end1 {
            recurse(pts0, start0, mid0, pts1, mid1, end1, out);
        }
    }
    if mid0 < end0 {
        if start1 < mid1 {
            recurse(pts0, mid0, end0, pts1, start1, mid1, out);
        }
        if mid1 < end1 {
            recurse(pts0, mid0, end0, pts1, mid1, end1, out);
        }
    }
}

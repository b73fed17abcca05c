//! Robust line segment intersection.

use super::robust::orientation_index;
use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

/// Result of intersecting two line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<F> {
    /// The segments do not intersect.
    None,
    /// The segments intersect at a single point.
    Point {
        /// The intersection point.
        point: Point2<F>,
        /// True when the point is interior to both segments. An
        /// intersection at an endpoint of either segment is not proper.
        proper: bool,
    },
    /// The segments are collinear and overlap along a line.
    Collinear {
        /// Start of the overlapping region.
        start: Point2<F>,
        /// End of the overlapping region.
        end: Point2<F>,
    },
}

impl<F: Float> LineIntersection<F> {
    /// Returns `true` for anything other than `None`.
    #[inline]
    pub fn has_intersection(&self) -> bool {
        !matches!(self, LineIntersection::None)
    }

    /// Returns `true` for a proper (interior-interior) point intersection.
    #[inline]
    pub fn is_proper(&self) -> bool {
        matches!(self, LineIntersection::Point { proper: true, .. })
    }

    /// Returns the intersection points, in order.
    pub fn points(&self) -> Vec<Point2<F>> {
        match *self {
            LineIntersection::None => Vec::new(),
            LineIntersection::Point { point, .. } => vec![point],
            LineIntersection::Collinear { start, end } => vec![start, end],
        }
    }
}

/// Computes the intersection of two line segments with robust
/// classification of near-collinear and near-endpoint cases.
///
/// The endpoint orientations are evaluated with the exact
/// [`orientation_index`] predicate, so the crossing/touching decision is
/// never wrong; only the constructed interior intersection point is
/// subject to rounding, and it is computed on translated coordinates to
/// keep that rounding small.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobustLineIntersector;

impl RobustLineIntersector {
    /// Creates a new intersector.
    pub fn new() -> Self {
        RobustLineIntersector
    }

    /// Computes the intersection of segment `p1-p2` with segment `q1-q2`.
    pub fn compute<F: Float>(
        &self,
        p1: Point2<F>,
        p2: Point2<F>,
        q1: Point2<F>,
        q2: Point2<F>,
    ) -> LineIntersection<F> {
        let env_p = Aabb2::from_corners(p1, p2);
        let env_q = Aabb2::from_corners(q1, q2);
        if !env_p.intersects(env_q) {
            return LineIntersection::None;
        }

        let pq1 = orientation_index(p1, p2, q1).sign();
        let pq2 = orientation_index(p1, p2, q2).sign();
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return LineIntersection::None;
        }

        let qp1 = orientation_index(q1, q2, p1).sign();
        let qp2 = orientation_index(q1, q2, p2).sign();
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return LineIntersection::None;
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return Self::collinear_intersection(p1, p2, q1, q2, env_p, env_q);
        }

        // At this point exactly one intersection point exists. If any
        // endpoint lies on the other segment, the intersection is that
        // endpoint and is not proper.
        let point = if pq1 == 0 {
            q1
        } else if pq2 == 0 {
            q2
        } else if qp1 == 0 {
            p1
        } else if qp2 == 0 {
            p2
        } else {
            return LineIntersection::Point {
                point: Self::interior_intersection(p1, p2, q1, q2),
                proper: true,
            };
        };
        LineIntersection::Point {
            point,
            proper: false,
        }
    }

    /// Handles the four-collinear-orientations case by intersecting the
    /// segments' envelopes.
    fn collinear_intersection<F: Float>(
        p1: Point2<F>,
        p2: Point2<F>,
        q1: Point2<F>,
        q2: Point2<F>,
        env_p: Aabb2<F>,
        env_q: Aabb2<F>,
    ) -> LineIntersection<F> {
        let mut pts: Vec<Point2<F>> = Vec::with_capacity(2);
        for q in [q1, q2] {
            if env_p.contains_point(q) {
                pts.push(q);
            }
        }
        for p in [p1, p2] {
            if env_q.contains_point(p) && !pts.iter().any(|v| *v == p) {
                pts.push(p);
            }
        }
        match pts.len() {
            0 => LineIntersection::None,
            1 => LineIntersection::Point {
                point: pts[0],
                proper: false,
            },
            _ => {
                if pts[0] == pts[1] {
                    LineIntersection::Point {
                        point: pts[0],
                        proper: false,
                    }
                } else {
                    LineIntersection::Collinear {
                        start: pts[0],
                        end: pts[1],
                    }
                }
            }
        }
    }

    /// Computes the interior crossing point of two properly intersecting
    /// segments.
    ///
    /// The inputs are translated so their envelope intersection is near
    /// the origin before solving, which conditions the division; the
    /// result is clamped into the envelope of both segments.
    fn interior_intersection<F: Float>(
        p1: Point2<F>,
        p2: Point2<F>,
        q1: Point2<F>,
        q2: Point2<F>,
    ) -> Point2<F> {
        let mid = Aabb2::from_corners(p1, p2)
            .union(Aabb2::from_corners(q1, q2))
            .center();

        let tp1 = p1 - (mid - Point2::origin());
        let tp2 = p2 - (mid - Point2::origin());
        let tq1 = q1 - (mid - Point2::origin());
        let tq2 = q2 - (mid - Point2::origin());

        let dp = tp2 - tp1;
        let dq = tq2 - tq1;
        let denom = dp.cross(dq);
        let t = (tq1 - tp1).cross(dq) / denom;
        let raw = tp1.lerp(tp2, t);
        let point = Point2::new(raw.x + mid.x, raw.y + mid.y);

        // Rounding can push the constructed point just outside one of the
        // envelopes; snap to the nearest endpoint when it does.
        let env_p = Aabb2::from_corners(p1, p2);
        let env_q = Aabb2::from_corners(q1, q2);
        if env_p.contains_point(point) && env_q.contains_point(point) {
            point
        } else {
            let mut best = p1;
            let mut best_d = point.distance_squared(p1);
            for cand in [p2, q1, q2] {
                let d = point.distance_squared(cand);
                if d < best_d {
                    best = cand;
                    best_d = d;
                }
            }
            best
        }
    }
}

/// Computes the fractional position of `pt` along the segment `p0-p1`.
///
/// The fraction is measured on the dominant axis of the segment, which
/// keeps the ordering of intersection points along a segment stable even
/// when the points are nearly coincident. Used to key intersection nodes.
pub fn edge_fraction<F: Float>(pt: Point2<F>, p0: Point2<F>, p1: Point2<F>) -> F {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    let frac = if dx > dy {
        if dx > F::zero() {
            (pt.x - p0.x) / (p1.x - p0.x)
        } else {
            F::zero()
        }
    } else if dy > F::zero() {
        (pt.y - p0.y) / (p1.y - p0.y)
    } else {
        F::zero()
    };
    frac.max(F::zero()).min(F::one())
}

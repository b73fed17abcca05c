//! Delaunay triangulation over a quad-edge subdivision.
//!
//! [`triangulate`] covers the unconstrained case; the
//! [`ConformingDelaunayTriangulator`] additionally enforces a set of
//! constraint segments by inserting Steiner points until every constraint
//! is a union of triangulation edges, while keeping the whole
//! triangulation truly Delaunay.

mod conforming;
mod incremental;
mod quadedge;
mod segment;
mod split;
mod vertex;

pub use conforming::ConformingDelaunayTriangulator;
pub use incremental::insert_site;
pub use quadedge::{EdgeId, QuadEdgeSubdivision};
pub use segment::ConstraintSegment;
pub use split::{MidpointSplitPointFinder, NonEncroachingSplitPointFinder, SplitPointFinder};
pub use vertex::Vertex;

use crate::bounds::Aabb2;
use crate::error::TopologyError;
use crate::primitives::Point2;
use num_traits::Float;

/// Computes the Delaunay triangulation of a point set.
///
/// Convenience entry point for the unconstrained case: sites within
/// `tolerance` of an earlier site are merged. Returns the subdivision for
/// triangle and edge enumeration.
///
/// # Example
///
/// ```
/// use robustum::Point2;
/// use robustum::triangulate::triangulate;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
///     Point2::new(5.0, 5.0),
/// ];
/// let subdiv = triangulate(&points, 1e-9).unwrap();
/// assert_eq!(subdiv.triangles().len(), 4);
/// ```
pub fn triangulate<F: Float>(
    points: &[Point2<F>],
    tolerance: F,
) -> Result<QuadEdgeSubdivision<F>, TopologyError> {
    let env = Aabb2::from_points(points.iter().copied())
        .unwrap_or_else(|| Aabb2::from_point(Point2::origin()));
    let mut subdiv = QuadEdgeSubdivision::new(env, tolerance);
    for &p in points {
        let near_existing = subdiv
            .sites()
            .any(|(_, v)| v.point.approx_eq(p, tolerance));
        if near_existing {
            continue;
        }
        let v = subdiv.add_vertex(Vertex::new(p));
        insert_site(&mut subdiv, v)?;
    }
    Ok(subdiv)
}

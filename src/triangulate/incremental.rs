//! Incremental Delaunay insertion.

use super::quadedge::{EdgeId, QuadEdgeSubdivision};
use crate::algorithm::in_circle;
use crate::error::TopologyError;
use num_traits::Float;

/// Inserts the vertex with id `v` into the subdivision, restoring the
/// Delaunay condition locally by edge flipping.
///
/// Returns an edge with the new vertex as origin, or, when the vertex
/// coincides with an existing site within the snap tolerance, an edge of
/// that existing site. The subdivision is a valid Delaunay triangulation
/// of all inserted sites again when this returns.
pub fn insert_site<F: Float>(
    subdiv: &mut QuadEdgeSubdivision<F>,
    v: usize,
) -> Result<EdgeId, TopologyError> {
    let p = subdiv.vertex(v).point;
    let mut e = subdiv.locate(p)?;

    if subdiv.is_vertex_of_edge(e, p) {
        return Ok(e);
    }
    // The located face contains the point; it may lie on any of the
    // face's three edges.
    for candidate in [e, subdiv.lnext(e), subdiv.lprev(e)] {
        if subdiv.is_on_edge(candidate, p) {
            // The point falls on an existing edge: remove it and
            // re-triangulate the surrounding quadrilateral around the new
            // vertex.
            e = subdiv.oprev(candidate);
            let doomed = subdiv.onext(e);
            subdiv.delete_edge(doomed);
            break;
        }
    }

    // Connect the new vertex to the vertices of the containing face.
    let mut base = subdiv.make_edge(subdiv.org(e), v);
    subdiv.splice(base, e);
    let start_edge = base;
    loop {
        base = subdiv.connect(e, QuadEdgeSubdivision::<F>::sym(base));
        e = subdiv.oprev(base);
        if subdiv.lnext(e) == start_edge {
            break;
        }
    }

    // Examine suspect edges and flip any that violate the empty-
    // circumcircle condition against the new vertex.
    loop {
        let t = subdiv.oprev(e);
        let t_dest = subdiv.dest_point(t);
        if subdiv.right_of(t_dest, e)
            && in_circle(
                subdiv.org_point(e),
                t_dest,
                subdiv.dest_point(e),
                p,
            )
        {
            subdiv.swap(e);
            e = subdiv.oprev(e);
        } else if subdiv.onext(e) == start_edge {
            return Ok(base);
        } else {
            let onext = subdiv.onext(e);
            e = subdiv.lprev(onext);
        }
    }
}

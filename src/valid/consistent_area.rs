//! Consistency checking of area labels in a self-noded graph.

use crate::graph::GeometryGraph;
use crate::primitives::Point2;
use num_traits::Float;

/// Outcome of the consistent-area test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsistentAreaResult<F> {
    /// The area labeling is consistent and no rings are duplicated.
    Consistent,
    /// A proper self-intersection or an inconsistent node labeling was
    /// found at the coordinate.
    SelfIntersection(Point2<F>),
    /// Two rings are topologically identical; the coordinate is on the
    /// duplicated edge.
    DuplicateRings(Point2<F>),
}

/// Checks that a graph representing an area is consistent with area
/// semantics.
///
/// Three conditions are tested, in order:
/// 1. no proper self-intersection exists (rings may touch at nodes but
///    never cross),
/// 2. at every node, the incident edge-end bundles carry a consistent
///    area labeling,
/// 3. no bundle stacks more than one edge-end, which after the first two
///    checks pass can only mean two identical rings.
pub fn check_consistent_area<F: Float>(graph: &mut GeometryGraph<F>) -> ConsistentAreaResult<F> {
    let info = graph.compute_self_nodes();
    if info.has_proper {
        if let Some(pt) = info.proper_point {
            return ConsistentAreaResult::SelfIntersection(pt);
        }
    }

    let geom = graph.arg_index();
    let (nodes, split) = graph.node_graph();

    for node in nodes.iter() {
        if !node.star.is_area_labels_consistent(geom) {
            return ConsistentAreaResult::SelfIntersection(node.coordinate);
        }
    }

    for node in nodes.iter() {
        for bundle in node.star.bundles() {
            if bundle.len() > 1 {
                let edge = &split[bundle.ends[0].edge].0;
                return ConsistentAreaResult::DuplicateRings(edge.coordinate(0));
            }
        }
    }

    ConsistentAreaResult::Consistent
}

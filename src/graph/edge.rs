//! Labeled edges with intersection lists.

use super::label::Label;
use crate::noding::SegmentNode;
use crate::primitives::Point2;
use num_traits::Float;

/// A labeled coordinate chain in a geometry graph, together with the
/// intersection nodes discovered on it by self-noding.
#[derive(Debug, Clone)]
pub struct Edge<F> {
    pts: Vec<Point2<F>>,
    /// Topological label of the edge.
    pub label: Label,
    nodes: Vec<SegmentNode<F>>,
}

impl<F: Float> Edge<F> {
    /// Creates an edge over the given coordinates.
    pub fn new(pts: Vec<Point2<F>>, label: Label) -> Self {
        Edge {
            pts,
            label,
            nodes: Vec::new(),
        }
    }

    /// Returns the edge's coordinates.
    pub fn coordinates(&self) -> &[Point2<F>] {
        &self.pts
    }

    /// Returns coordinate `i`.
    pub fn coordinate(&self, i: usize) -> Point2<F> {
        self.pts[i]
    }

    /// Returns `true` if the edge forms a closed ring.
    pub fn is_closed(&self) -> bool {
        self.pts[0] == self.pts[self.pts.len() - 1]
    }

    /// Records an intersection node on this edge.
    pub fn add_intersection(&mut self, node: SegmentNode<F>) {
        self.nodes.push(node);
    }

    /// Returns the intersection nodes sorted along the edge, positional
    /// duplicates collapsed.
    pub fn intersections(&self) -> Vec<SegmentNode<F>> {
        let mut mirror = crate::noding::SegmentString::new(self.pts.clone(), 0);
        for n in &self.nodes {
            mirror.add_intersection(n.point, n.segment_index, n.fraction);
        }
        mirror.nodes()
    }

    /// Returns `true` if any intersection node lies at the given point.
    pub fn is_intersection(&self, pt: Point2<F>) -> bool {
        self.nodes.iter().any(|n| n.point == pt)
    }

    /// Splits the edge at its intersection nodes, each piece inheriting
    /// this edge's label.
    pub fn split_coordinates(&self) -> Vec<Vec<Point2<F>>> {
        let mut mirror = crate::noding::SegmentString::new(self.pts.clone(), 0);
        for n in &self.nodes {
            mirror.add_intersection(n.point, n.segment_index, n.fraction);
        }
        mirror.noded_coordinates()
    }
}

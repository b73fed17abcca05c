//! Triangulation vertices.

use crate::primitives::Point2;
use num_traits::Float;

/// A triangulation site: a coordinate plus constraint metadata.
///
/// Vertices on a constraint segment are flagged rather than subclassed;
/// when an insertion snaps onto an existing vertex the two are merged and
/// the constraint flag survives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<F> {
    /// The vertex coordinate.
    pub point: Point2<F>,
    /// True when the vertex lies on a constraint segment.
    pub on_constraint: bool,
}

impl<F: Float> Vertex<F> {
    /// Creates a free (unconstrained) vertex.
    pub fn new(point: Point2<F>) -> Self {
        Vertex {
            point,
            on_constraint: false,
        }
    }

    /// Creates a vertex lying on a constraint.
    pub fn on_constraint(point: Point2<F>) -> Self {
        Vertex {
            point,
            on_constraint: true,
        }
    }

    /// Merges another vertex that snapped onto this one.
    pub fn merge(&mut self, other: &Vertex<F>) {
        self.on_constraint = self.on_constraint || other.on_constraint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_constraint_flag() {
        let mut v: Vertex<f64> = Vertex::new(Point2::new(1.0, 2.0));
        assert!(!v.on_constraint);
        v.merge(&Vertex::on_constraint(Point2::new(1.0, 2.0)));
        assert!(v.on_constraint);
        v.merge(&Vertex::new(Point2::new(1.0, 2.0)));
        assert!(v.on_constraint);
    }
}

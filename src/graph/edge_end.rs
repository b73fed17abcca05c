//! Edge-ends, stars, and bundles.
//!
//! An edge-end is the stub of an edge incident on a node, characterized by
//! its outgoing direction. A node's star holds its edge-ends sorted
//! counter-clockwise by angle; coincident directions group into bundles
//! whose labels combine by location precedence. The consistency of area
//! labels around a star is the core test of the consistent-area stage of
//! validity checking.

use super::label::{Label, Position};
use crate::algorithm::{orientation_index, Orientation};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// The stub of an edge incident on a node.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEnd<F> {
    /// The node coordinate the edge-end sits on.
    pub origin: Point2<F>,
    /// The next coordinate along the edge, defining the outgoing
    /// direction.
    pub directed: Point2<F>,
    /// Label of the edge as seen travelling out of the node.
    pub label: Label,
    /// Index of the owning split edge.
    pub edge: usize,
}

impl<F: Float> EdgeEnd<F> {
    /// Orders edge-ends counter-clockwise by outgoing direction.
    ///
    /// The comparison is quadrant-first, falling back to the robust
    /// orientation test within a quadrant, so nearly parallel edge-ends
    /// sort consistently.
    pub fn compare_direction(&self, other: &Self) -> Ordering {
        let d0 = self.directed - self.origin;
        let d1 = other.directed - other.origin;
        if d0.x == d1.x && d0.y == d1.y {
            return Ordering::Equal;
        }
        match d0.quadrant().cmp(&d1.quadrant()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match orientation_index(other.origin, other.directed, self.directed) {
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Clockwise => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        }
    }
}

/// The counter-clockwise ordered star of edge-ends around one node.
#[derive(Debug, Clone, Default)]
pub struct EdgeEndStar<F> {
    ends: Vec<EdgeEnd<F>>,
}

impl<F: Float> EdgeEndStar<F> {
    /// Creates an empty star.
    pub fn new() -> Self {
        EdgeEndStar { ends: Vec::new() }
    }

    /// Inserts an edge-end, keeping the star sorted by direction.
    pub fn insert(&mut self, end: EdgeEnd<F>) {
        let pos = self
            .ends
            .partition_point(|e| e.compare_direction(&end) == Ordering::Less);
        self.ends.insert(pos, end);
    }

    /// Returns the edge-ends in counter-clockwise order.
    pub fn ends(&self) -> &[EdgeEnd<F>] {
        &self.ends
    }

    /// Returns the number of edge-ends.
    pub fn degree(&self) -> usize {
        self.ends.len()
    }

    /// Groups consecutive edge-ends with identical direction into
    /// bundles, merging their labels by location precedence.
    pub fn bundles(&self) -> Vec<EdgeEndBundle<F>> {
        let mut bundles: Vec<EdgeEndBundle<F>> = Vec::new();
        for end in &self.ends {
            let same_direction = bundles
                .last()
                .map_or(false, |b| b.ends[0].compare_direction(end) == Ordering::Equal);
            if same_direction {
                let bundle = bundles.last_mut().unwrap();
                bundle.label.merge(&end.label);
                bundle.ends.push(*end);
            } else {
                bundles.push(EdgeEndBundle {
                    label: end.label,
                    ends: vec![*end],
                });
            }
        }
        bundles
    }

    /// Checks that the area labels around this star are consistent for
    /// the given geometry.
    ///
    /// Walking the star counter-clockwise crosses from the right side of
    /// each edge to the left side of the next; the locations on the two
    /// sides of every such crossing must agree. A mismatch means the
    /// edges incident on this node do not bound a coherent area.
    pub fn is_area_labels_consistent(&self, geom_index: usize) -> bool {
        let bundles = self.bundles();
        let area_bundles: Vec<&EdgeEndBundle<F>> = bundles
            .iter()
            .filter(|b| b.label.is_area(geom_index))
            .collect();
        if area_bundles.len() < 2 {
            return true;
        }

        let start = match area_bundles.last().unwrap().label.get(geom_index, Position::Left) {
            Some(loc) => loc,
            None => return true,
        };
        let mut current = start;
        for bundle in &area_bundles {
            let left = bundle.label.get(geom_index, Position::Left);
            let right = bundle.label.get(geom_index, Position::Right);
            let (left, right) = match (left, right) {
                (Some(l), Some(r)) => (l, r),
                _ => return true,
            };
            if right != current {
                return false;
            }
            current = left;
        }
        true
    }
}

/// A group of edge-ends sharing one direction out of a node.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle<F> {
    /// The combined label of the bundled edge-ends.
    pub label: Label,
    /// The member edge-ends.
    pub ends: Vec<EdgeEnd<F>>,
}

impl<F: Float> EdgeEndBundle<F> {
    /// Returns how many edge-ends are stacked in this bundle.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Returns `true` if the bundle has no members.
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Contributes this bundle's on-locations to an intersection matrix
    /// as a curve intersection.
    pub fn update_intersection_matrix(&self, im: &mut super::matrix::IntersectionMatrix) {
        im.set_at_least_if_valid(
            self.label.get(0, Position::On),
            self.label.get(1, Position::On),
            super::matrix::Dimension::Curve,
        );
    }
}

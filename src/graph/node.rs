//! Graph nodes and the coordinate-keyed node map.

use super::edge_end::{EdgeEnd, EdgeEndStar};
use super::label::{Label, Location, Position};
use super::matrix::{Dimension, IntersectionMatrix};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A unique coordinate shared by the edges incident on it, holding their
/// radially ordered star of edge-ends.
#[derive(Debug, Clone)]
pub struct Node<F> {
    /// The node coordinate.
    pub coordinate: Point2<F>,
    /// The edge-ends incident on this node, sorted counter-clockwise.
    pub star: EdgeEndStar<F>,
    /// The node's own label (its on-locations per geometry).
    pub label: Label,
}

impl<F: Float> Node<F> {
    /// Creates an isolated node.
    pub fn new(coordinate: Point2<F>) -> Self {
        Node {
            coordinate,
            star: EdgeEndStar::new(),
            label: Label::new(),
        }
    }

    /// Merges an on-location for a geometry into the node's label.
    pub fn set_label_on(&mut self, geom_index: usize, loc: Location) {
        match self.label.get(geom_index, Position::On) {
            None => self.label.set(geom_index, Position::On, loc),
            Some(existing) => self.label.set(
                geom_index,
                Position::On,
                super::label::merge_locations(existing, loc),
            ),
        }
    }

    /// Contributes this node to an intersection matrix as a point
    /// intersection, if it is labeled for both geometries.
    pub fn update_intersection_matrix(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(
            self.label.get(0, Position::On),
            self.label.get(1, Position::On),
            Dimension::Point,
        );
    }

    /// Contributes the edge-end bundles incident on this node to an
    /// intersection matrix.
    pub fn update_intersection_matrix_from_edges(&self, im: &mut IntersectionMatrix) {
        for bundle in self.star.bundles() {
            bundle.update_intersection_matrix(im);
        }
    }
}

/// Total-ordering key for coordinates.
///
/// Coordinates with NaN ordinates sort as equal to everything, so callers
/// must reject non-finite input first; the validity pipeline does so in
/// its opening stage.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CoordKey<F>(F, F);

impl<F: Float> Eq for CoordKey<F> {}

impl<F: Float> PartialOrd for CoordKey<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for CoordKey<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.1.partial_cmp(&other.1).unwrap_or(Ordering::Equal))
    }
}

/// The nodes of a graph, keyed and iterated by coordinate order.
#[derive(Debug, Clone, Default)]
pub struct NodeMap<F: Float> {
    map: BTreeMap<CoordKey<F>, Node<F>>,
}

impl<F: Float> NodeMap<F> {
    /// Creates an empty map.
    pub fn new() -> Self {
        NodeMap {
            map: BTreeMap::new(),
        }
    }

    /// Returns the node at a coordinate, creating it if absent.
    pub fn add_node(&mut self, coordinate: Point2<F>) -> &mut Node<F> {
        self.map
            .entry(CoordKey(coordinate.x, coordinate.y))
            .or_insert_with(|| Node::new(coordinate))
    }

    /// Inserts an edge-end into the star of the node at its origin.
    pub fn add_edge_end(&mut self, end: EdgeEnd<F>) {
        self.add_node(end.origin).star.insert(end);
    }

    /// Returns the node at a coordinate, if present.
    pub fn find(&self, coordinate: Point2<F>) -> Option<&Node<F>> {
        self.map.get(&CoordKey(coordinate.x, coordinate.y))
    }

    /// Iterates the nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<F>> {
        self.map.values()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

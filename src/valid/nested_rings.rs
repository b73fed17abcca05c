//! Detection of rings nested inside other rings.

use super::find_point_not_node;
use crate::bounds::Aabb2;
use crate::geometry::{remove_repeated, LinearRing};
use crate::graph::{GeometryGraph, Location};
use crate::index::Quadtree;
use crate::primitives::Point2;
use num_traits::Float;

/// Tests that no ring in a set is nested inside another ring of the set.
///
/// Used for a polygon's holes, which must be interior-disjoint: any hole
/// vertex that is not a shared node and lies strictly inside another hole
/// proves improper nesting. A quadtree over ring envelopes prunes the
/// candidate pairs.
pub struct NestedRingTester<'a, F: Float> {
    graph: &'a GeometryGraph<F>,
    rings: Vec<&'a LinearRing<F>>,
    nested_point: Option<Point2<F>>,
}

impl<'a, F: Float> NestedRingTester<'a, F> {
    /// Creates a tester over rings of the given graph.
    pub fn new(graph: &'a GeometryGraph<F>) -> Self {
        NestedRingTester {
            graph,
            rings: Vec::new(),
            nested_point: None,
        }
    }

    /// Adds a ring to the set under test.
    pub fn add(&mut self, ring: &'a LinearRing<F>) {
        self.rings.push(ring);
    }

    /// Returns the offending point when nesting was detected.
    pub fn nested_point(&self) -> Option<Point2<F>> {
        self.nested_point
    }

    /// Returns `true` if no ring is nested inside another.
    pub fn is_non_nested(&mut self) -> bool {
        let envs: Vec<Option<Aabb2<F>>> = self
            .rings
            .iter()
            .map(|r| Aabb2::from_points(r.coords.iter().copied()))
            .collect();
        let overall = match envs.iter().flatten().copied().reduce(Aabb2::union) {
            Some(e) => e,
            None => return true,
        };

        let mut index: Quadtree<F, usize> = Quadtree::new(overall);
        for (i, env) in envs.iter().enumerate() {
            if let Some(e) = env {
                index.insert(*e, i);
            }
        }

        for (i, inner) in self.rings.iter().enumerate() {
            let env = match envs[i] {
                Some(e) => e,
                None => continue,
            };
            for &j in index.query(&env) {
                if i == j {
                    continue;
                }
                let search = self.rings[j];
                // A hole whose every vertex is a node of the other ring is
                // two coincident rings, reported by the duplicate-rings
                // stage instead.
                let inner_pt = match find_point_not_node(&inner.coords, search, self.graph) {
                    Some(pt) => pt,
                    None => continue,
                };
                let search_pts = remove_repeated(&search.coords);
                if crate::algorithm::locate_point_in_ring(inner_pt, &search_pts)
                    == Location::Interior
                {
                    self.nested_point = Some(inner_pt);
                    return false;
                }
            }
        }
        true
    }
}

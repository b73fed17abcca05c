//! Query-only R-tree bulk-loaded with the Sort-Tile-Recursive algorithm.
//!
//! The STR packed R-tree maximizes node fill: items are sorted by envelope
//! center x, partitioned into vertical slices, each slice sorted by center
//! y and chunked into capacity-sized runs, and the process repeats level
//! by level until a single root remains. Overlap between nodes is far
//! lower than in an incrementally built R-tree, and tree height is
//! O(log n).
//!
//! The price is immutability: once the tree has been built (explicitly or
//! by the first query) no further items may be inserted. Inserting after
//! the build is a programming error and panics. Items may still be
//! removed after the build.
//!
//! # Example
//!
//! ```
//! use robustum::{Aabb2, Point2};
//! use robustum::index::StrTree;
//!
//! let mut tree: StrTree<f64, usize> = StrTree::new();
//! tree.insert(Aabb2::from_corners(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)), 0);
//! tree.insert(Aabb2::from_corners(Point2::new(5.0, 5.0), Point2::new(6.0, 6.0)), 1);
//!
//! let query = Aabb2::from_corners(Point2::new(0.5, 0.5), Point2::new(2.0, 2.0));
//! let hits = tree.query(&query);
//! assert_eq!(hits, vec![&0]);
//! ```

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

const DEFAULT_NODE_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy)]
enum ChildRef {
    Item(usize),
    Node(usize),
}

#[derive(Debug, Clone)]
struct TreeNode<F> {
    bounds: Aabb2<F>,
    children: Vec<ChildRef>,
}

#[derive(Debug, Clone)]
struct ItemSlot<F, T> {
    bounds: Aabb2<F>,
    item: T,
    removed: bool,
}

/// A bulk-loaded spatial index over items keyed by bounding box.
#[derive(Debug, Clone)]
pub struct StrTree<F, T> {
    node_capacity: usize,
    items: Vec<ItemSlot<F, T>>,
    nodes: Vec<TreeNode<F>>,
    root: Option<usize>,
    built: bool,
}

impl<F: Float, T> Default for StrTree<F, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, T> StrTree<F, T> {
    /// Creates a tree with the default node capacity of 10.
    pub fn new() -> Self {
        Self::with_node_capacity(DEFAULT_NODE_CAPACITY)
    }

    /// Creates a tree with the given maximum number of children per node.
    ///
    /// # Panics
    ///
    /// Panics if `node_capacity < 4`; smaller capacities degrade the
    /// packing below usefulness.
    pub fn with_node_capacity(node_capacity: usize) -> Self {
        assert!(node_capacity >= 4, "node capacity must be at least 4");
        StrTree {
            node_capacity,
            items: Vec::new(),
            nodes: Vec::new(),
            root: None,
            built: false,
        }
    }

    /// Returns the number of items in the tree, removed items excluded.
    pub fn len(&self) -> usize {
        self.items.iter().filter(|s| !s.removed).count()
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an item with the given bounds.
    ///
    /// # Panics
    ///
    /// Panics if the tree has already been built (by [`StrTree::build`] or
    /// a query): the packed structure cannot accept new items.
    pub fn insert(&mut self, bounds: Aabb2<F>, item: T) {
        assert!(
            !self.built,
            "cannot insert into an StrTree after it has been built"
        );
        self.items.push(ItemSlot {
            bounds,
            item,
            removed: false,
        });
    }

    /// Builds the packed tree. Called implicitly by the first query;
    /// calling it again is a no-op.
    pub fn build(&mut self) {
        if self.built {
            return;
        }
        self.built = true;
        if self.items.is_empty() {
            return;
        }

        let mut level: Vec<ChildRef> = (0..self.items.len()).map(ChildRef::Item).collect();
        loop {
            let parents = self.build_level(level);
            if parents.len() == 1 {
                if let ChildRef::Node(id) = parents[0] {
                    self.root = Some(id);
                }
                return;
            }
            level = parents;
        }
    }

    /// Groups one level of children into capacity-sized parent nodes using
    /// the STR tiling: sort by center x, slice vertically, sort each slice
    /// by center y, chunk into runs.
    fn build_level(&mut self, mut children: Vec<ChildRef>) -> Vec<ChildRef> {
        let cap = self.node_capacity;
        let min_leaf_count = (children.len() + cap - 1) / cap;
        let slice_count = ((min_leaf_count as f64).sqrt().ceil() as usize).max(1);
        let slice_capacity = (children.len() + slice_count - 1) / slice_count;

        children.sort_by(|a, b| self.cmp_center(a, b, true));

        let mut parents = Vec::new();
        for slice in children.chunks_mut(slice_capacity.max(1)) {
            slice.sort_by(|a, b| self.cmp_center(a, b, false));
            for run in slice.chunks(cap) {
                let bounds = run
                    .iter()
                    .map(|c| self.child_bounds(c))
                    .reduce(Aabb2::union)
                    .unwrap();
                let id = self.nodes.len();
                self.nodes.push(TreeNode {
                    bounds,
                    children: run.to_vec(),
                });
                parents.push(ChildRef::Node(id));
            }
        }
        parents
    }

    fn child_bounds(&self, child: &ChildRef) -> Aabb2<F> {
        match *child {
            ChildRef::Item(i) => self.items[i].bounds,
            ChildRef::Node(n) => self.nodes[n].bounds,
        }
    }

    fn cmp_center(&self, a: &ChildRef, b: &ChildRef, by_x: bool) -> Ordering {
        let ca: Point2<F> = self.child_bounds(a).center();
        let cb = self.child_bounds(b).center();
        let (va, vb) = if by_x { (ca.x, cb.x) } else { (ca.y, cb.y) };
        va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
    }

    /// Returns references to all items whose bounds intersect the search
    /// bounds. Builds the tree if it has not been built yet.
    pub fn query(&mut self, bounds: &Aabb2<F>) -> Vec<&T> {
        self.build();
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.collect(root, bounds, &mut out);
        }
        out
    }

    fn collect<'a>(&'a self, node: usize, bounds: &Aabb2<F>, out: &mut Vec<&'a T>) {
        if !self.nodes[node].bounds.intersects(*bounds) {
            return;
        }
        for child in &self.nodes[node].children {
            match *child {
                ChildRef::Item(i) => {
                    let slot = &self.items[i];
                    if !slot.removed && slot.bounds.intersects(*bounds) {
                        out.push(&slot.item);
                    }
                }
                ChildRef::Node(n) => self.collect(n, bounds, out),
            }
        }
    }

    /// Streams every item whose bounds intersect the search bounds into
    /// the visitor. Builds the tree if it has not been built yet.
    pub fn query_visit<V: FnMut(&T)>(&mut self, bounds: &Aabb2<F>, mut visitor: V) {
        self.build();
        if let Some(root) = self.root {
            self.visit(root, bounds, &mut visitor);
        }
    }

    fn visit<V: FnMut(&T)>(&self, node: usize, bounds: &Aabb2<F>, visitor: &mut V) {
        if !self.nodes[node].bounds.intersects(*bounds) {
            return;
        }
        for child in &self.nodes[node].children {
            match *child {
                ChildRef::Item(i) => {
                    let slot = &self.items[i];
                    if !slot.removed && slot.bounds.intersects(*bounds) {
                        visitor(&slot.item);
                    }
                }
                ChildRef::Node(n) => self.visit(n, bounds, visitor),
            }
        }
    }
}

impl<F: Float, T: PartialEq> StrTree<F, T> {
    /// Removes a single item matching both the stored bounds' intersection
    /// test and item equality. Returns `true` if an item was found.
    ///
    /// The packed structure is untouched; the item's slot is tombstoned
    /// and skipped by subsequent queries.
    pub fn remove(&mut self, bounds: &Aabb2<F>, item: &T) -> bool {
        self.build();
        for slot in self.items.iter_mut() {
            if !slot.removed && slot.bounds.intersects(*bounds) && slot.item == *item {
                slot.removed = true;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(x1: f64, y1: f64, x2: f64, y2: f64) -> Aabb2<f64> {
        Aabb2::from_corners(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Deterministic xorshift for randomized tests.
    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn test_empty_query() {
        let mut tree: StrTree<f64, usize> = StrTree::new();
        assert!(tree.query(&env(0.0, 0.0, 1.0, 1.0)).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_single_item() {
        let mut tree: StrTree<f64, &str> = StrTree::new();
        tree.insert(env(0.0, 0.0, 1.0, 1.0), "a");
        assert_eq!(tree.query(&env(0.5, 0.5, 2.0, 2.0)), vec![&"a"]);
        assert!(tree.query(&env(5.0, 5.0, 6.0, 6.0)).is_empty());
    }

    #[test]
    fn test_touching_envelope_is_a_hit() {
        let mut tree: StrTree<f64, usize> = StrTree::new();
        tree.insert(env(0.0, 0.0, 1.0, 1.0), 7);
        assert_eq!(tree.query(&env(1.0, 1.0, 2.0, 2.0)), vec![&7]);
    }

    #[test]
    #[should_panic(expected = "after it has been built")]
    fn test_insert_after_build_panics() {
        let mut tree: StrTree<f64, usize> = StrTree::new();
        tree.insert(env(0.0, 0.0, 1.0, 1.0), 0);
        tree.query(&env(0.0, 0.0, 1.0, 1.0));
        tree.insert(env(2.0, 2.0, 3.0, 3.0), 1);
    }

    #[test]
    #[should_panic(expected = "at least 4")]
    fn test_capacity_below_minimum_panics() {
        let _tree: StrTree<f64, usize> = StrTree::with_node_capacity(3);
    }

    #[test]
    fn test_randomized_queries_match_brute_force() {
        let mut rng = Rng(0x5eed);
        let mut tree: StrTree<f64, usize> = StrTree::new();
        let mut boxes = Vec::new();
        for i in 0..500 {
            let x = rng.next_f64() * 100.0;
            let y = rng.next_f64() * 100.0;
            let w = rng.next_f64() * 5.0;
            let h = rng.next_f64() * 5.0;
            let e = env(x, y, x + w, y + h);
            boxes.push(e);
            tree.insert(e, i);
        }

        for _ in 0..50 {
            let x = rng.next_f64() * 100.0;
            let y = rng.next_f64() * 100.0;
            let q = env(x, y, x + rng.next_f64() * 20.0, y + rng.next_f64() * 20.0);

            let mut hits: Vec<usize> = tree.query(&q).into_iter().copied().collect();
            hits.sort_unstable();
            let mut expected: Vec<usize> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.intersects(q))
                .map(|(i, _)| i)
                .collect();
            expected.sort_unstable();
            assert_eq!(hits, expected);
        }
    }

    #[test]
    fn test_small_capacity_deep_tree() {
        let mut tree: StrTree<f64, usize> = StrTree::with_node_capacity(4);
        for i in 0..200 {
            let x = (i % 20) as f64;
            let y = (i / 20) as f64;
            tree.insert(env(x, y, x + 0.5, y + 0.5), i);
        }
        let hits = tree.query(&env(0.0, 0.0, 19.5, 9.5));
        assert_eq!(hits.len(), 200);
    }

    #[test]
    fn test_query_visit_streams_all_hits() {
        let mut tree: StrTree<f64, usize> = StrTree::new();
        for i in 0..20 {
            let x = i as f64;
            tree.insert(env(x, 0.0, x + 0.5, 0.5), i);
        }
        let mut seen = Vec::new();
        tree.query_visit(&env(0.0, 0.0, 9.0, 1.0), |v| seen.push(*v));
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove() {
        let mut tree: StrTree<f64, usize> = StrTree::new();
        tree.insert(env(0.0, 0.0, 1.0, 1.0), 1);
        tree.insert(env(0.0, 0.0, 1.0, 1.0), 2);
        assert!(tree.remove(&env(0.0, 0.0, 1.0, 1.0), &1));
        assert!(!tree.remove(&env(0.0, 0.0, 1.0, 1.0), &1));
        let hits = tree.query(&env(0.0, 0.0, 1.0, 1.0));
        assert_eq!(hits, vec![&2]);
        assert_eq!(tree.len(), 1);
    }
}

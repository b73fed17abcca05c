//! Dynamic quadtree over envelopes.
//!
//! Unlike the packed [`StrTree`](super::StrTree), the quadtree accepts
//! interleaved inserts and queries. Each item is stored at the smallest
//! quad that fully contains its envelope, so large items sit high in the
//! tree and small items sink toward the leaves. Query cost degrades
//! gracefully rather than failing when the distribution is skewed.

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone)]
struct QuadNode<F> {
    bounds: Aabb2<F>,
    items: Vec<usize>,
    children: [Option<usize>; 4],
    depth: usize,
}

/// A point-region quadtree storing items keyed by bounding box.
#[derive(Debug, Clone)]
pub struct Quadtree<F, T> {
    nodes: Vec<QuadNode<F>>,
    items: Vec<(Aabb2<F>, T)>,
}

impl<F: Float, T> Quadtree<F, T> {
    /// Creates a quadtree covering the given overall bounds.
    ///
    /// Items whose envelope pokes outside the overall bounds are kept at
    /// the root, so nothing is ever lost; only query pruning suffers.
    pub fn new(bounds: Aabb2<F>) -> Self {
        Quadtree {
            nodes: vec![QuadNode {
                bounds,
                items: Vec::new(),
                children: [None; 4],
                depth: 0,
            }],
            items: Vec::new(),
        }
    }

    /// Returns the number of items in the tree.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts an item with the given bounds.
    pub fn insert(&mut self, bounds: Aabb2<F>, item: T) {
        let id = self.items.len();
        self.items.push((bounds, item));
        let mut node = 0usize;
        loop {
            if self.nodes[node].depth >= MAX_DEPTH {
                break;
            }
            match self.child_containing(node, &bounds) {
                Some(quadrant) => {
                    node = self.ensure_child(node, quadrant);
                }
                None => break,
            }
        }
        self.nodes[node].items.push(id);
    }

    /// Returns the quadrant of `node` that fully contains `bounds`, if
    /// any.
    fn child_containing(&self, node: usize, bounds: &Aabb2<F>) -> Option<usize> {
        let nb = self.nodes[node].bounds;
        let c = nb.center();
        for quadrant in 0..4 {
            if Self::quadrant_bounds(nb, c, quadrant).contains(*bounds) {
                return Some(quadrant);
            }
        }
        None
    }

    fn quadrant_bounds(nb: Aabb2<F>, c: Point2<F>, quadrant: usize) -> Aabb2<F> {
        match quadrant {
            0 => Aabb2::new(c, nb.max),
            1 => Aabb2::from_corners(Point2::new(nb.min.x, c.y), Point2::new(c.x, nb.max.y)),
            2 => Aabb2::new(nb.min, c),
            _ => Aabb2::from_corners(Point2::new(c.x, nb.min.y), Point2::new(nb.max.x, c.y)),
        }
    }

    fn ensure_child(&mut self, node: usize, quadrant: usize) -> usize {
        if let Some(child) = self.nodes[node].children[quadrant] {
            return child;
        }
        let nb = self.nodes[node].bounds;
        let depth = self.nodes[node].depth;
        let child = self.nodes.len();
        self.nodes.push(QuadNode {
            bounds: Self::quadrant_bounds(nb, nb.center(), quadrant),
            items: Vec::new(),
            children: [None; 4],
            depth: depth + 1,
        });
        self.nodes[node].children[quadrant] = Some(child);
        child
    }

    /// Returns references to all items whose bounds intersect the search
    /// bounds.
    pub fn query(&self, bounds: &Aabb2<F>) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect(0, bounds, &mut out);
        out
    }

    fn collect<'a>(&'a self, node: usize, bounds: &Aabb2<F>, out: &mut Vec<&'a T>) {
        let n = &self.nodes[node];
        // The root also holds items outside its nominal bounds, so only
        // child nodes are pruned by their envelope.
        if node != 0 && !n.bounds.intersects(*bounds) {
            return;
        }
        for &id in &n.items {
            let (b, ref item) = self.items[id];
            if b.intersects(*bounds) {
                out.push(item);
            }
        }
        for child in n.children.iter().flatten() {
            self.collect(*child, bounds, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(x1: f64, y1: f64, x2: f64, y2: f64) -> Aabb2<f64> {
        Aabb2::from_corners(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn test_insert_and_query() {
        let mut qt: Quadtree<f64, usize> = Quadtree::new(env(0.0, 0.0, 100.0, 100.0));
        qt.insert(env(1.0, 1.0, 2.0, 2.0), 0);
        qt.insert(env(60.0, 60.0, 61.0, 61.0), 1);
        qt.insert(env(40.0, 40.0, 60.0, 60.0), 2);

        let hits = qt.query(&env(0.0, 0.0, 10.0, 10.0));
        assert_eq!(hits, vec![&0]);

        let mut hits: Vec<usize> = qt
            .query(&env(50.0, 50.0, 70.0, 70.0))
            .into_iter()
            .copied()
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    fn test_item_spanning_center_stays_at_root() {
        let mut qt: Quadtree<f64, &str> = Quadtree::new(env(0.0, 0.0, 100.0, 100.0));
        qt.insert(env(49.0, 49.0, 51.0, 51.0), "center");
        assert_eq!(qt.query(&env(50.5, 50.5, 52.0, 52.0)), vec![&"center"]);
    }

    #[test]
    fn test_item_outside_overall_bounds() {
        let mut qt: Quadtree<f64, &str> = Quadtree::new(env(0.0, 0.0, 10.0, 10.0));
        qt.insert(env(20.0, 20.0, 21.0, 21.0), "outside");
        assert_eq!(qt.query(&env(19.0, 19.0, 22.0, 22.0)), vec![&"outside"]);
        assert!(qt.query(&env(0.0, 0.0, 5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_interleaved_insert_query() {
        let mut qt: Quadtree<f64, usize> = Quadtree::new(env(0.0, 0.0, 64.0, 64.0));
        for i in 0..32 {
            let x = (i * 2) as f64;
            qt.insert(env(x, x, x + 1.0, x + 1.0), i);
            let hits = qt.query(&env(0.0, 0.0, 64.0, 64.0));
            assert_eq!(hits.len(), i + 1);
        }
    }
}

//! Dynamic kd-tree with tolerance-based snap-merging.
//!
//! Built for triangulation site management: inserting a point that lies
//! within `tolerance` of an existing node merges into that node instead of
//! creating a near-duplicate site. The tree alternates x and y splits by
//! depth and supports envelope range queries, which is how the constraint
//! enforcement loop finds candidate encroaching sites.

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

#[derive(Debug, Clone)]
struct KdNode<F, D> {
    point: Point2<F>,
    data: D,
    left: Option<usize>,
    right: Option<usize>,
    /// Number of inserts that snapped to this node (1 for the original).
    count: usize,
}

/// A 2-d tree of points carrying per-node data.
#[derive(Debug, Clone)]
pub struct KdTree<F, D> {
    nodes: Vec<KdNode<F, D>>,
    root: Option<usize>,
    tolerance: F,
}

impl<F: Float, D> KdTree<F, D> {
    /// Creates a tree with the given snap tolerance.
    ///
    /// A tolerance of zero still merges exactly coincident points.
    pub fn new(tolerance: F) -> Self {
        KdTree {
            nodes: Vec::new(),
            root: None,
            tolerance,
        }
    }

    /// Returns the number of distinct nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the point stored at a node.
    pub fn point(&self, node: usize) -> Point2<F> {
        self.nodes[node].point
    }

    /// Returns the data stored at a node.
    pub fn data(&self, node: usize) -> &D {
        &self.nodes[node].data
    }

    /// Returns how many inserts landed on this node.
    pub fn count(&self, node: usize) -> usize {
        self.nodes[node].count
    }

    /// Inserts a point, snap-merging into an existing node when one lies
    /// within the tolerance.
    ///
    /// Returns the node id and whether the insert was merged into an
    /// existing node (`true`) rather than creating a new one. On a merge
    /// the supplied `data` is dropped and the node keeps its original
    /// data.
    pub fn insert(&mut self, point: Point2<F>, data: D) -> (usize, bool) {
        if let Some(best) = self.best_match(point) {
            self.nodes[best].count += 1;
            return (best, true);
        }

        let id = self.nodes.len();
        self.nodes.push(KdNode {
            point,
            data,
            left: None,
            right: None,
            count: 1,
        });

        match self.root {
            None => self.root = Some(id),
            Some(root) => {
                let mut node = root;
                let mut depth = 0usize;
                loop {
                    let split_on_x = depth % 2 == 0;
                    let go_left = if split_on_x {
                        point.x < self.nodes[node].point.x
                    } else {
                        point.y < self.nodes[node].point.y
                    };
                    let next = if go_left {
                        self.nodes[node].left
                    } else {
                        self.nodes[node].right
                    };
                    match next {
                        Some(n) => node = n,
                        None => {
                            if go_left {
                                self.nodes[node].left = Some(id);
                            } else {
                                self.nodes[node].right = Some(id);
                            }
                            break;
                        }
                    }
                    depth += 1;
                }
            }
        }
        (id, false)
    }

    /// Finds the closest existing node within the snap tolerance, if any.
    fn best_match(&self, point: Point2<F>) -> Option<usize> {
        let env = Aabb2::from_point(point).expand_by(self.tolerance);
        let mut best: Option<(usize, F)> = None;
        for id in self.query(&env) {
            let d = self.nodes[id].point.distance(point);
            if d <= self.tolerance {
                match best {
                    Some((_, bd)) if bd <= d => {}
                    _ => best = Some((id, d)),
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Returns the ids of all nodes whose point lies inside the search
    /// bounds.
    pub fn query(&self, bounds: &Aabb2<F>) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.collect(root, 0, bounds, &mut out);
        }
        out
    }

    fn collect(&self, node: usize, depth: usize, bounds: &Aabb2<F>, out: &mut Vec<usize>) {
        let n = &self.nodes[node];
        if bounds.contains_point(n.point) {
            out.push(node);
        }
        let split_on_x = depth % 2 == 0;
        let (min_side, max_side) = if split_on_x {
            (bounds.min.x, bounds.max.x)
        } else {
            (bounds.min.y, bounds.max.y)
        };
        let split = if split_on_x { n.point.x } else { n.point.y };
        if let Some(left) = n.left {
            if min_side < split {
                self.collect(left, depth + 1, bounds, out);
            }
        }
        if let Some(right) = n.right {
            if max_side >= split {
                self.collect(right, depth + 1, bounds, out);
            }
        }
    }
}

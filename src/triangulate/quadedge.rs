//! Quad-edge planar subdivision backed by an index arena.
//!
//! Each undirected edge is a quad of four directed edges: the edge, its
//! reverse, and the two dual (rotated) edges. Directed edges are plain
//! integer ids into the arena; quad `q` owns ids `4q..4q+3`, and the
//! algebra (`rot`, `sym`, `onext`, ...) is index arithmetic plus one
//! `next` lookup per step. This keeps O(1) topological navigation while
//! avoiding any cyclic ownership between edge records.
//!
//! The subdivision is seeded with a large frame triangle enclosing the
//! working envelope, and maintains the invariant that after every site
//! insertion it is a triangulation of all sites inserted so far.

use super::vertex::Vertex;
use crate::algorithm::{orientation_index, Orientation};
use crate::bounds::Aabb2;
use crate::error::TopologyError;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A directed edge id in the subdivision arena.
pub type EdgeId = usize;

/// Divisor applied to the snap tolerance to decide when a point lies on
/// an existing edge.
const EDGE_COINCIDENCE_TOL_FACTOR: f64 = 1000.0;

/// A planar subdivision of quad-edges, always a triangulation between
/// insertions.
#[derive(Debug, Clone)]
pub struct QuadEdgeSubdivision<F> {
    /// `onext` per directed edge id.
    next: Vec<EdgeId>,
    /// Origin vertex per directed edge id; dual edges carry `None`.
    org: Vec<Option<usize>>,
    /// Liveness per quad.
    quad_alive: Vec<bool>,
    vertices: Vec<Vertex<F>>,
    starting_edge: EdgeId,
    last_located: EdgeId,
    tolerance: F,
    edge_coincidence_tolerance: F,
}

impl<F: Float> QuadEdgeSubdivision<F> {
    /// Creates a subdivision whose frame triangle encloses `env` with a
    /// wide margin.
    pub fn new(env: Aabb2<F>, tolerance: F) -> Self {
        let mut offset = env.width().max(env.height()) * F::from(10.0).unwrap();
        if offset <= F::zero() {
            // A degenerate envelope still needs a real frame.
            offset = F::from(10.0).unwrap();
        }
        let mid_x = (env.min.x + env.max.x) * F::from(0.5).unwrap();
        let f0 = Point2::new(mid_x, env.max.y + offset);
        let f1 = Point2::new(env.min.x - offset, env.min.y - offset);
        let f2 = Point2::new(env.max.x + offset, env.min.y - offset);

        let mut subdiv = QuadEdgeSubdivision {
            next: Vec::new(),
            org: Vec::new(),
            quad_alive: Vec::new(),
            vertices: vec![Vertex::new(f0), Vertex::new(f1), Vertex::new(f2)],
            starting_edge: 0,
            last_located: 0,
            tolerance,
            edge_coincidence_tolerance: tolerance
                / F::from(EDGE_COINCIDENCE_TOL_FACTOR).unwrap(),
        };

        let ea = subdiv.make_edge(0, 1);
        let eb = subdiv.make_edge(1, 2);
        subdiv.splice(Self::sym(ea), eb);
        let ec = subdiv.make_edge(2, 0);
        subdiv.splice(Self::sym(eb), ec);
        subdiv.splice(Self::sym(ec), ea);
        subdiv.starting_edge = ea;
        subdiv.last_located = ea;
        subdiv
    }

    /// Returns the snap tolerance the subdivision was built with.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// Adds a vertex record, returning its id.
    pub fn add_vertex(&mut self, vertex: Vertex<F>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Returns the number of vertex records, frame included.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex record for an id.
    pub fn vertex(&self, id: usize) -> &Vertex<F> {
        &self.vertices[id]
    }

    /// Returns a mutable vertex record.
    pub fn vertex_mut(&mut self, id: usize) -> &mut Vertex<F> {
        &mut self.vertices[id]
    }

    /// Returns `true` for the three frame vertices.
    pub fn is_frame_vertex(&self, id: usize) -> bool {
        id < 3
    }

    /// The non-frame vertices, as `(id, vertex)` pairs.
    pub fn sites(&self) -> impl Iterator<Item = (usize, &Vertex<F>)> {
        self.vertices.iter().enumerate().skip(3)
    }

    // -- quad-edge algebra ------------------------------------------------

    /// The dual edge, rotated a quarter turn counter-clockwise.
    #[inline]
    pub fn rot(e: EdgeId) -> EdgeId {
        (e & !3) | ((e + 1) & 3)
    }

    /// The reversed edge.
    #[inline]
    pub fn sym(e: EdgeId) -> EdgeId {
        (e & !3) | ((e + 2) & 3)
    }

    /// The dual edge, rotated a quarter turn clockwise.
    #[inline]
    pub fn inv_rot(e: EdgeId) -> EdgeId {
        (e & !3) | ((e + 3) & 3)
    }

    /// The next edge counter-clockwise around the origin.
    #[inline]
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.next[e]
    }

    /// The next edge clockwise around the origin.
    #[inline]
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        Self::rot(self.next[Self::rot(e)])
    }

    /// The next edge counter-clockwise around the left face.
    #[inline]
    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        Self::rot(self.next[Self::inv_rot(e)])
    }

    /// The previous edge around the left face.
    #[inline]
    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        Self::sym(self.next[e])
    }

    /// The previous edge counter-clockwise around the destination.
    #[inline]
    pub fn dprev(&self, e: EdgeId) -> EdgeId {
        Self::inv_rot(self.next[Self::inv_rot(e)])
    }

    /// Origin vertex id of a primal edge.
    #[inline]
    pub fn org(&self, e: EdgeId) -> usize {
        self.org[e].expect("org of a dual edge")
    }

    /// Destination vertex id of a primal edge.
    #[inline]
    pub fn dest(&self, e: EdgeId) -> usize {
        self.org(Self::sym(e))
    }

    /// Origin coordinate of a primal edge.
    #[inline]
    pub fn org_point(&self, e: EdgeId) -> Point2<F> {
        self.vertices[self.org(e)].point
    }

    /// Destination coordinate of a primal edge.
    #[inline]
    pub fn dest_point(&self, e: EdgeId) -> Point2<F> {
        self.vertices[self.dest(e)].point
    }

    /// Creates an isolated edge from vertex `o` to vertex `d`.
    pub fn make_edge(&mut self, o: usize, d: usize) -> EdgeId {
        let base = self.next.len();
        // A fresh edge is its own origin ring; its duals point at each
        // other.
        self.next.extend_from_slice(&[base, base + 3, base + 2, base + 1]);
        self.org.extend_from_slice(&[Some(o), None, Some(d), None]);
        self.quad_alive.push(true);
        base
    }

    /// Splices the origin rings of `a` and `b` (and, dually, their left
    /// face rings): disconnected rings merge, a shared ring splits.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
        let alpha = Self::rot(self.next[a]);
        let beta = Self::rot(self.next[b]);
        self.next.swap(a, b);
        self.next.swap(alpha, beta);
    }

    /// Connects the destination of `a` to the origin of `b`, so that the
    /// new edge shares a left face with both.
    pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> EdgeId {
        let e = self.make_edge(self.dest(a), self.org(b));
        let lnext_a = self.lnext(a);
        self.splice(e, lnext_a);
        self.splice(Self::sym(e), b);
        e
    }

    /// Removes an edge from the subdivision.
    pub fn delete_edge(&mut self, e: EdgeId) {
        let oprev_e = self.oprev(e);
        self.splice(e, oprev_e);
        let sym_e = Self::sym(e);
        let oprev_sym = self.oprev(sym_e);
        self.splice(sym_e, oprev_sym);
        self.quad_alive[e / 4] = false;
        if !self.quad_alive[self.last_located / 4] {
            self.last_located = self.starting_edge;
        }
    }

    /// Rotates an edge within its enclosing quadrilateral (the Delaunay
    /// flip).
    pub fn swap(&mut self, e: EdgeId) {
        let a = self.oprev(e);
        let b = self.oprev(Self::sym(e));
        self.splice(e, a);
        self.splice(Self::sym(e), b);
        let lnext_a = self.lnext(a);
        self.splice(e, lnext_a);
        let lnext_b = self.lnext(b);
        self.splice(Self::sym(e), lnext_b);
        self.org[e] = Some(self.dest(a));
        self.org[Self::sym(e)] = Some(self.dest(b));
    }

    // -- predicates -------------------------------------------------------

    /// Tests whether `p` is strictly right of the directed edge.
    pub fn right_of(&self, p: Point2<F>, e: EdgeId) -> bool {
        orientation_index(p, self.dest_point(e), self.org_point(e))
            == Orientation::CounterClockwise
    }

    /// Tests whether `p` coincides with an endpoint of `e` within the
    /// snap tolerance.
    pub fn is_vertex_of_edge(&self, e: EdgeId, p: Point2<F>) -> bool {
        p.approx_eq(self.org_point(e), self.tolerance)
            || p.approx_eq(self.dest_point(e), self.tolerance)
    }

    /// Tests whether `p` lies on the open edge, within the edge
    /// coincidence tolerance.
    pub fn is_on_edge(&self, e: EdgeId, p: Point2<F>) -> bool {
        let seg = Segment2::new(self.org_point(e), self.dest_point(e));
        seg.distance_to_point(p) < self.edge_coincidence_tolerance
    }

    // -- location ---------------------------------------------------------

    /// Locates an edge of the triangle containing `p`, or an edge `p`
    /// lies on, walking from the last located edge.
    ///
    /// The walk is bounded; exceeding the bound reports a
    /// [`TopologyError::LocateFailed`] rather than hanging on a corrupt
    /// subdivision.
    pub fn locate(&mut self, p: Point2<F>) -> Result<EdgeId, TopologyError> {
        let mut e = self.last_located;
        if !self.quad_alive[e / 4] {
            e = self.starting_edge;
        }
        let max_iter = 10 + self.quad_alive.len() * 4;
        let mut iter = 0;
        loop {
            iter += 1;
            if iter > max_iter {
                return Err(TopologyError::LocateFailed { iterations: iter });
            }
            if p == self.org_point(e) || p == self.dest_point(e) {
                break;
            }
            if self.right_of(p, e) {
                e = Self::sym(e);
            } else if !self.right_of(p, self.onext(e)) {
                e = self.onext(e);
            } else if !self.right_of(p, self.dprev(e)) {
                e = self.dprev(e);
            } else {
                break;
            }
        }
        self.last_located = e;
        Ok(e)
    }

    // -- enumeration ------------------------------------------------------

    /// Returns the triangles of the subdivision as vertex id triples,
    /// excluding faces that touch the frame.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut out = Vec::new();
        let mut visited = vec![false; self.next.len()];
        for quad in 0..self.quad_alive.len() {
            if !self.quad_alive[quad] {
                continue;
            }
            for &start in &[4 * quad, 4 * quad + 2] {
                if visited[start] {
                    continue;
                }
                // Walk the left face orbit.
                let mut face = Vec::new();
                let mut e = start;
                loop {
                    visited[e] = true;
                    face.push(self.org(e));
                    e = self.lnext(e);
                    if e == start {
                        break;
                    }
                    if face.len() > self.next.len() {
                        break;
                    }
                }
                if face.len() == 3 && face.iter().all(|&v| !self.is_frame_vertex(v)) {
                    out.push([face[0], face[1], face[2]]);
                }
            }
        }
        out
    }

    /// Returns the undirected edges between non-frame vertices, as vertex
    /// id pairs.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for quad in 0..self.quad_alive.len() {
            if !self.quad_alive[quad] {
                continue;
            }
            let o = self.org(4 * quad);
            let d = self.dest(4 * quad);
            if !self.is_frame_vertex(o) && !self.is_frame_vertex(d) {
                out.push((o, d));
            }
        }
        out
    }

    /// Returns `true` if an undirected edge joins the two vertex
    /// coordinates, within the snap tolerance.
    pub fn has_edge(&self, a: Point2<F>, b: Point2<F>) -> bool {
        for quad in 0..self.quad_alive.len() {
            if !self.quad_alive[quad] {
                continue;
            }
            let o = self.org_point(4 * quad);
            let d = self.dest_point(4 * quad);
            if (o.approx_eq(a, self.tolerance) && d.approx_eq(b, self.tolerance))
                || (o.approx_eq(b, self.tolerance) && d.approx_eq(a, self.tolerance))
            {
                return true;
            }
        }
        false
    }
}

//! Building a topology graph from a geometry.

use super::edge::Edge;
use super::edge_end::EdgeEnd;
use super::label::{Label, Location};
use super::node::NodeMap;
use crate::algorithm::is_ccw;
use crate::geometry::{remove_repeated, Geometry, LinearRing};
use crate::noding::{IndexNoder, IntersectionAdder, SegmentString};
use crate::primitives::Point2;
use num_traits::Float;

/// Result of self-noding a geometry graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfIntersectionInfo<F> {
    /// True if any non-trivial intersection between the graph's own edges
    /// was found.
    pub has_intersection: bool,
    /// True if a proper (non-endpoint) self-intersection was found.
    pub has_proper: bool,
    /// The first proper self-intersection point.
    pub proper_point: Option<Point2<F>>,
}

/// The planar topology graph of one input geometry.
///
/// Construction extracts labeled edges from the geometry. The graph then
/// moves through strictly ordered stages: [`compute_self_nodes`] discovers
/// every intersection among the graph's own edges, after which the noded
/// structure ([`split_edges`], [`node_graph`]) becomes available. Calling
/// a later-stage operation first is a programming error and panics.
///
/// [`compute_self_nodes`]: GeometryGraph::compute_self_nodes
/// [`split_edges`]: GeometryGraph::split_edges
/// [`node_graph`]: GeometryGraph::node_graph
#[derive(Debug, Clone)]
pub struct GeometryGraph<F> {
    arg_index: usize,
    edges: Vec<Edge<F>>,
    /// Original (pre-dedup) ring coordinates per edge, for lookup.
    edge_sources: Vec<Vec<Point2<F>>>,
    too_few_points: Option<Point2<F>>,
    self_noded: Option<SelfIntersectionInfo<F>>,
}

impl<F: Float> GeometryGraph<F> {
    /// Builds the graph of `geometry`, labeling edges as geometry
    /// `arg_index` (0 or 1).
    pub fn new(arg_index: usize, geometry: &Geometry<F>) -> Self {
        let mut graph = GeometryGraph {
            arg_index,
            edges: Vec::new(),
            edge_sources: Vec::new(),
            too_few_points: None,
            self_noded: None,
        };
        graph.add_geometry(geometry);
        graph
    }

    fn add_geometry(&mut self, geometry: &Geometry<F>) {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
            Geometry::LineString(line) => self.add_line(&line.coords),
            Geometry::LinearRing(ring) => self.add_line(&ring.coords),
            Geometry::Polygon(poly) => self.add_polygon(poly),
            Geometry::MultiPolygon(polys) => {
                for p in polys {
                    self.add_polygon(p);
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    self.add_geometry(g);
                }
            }
        }
    }

    fn add_line(&mut self, coords: &[Point2<F>]) {
        let pts = remove_repeated(coords);
        if pts.len() < 2 {
            self.note_too_few(coords);
            return;
        }
        let label = Label::new_line(self.arg_index, Location::Interior);
        self.push_edge(coords, pts, label);
    }

    fn add_polygon(&mut self, poly: &crate::geometry::Polygon<F>) {
        self.add_polygon_ring(&poly.shell, Location::Exterior, Location::Interior);
        for hole in &poly.holes {
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior);
        }
    }

    /// Adds a ring edge labeled by winding: `cw_left`/`cw_right` give the
    /// side locations for a clockwise ring, and a counter-clockwise ring
    /// swaps them.
    fn add_polygon_ring(&mut self, ring: &LinearRing<F>, cw_left: Location, cw_right: Location) {
        if ring.is_empty() {
            return;
        }
        let pts = remove_repeated(&ring.coords);
        if pts.len() < 4 {
            self.note_too_few(&ring.coords);
            return;
        }
        let (left, right) = if is_ccw(&pts) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let label = Label::new_area(self.arg_index, Location::Boundary, left, right);
        self.push_edge(&ring.coords, pts, label);
    }

    fn push_edge(&mut self, source: &[Point2<F>], pts: Vec<Point2<F>>, label: Label) {
        self.edge_sources.push(source.to_vec());
        self.edges.push(Edge::new(pts, label));
    }

    fn note_too_few(&mut self, coords: &[Point2<F>]) {
        if self.too_few_points.is_none() {
            self.too_few_points = coords.first().copied();
        }
    }

    /// Returns the coordinate of the first coordinate sequence with too
    /// few points, if any ring had fewer than four distinct positions or
    /// any line fewer than two.
    pub fn too_few_points(&self) -> Option<Point2<F>> {
        self.too_few_points
    }

    /// Returns the geometry index this graph labels its edges with.
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    /// Returns the graph's edges.
    pub fn edges(&self) -> &[Edge<F>] {
        &self.edges
    }

    /// Finds the index of the edge built from the given ring coordinates.
    pub fn find_edge_index(&self, ring: &[Point2<F>]) -> Option<usize> {
        self.edge_sources.iter().position(|src| src == ring)
    }

    /// Finds the edge built from the given ring coordinates.
    pub fn find_edge(&self, ring: &[Point2<F>]) -> Option<&Edge<F>> {
        self.find_edge_index(ring).map(|i| &self.edges[i])
    }

    /// Computes all intersections among the graph's own edges and records
    /// them on the edges.
    ///
    /// Idempotent: the computation runs once and its result is cached. A
    /// proper intersection here is a point where two edges cross in their
    /// interiors, which for a polygon is already conclusive evidence of
    /// invalidity.
    pub fn compute_self_nodes(&mut self) -> SelfIntersectionInfo<F> {
        if let Some(info) = self.self_noded {
            return info;
        }
        let mut strings: Vec<SegmentString<F>> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| SegmentString::new(e.coordinates().to_vec(), i))
            .collect();
        let mut adder = IntersectionAdder::new();
        IndexNoder::new().compute_nodes(&mut strings, &mut adder);

        for (edge, string) in self.edges.iter_mut().zip(&strings) {
            for node in string.nodes() {
                edge.add_intersection(node);
            }
        }

        let info = SelfIntersectionInfo {
            has_intersection: adder.has_intersection,
            has_proper: adder.has_proper,
            proper_point: adder.proper_point,
        };
        self.self_noded = Some(info);
        info
    }

    fn require_self_noded(&self) {
        assert!(
            self.self_noded.is_some(),
            "compute_self_nodes must be called before using the noded graph"
        );
    }

    /// Returns the fully noded edge set: every edge split at its
    /// intersection nodes, pieces inheriting the parent's label, paired
    /// with the parent edge index.
    ///
    /// # Panics
    ///
    /// Panics if [`compute_self_nodes`](GeometryGraph::compute_self_nodes)
    /// has not run.
    pub fn split_edges(&self) -> Vec<(Edge<F>, usize)> {
        self.require_self_noded();
        let mut out = Vec::new();
        for (parent, edge) in self.edges.iter().enumerate() {
            for pts in edge.split_coordinates() {
                out.push((Edge::new(pts, edge.label), parent));
            }
        }
        out
    }

    /// Builds the node graph of the noded edge set: a node for every
    /// split-edge endpoint, each holding the sorted star of incident
    /// edge-ends.
    ///
    /// # Panics
    ///
    /// Panics if [`compute_self_nodes`](GeometryGraph::compute_self_nodes)
    /// has not run.
    pub fn node_graph(&self) -> (NodeMap<F>, Vec<(Edge<F>, usize)>) {
        let split = self.split_edges();
        let mut nodes: NodeMap<F> = NodeMap::new();
        for (i, (edge, _)) in split.iter().enumerate() {
            let pts = edge.coordinates();
            let first = pts[0];
            let last = pts[pts.len() - 1];
            nodes.add_edge_end(EdgeEnd {
                origin: first,
                directed: pts[1],
                label: edge.label,
                edge: i,
            });
            nodes.add_edge_end(EdgeEnd {
                origin: last,
                directed: pts[pts.len() - 2],
                label: edge.label.flipped(),
                edge: i,
            });
            let on = edge
                .label
                .get(self.arg_index, super::label::Position::On)
                .unwrap_or(Location::Interior);
            nodes.add_node(first).set_label_on(self.arg_index, on);
            nodes.add_node(last).set_label_on(self.arg_index, on);
        }
        (nodes, split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};
    use crate::graph::Position;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn square_polygon() -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LinearRing::new(pts(&[
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ])),
            vec![],
        ))
    }

    #[test]
    fn test_ccw_shell_labels() {
        let graph = GeometryGraph::new(0, &square_polygon());
        assert_eq!(graph.edges().len(), 1);
        let label = graph.edges()[0].label;
        // Counter-clockwise shell: interior on the left.
        assert_eq!(label.get(0, Position::Left), Some(Location::Interior));
        assert_eq!(label.get(0, Position::Right), Some(Location::Exterior));
        assert_eq!(label.get(0, Position::On), Some(Location::Boundary));
    }

    #[test]
    fn test_cw_shell_labels_swap() {
        let ring: Vec<Point2<f64>> = pts(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ]);
        let g = Geometry::Polygon(Polygon::new(LinearRing::new(ring), vec![]));
        let graph = GeometryGraph::new(0, &g);
        let label = graph.edges()[0].label;
        assert_eq!(label.get(0, Position::Left), Some(Location::Exterior));
        assert_eq!(label.get(0, Position::Right), Some(Location::Interior));
    }

    #[test]
    fn test_too_few_points() {
        let g = Geometry::LineString(LineString::new(pts(&[(1.0, 1.0), (1.0, 1.0)])));
        let graph = GeometryGraph::new(0, &g);
        assert_eq!(graph.too_few_points(), Some(Point2::new(1.0, 1.0)));

        let degenerate_ring = Geometry::Polygon(Polygon::new(
            LinearRing::new(pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])),
            vec![],
        ));
        let graph = GeometryGraph::new(0, &degenerate_ring);
        assert!(graph.too_few_points().is_some());
    }

    #[test]
    fn test_simple_polygon_has_no_self_intersections() {
        let mut graph = GeometryGraph::new(0, &square_polygon());
        let info = graph.compute_self_nodes();
        assert!(!info.has_intersection);
        assert!(!info.has_proper);
    }

    #[test]
    fn test_figure_eight_has_proper_self_intersection() {
        let g = Geometry::Polygon(Polygon::new(
            LinearRing::new(pts(&[
                (0.0, 0.0),
                (2.0, 2.0),
                (2.0, 0.0),
                (0.0, 2.0),
                (0.0, 0.0),
            ])),
            vec![],
        ));
        let mut graph = GeometryGraph::new(0, &g);
        let info = graph.compute_self_nodes();
        assert!(info.has_proper);
        assert_eq!(info.proper_point, Some(Point2::new(1.0, 1.0)));
    }

    #[test]
    fn test_split_edges_of_crossing_ring() {
        let g = Geometry::Polygon(Polygon::new(
            LinearRing::new(pts(&[
                (0.0, 0.0),
                (2.0, 2.0),
                (2.0, 0.0),
                (0.0, 2.0),
                (0.0, 0.0),
            ])),
            vec![],
        ));
        let mut graph = GeometryGraph::new(0, &g);
        graph.compute_self_nodes();
        let split = graph.split_edges();
        // The ring splits at the two positions of the crossing point: the
        // run into (1,1), the loop back to it, and the run home.
        assert_eq!(split.len(), 3);
        assert!(split.iter().all(|(_, parent)| *parent == 0));
    }

    #[test]
    #[should_panic(expected = "compute_self_nodes")]
    fn test_split_before_noding_panics() {
        let graph = GeometryGraph::new(0, &square_polygon());
        let _ = graph.split_edges();
    }

    #[test]
    fn test_find_edge() {
        let shell = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let graph = GeometryGraph::new(0, &square_polygon());
        assert!(graph.find_edge(&shell).is_some());
        assert!(graph.find_edge(&shell[..3]).is_none());
    }

    #[test]
    fn test_node_graph_star_degrees() {
        let mut graph = GeometryGraph::new(0, &square_polygon());
        graph.compute_self_nodes();
        let (nodes, split) = graph.node_graph();
        // Unsplit ring: one edge, both ends at the ring start.
        assert_eq!(split.len(), 1);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.iter().next().unwrap().star.degree(), 2);
    }
}

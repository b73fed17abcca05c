//! Conforming Delaunay triangulation with constraint enforcement.

use super::incremental::insert_site;
use super::quadedge::QuadEdgeSubdivision;
use super::segment::ConstraintSegment;
use super::split::{NonEncroachingSplitPointFinder, SplitPointFinder};
use super::vertex::Vertex;
use crate::algorithm::convex_hull;
use crate::bounds::Aabb2;
use crate::error::TopologyError;
use crate::index::KdTree;
use crate::primitives::Point2;
use num_traits::Float;

/// Default cap on full constraint-enforcement passes.
const DEFAULT_MAX_SPLIT_ITERATIONS: usize = 99;

/// Computes a conforming Delaunay triangulation over a set of sites and a
/// set of linear constraints.
///
/// The result is a true Delaunay triangulation over all sites (initial,
/// constraint, and inserted Steiner points) in which every constraint
/// segment is realized as a union of triangulation edges. Steiner points
/// are inserted by repeatedly splitting constraint segments that violate
/// the Gabriel condition until none remain.
///
/// The stages are ordered: construction, [`set_constraints`],
/// [`form_initial_delaunay`], [`enforce_constraints`]; the subdivision
/// and hull are valid afterwards. Each pass of the enforcement loop
/// rescans every constraint, because a split can re-encroach a segment an
/// earlier pass left alone. Termination of this process is a heuristic
/// expectation rather than a theorem, so the loop carries a pass cap, and
/// hitting the cap is a fatal error naming the last split point.
///
/// [`set_constraints`]: ConformingDelaunayTriangulator::set_constraints
/// [`form_initial_delaunay`]: ConformingDelaunayTriangulator::form_initial_delaunay
/// [`enforce_constraints`]: ConformingDelaunayTriangulator::enforce_constraints
///
/// # Example
///
/// ```
/// use robustum::Point2;
/// use robustum::triangulate::{ConformingDelaunayTriangulator, ConstraintSegment};
///
/// let sites = vec![Point2::new(50.0, 1.0)];
/// let mut cdt = ConformingDelaunayTriangulator::new(sites, 0.01);
/// cdt.set_constraints(
///     vec![ConstraintSegment::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0))],
///     vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
/// );
/// cdt.form_initial_delaunay().unwrap();
/// cdt.enforce_constraints().unwrap();
///
/// // The encroached constraint was split at least once.
/// assert!(cdt.segments().len() >= 2);
/// ```
pub struct ConformingDelaunayTriangulator<F: Float> {
    initial_sites: Vec<Point2<F>>,
    seg_vertices: Vec<Point2<F>>,
    segments: Vec<ConstraintSegment<F>>,
    subdiv: Option<QuadEdgeSubdivision<F>>,
    kdt: KdTree<F, usize>,
    split_finder: Box<dyn SplitPointFinder<F>>,
    tolerance: F,
    max_split_iterations: usize,
    convex_hull: Vec<Point2<F>>,
    last_split_point: Option<Point2<F>>,
}

impl<F: Float> ConformingDelaunayTriangulator<F> {
    /// Creates a triangulator over the given unconstrained initial sites.
    ///
    /// `tolerance` is the distance below which two sites are considered
    /// the same vertex. The initial site set should not repeat vertices
    /// of the constraint set; coincident ones are merged on insertion.
    pub fn new(initial_sites: Vec<Point2<F>>, tolerance: F) -> Self {
        ConformingDelaunayTriangulator {
            initial_sites,
            seg_vertices: Vec::new(),
            segments: Vec::new(),
            subdiv: None,
            kdt: KdTree::new(tolerance),
            split_finder: Box::new(NonEncroachingSplitPointFinder),
            tolerance,
            max_split_iterations: DEFAULT_MAX_SPLIT_ITERATIONS,
            convex_hull: Vec::new(),
            last_split_point: None,
        }
    }

    /// Sets the constraint segments and their unique vertex set.
    ///
    /// The vertices are supplied separately so callers that already have
    /// the deduplicated set avoid recomputing it.
    pub fn set_constraints(
        &mut self,
        segments: Vec<ConstraintSegment<F>>,
        seg_vertices: Vec<Point2<F>>,
    ) {
        self.segments = segments;
        self.seg_vertices = seg_vertices;
    }

    /// Replaces the split-point strategy used during enforcement.
    pub fn set_split_point_finder(&mut self, finder: Box<dyn SplitPointFinder<F>>) {
        self.split_finder = finder;
    }

    /// Adjusts the cap on constraint-enforcement passes.
    pub fn set_max_split_iterations(&mut self, max: usize) {
        self.max_split_iterations = max;
    }

    /// Returns the snap tolerance.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// Returns the current constraint segments (sub-segments after
    /// enforcement).
    pub fn segments(&self) -> &[ConstraintSegment<F>] {
        &self.segments
    }

    /// Returns the triangulation.
    ///
    /// # Panics
    ///
    /// Panics before
    /// [`form_initial_delaunay`](ConformingDelaunayTriangulator::form_initial_delaunay)
    /// has run.
    pub fn subdivision(&self) -> &QuadEdgeSubdivision<F> {
        self.subdiv
            .as_ref()
            .expect("form_initial_delaunay must be called before using the subdivision")
    }

    /// Returns the convex hull of all sites, as a counter-clockwise ring
    /// of coordinates. Valid after
    /// [`enforce_constraints`](ConformingDelaunayTriangulator::enforce_constraints).
    pub fn convex_hull(&self) -> &[Point2<F>] {
        &self.convex_hull
    }

    /// Computes the Delaunay triangulation of the initial sites.
    pub fn form_initial_delaunay(&mut self) -> Result<(), TopologyError> {
        let env = self.compute_bounding_box();
        self.subdiv = Some(QuadEdgeSubdivision::new(env, self.tolerance));
        let sites = std::mem::take(&mut self.initial_sites);
        for p in &sites {
            self.insert_site_vertex(Vertex::new(*p))?;
        }
        self.initial_sites = sites;
        Ok(())
    }

    /// Envelope of all sites, grown by a fifth of its larger dimension.
    fn compute_bounding_box(&self) -> Aabb2<F> {
        let all = self.initial_sites.iter().chain(self.seg_vertices.iter());
        let env = Aabb2::from_points(all.copied())
            .unwrap_or_else(|| Aabb2::from_point(Point2::origin()));
        let delta = env.width().max(env.height()) * F::from(0.2).unwrap();
        env.expand_by(delta)
    }

    /// Enforces the constraints into the triangulation.
    ///
    /// Scans all constraint segments, splitting each encroached one, and
    /// repeats until a scan makes no splits. Exceeding the pass cap is
    /// fatal: the triangulation would not honor its constraints, which
    /// must never be reported as success.
    pub fn enforce_constraints(&mut self) -> Result<(), TopologyError> {
        self.add_constraint_vertices()?;

        let mut count = 0;
        loop {
            let splits = self.enforce_gabriel()?;
            count += 1;
            if splits == 0 {
                return Ok(());
            }
            if count >= self.max_split_iterations {
                let pt = self.last_split_point.unwrap_or(Point2::origin());
                return Err(TopologyError::ConstraintEnforcement {
                    x: pt.x.to_f64().unwrap_or(f64::NAN),
                    y: pt.y.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
    }

    /// Computes the hull over all sites and inserts the constraint
    /// vertices as sites.
    fn add_constraint_vertices(&mut self) -> Result<(), TopologyError> {
        let mut all = self.initial_sites.clone();
        all.extend(self.seg_vertices.iter().copied());
        self.convex_hull = convex_hull(&all);

        let vertices = std::mem::take(&mut self.seg_vertices);
        for p in &vertices {
            self.insert_site_vertex(Vertex::on_constraint(*p))?;
        }
        self.seg_vertices = vertices;
        Ok(())
    }

    /// Inserts a site, snap-merging through the kd-tree. Returns the
    /// vertex id the site ended up as.
    fn insert_site_vertex(&mut self, vertex: Vertex<F>) -> Result<usize, TopologyError> {
        let subdiv = self
            .subdiv
            .as_mut()
            .expect("form_initial_delaunay must be called before inserting sites");
        let candidate_id = subdiv.vertex_count();
        let (node, repeated) = self.kdt.insert(vertex.point, candidate_id);
        if repeated {
            // Snapped onto an existing site: merge instead of creating a
            // near-duplicate vertex.
            let existing = *self.kdt.data(node);
            subdiv.vertex_mut(existing).merge(&vertex);
            return Ok(existing);
        }
        let id = subdiv.add_vertex(vertex);
        insert_site(subdiv, id)?;
        Ok(id)
    }

    /// Inserts an extra site into the triangulation, maintaining the
    /// conforming Delaunay property. Available once
    /// [`form_initial_delaunay`](ConformingDelaunayTriangulator::form_initial_delaunay)
    /// has run, for callers refining the triangulation further.
    pub fn insert_site(&mut self, p: Point2<F>) -> Result<(), TopologyError> {
        self.insert_site_vertex(Vertex::new(p))?;
        Ok(())
    }

    /// One enforcement pass: split every constraint segment that has a
    /// Gabriel-condition violation. Returns the number of splits made.
    fn enforce_gabriel(&mut self) -> Result<usize, TopologyError> {
        let mut splits = 0;
        let mut result: Vec<ConstraintSegment<F>> = Vec::with_capacity(self.segments.len());
        let current = std::mem::take(&mut self.segments);

        for seg in current {
            let encroach = match self.find_non_gabriel_point(&seg) {
                // No encroachment: the segment is already present in the
                // subdivision.
                None => {
                    result.push(seg);
                    continue;
                }
                Some(pt) => pt,
            };

            let split_pt = self.split_finder.find_split_point(&seg, encroach);
            self.last_split_point = Some(split_pt);
            let inserted = self.insert_site_vertex(Vertex::on_constraint(split_pt))?;

            // If the split point snapped onto an existing site, the new
            // vertex may not lie exactly where intended; the next pass
            // re-examines the halves either way.
            let actual = self.subdivision().vertex(inserted).point;
            let (s1, s2) = seg.split_at(actual);
            result.push(s1);
            result.push(s2);
            splits += 1;
        }

        self.segments = result;
        Ok(splits)
    }

    /// Finds a site strictly inside the diametral circle of the segment,
    /// excluding its endpoints: a Gabriel-condition violation. Among
    /// violators, the one closest to the segment midpoint is returned.
    fn find_non_gabriel_point(&self, seg: &ConstraintSegment<F>) -> Option<Point2<F>> {
        let mid = seg.midpoint();
        let radius = seg.start.distance(mid);
        let env = Aabb2::from_point(mid).expand_by(radius);

        let mut closest: Option<(Point2<F>, F)> = None;
        for node in self.kdt.query(&env) {
            let pt = self.kdt.point(node);
            if pt == seg.start || pt == seg.end {
                continue;
            }
            let dist = mid.distance(pt);
            if dist < radius {
                match closest {
                    Some((_, best)) if best <= dist => {}
                    _ => closest = Some((pt, dist)),
                }
            }
        }
        closest.map(|(pt, _)| pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::in_circle;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn assert_delaunay(subdiv: &QuadEdgeSubdivision<f64>) {
        for tri in subdiv.triangles() {
            let a = subdiv.vertex(tri[0]).point;
            let b = subdiv.vertex(tri[1]).point;
            let c = subdiv.vertex(tri[2]).point;
            for (v, site) in subdiv.sites() {
                if tri.contains(&v) {
                    continue;
                }
                assert!(
                    !in_circle(a, b, c, site.point),
                    "site {:?} inside circumcircle of {:?}",
                    site.point,
                    tri
                );
            }
        }
    }

    #[test]
    fn test_unconstrained_square_with_center() {
        let sites = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        let mut cdt = ConformingDelaunayTriangulator::new(sites, 1e-9);
        cdt.form_initial_delaunay().unwrap();
        cdt.enforce_constraints().unwrap();

        // A convex quad plus its center point triangulates into four
        // triangles, each satisfying the empty-circumcircle condition.
        let subdiv = cdt.subdivision();
        assert_eq!(subdiv.triangles().len(), 4);
        assert_delaunay(subdiv);
        assert_eq!(cdt.convex_hull().len(), 4);
    }

    #[test]
    fn test_encroached_constraint_is_split() {
        let mut cdt = ConformingDelaunayTriangulator::new(pts(&[(50.0, 1.0)]), 0.01);
        cdt.set_constraints(
            vec![ConstraintSegment::new(
                Point2::new(0.0, 0.0),
                Point2::new(100.0, 0.0),
            )],
            pts(&[(0.0, 0.0), (100.0, 0.0)]),
        );
        cdt.form_initial_delaunay().unwrap();
        cdt.enforce_constraints().unwrap();

        // The site at (50, 1) encroaches the segment's diametral circle,
        // forcing at least one split.
        assert!(cdt.segments().len() >= 2);

        // No remaining sub-segment has an encroaching site.
        for seg in cdt.segments() {
            assert!(
                cdt.find_non_gabriel_point(seg).is_none(),
                "segment {:?} still encroached",
                seg
            );
        }

        // Every sub-segment is realized as a triangulation edge, and the
        // chain covers the original constraint.
        let subdiv = cdt.subdivision();
        for seg in cdt.segments() {
            assert!(subdiv.has_edge(seg.start, seg.end), "missing {:?}", seg);
        }
        let total: f64 = cdt.segments().iter().map(|s| s.as_segment().length()).sum();
        assert!((total - 100.0).abs() < 1e-6);

        assert_delaunay(subdiv);
    }

    #[test]
    fn test_constraint_without_encroachment_unsplit() {
        let mut cdt = ConformingDelaunayTriangulator::new(pts(&[(50.0, 80.0)]), 1e-9);
        cdt.set_constraints(
            vec![ConstraintSegment::new(
                Point2::new(0.0, 0.0),
                Point2::new(100.0, 0.0),
            )],
            pts(&[(0.0, 0.0), (100.0, 0.0)]),
        );
        cdt.form_initial_delaunay().unwrap();
        cdt.enforce_constraints().unwrap();
        assert_eq!(cdt.segments().len(), 1);
        assert!(cdt.subdivision().has_edge(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)));
    }

    #[test]
    fn test_iteration_cap_reported() {
        let mut cdt = ConformingDelaunayTriangulator::new(pts(&[(50.0, 1.0)]), 0.01);
        cdt.set_constraints(
            vec![ConstraintSegment::new(
                Point2::new(0.0, 0.0),
                Point2::new(100.0, 0.0),
            )],
            pts(&[(0.0, 0.0), (100.0, 0.0)]),
        );
        cdt.set_max_split_iterations(1);
        cdt.form_initial_delaunay().unwrap();
        // One pass cannot both split and verify convergence.
        match cdt.enforce_constraints() {
            Err(TopologyError::ConstraintEnforcement { .. }) => {}
            other => panic!("expected ConstraintEnforcement, got {:?}", other),
        }
    }

    #[test]
    fn test_post_enforcement_refinement() {
        let sites = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let mut cdt = ConformingDelaunayTriangulator::new(sites, 1e-9);
        cdt.form_initial_delaunay().unwrap();
        cdt.enforce_constraints().unwrap();
        assert_eq!(cdt.subdivision().triangles().len(), 2);

        cdt.insert_site(Point2::new(5.0, 5.0)).unwrap();
        assert_eq!(cdt.subdivision().triangles().len(), 4);
        assert_delaunay(cdt.subdivision());
    }

    #[test]
    #[should_panic(expected = "form_initial_delaunay")]
    fn test_subdivision_before_forming_panics() {
        let cdt = ConformingDelaunayTriangulator::new(pts(&[(0.0, 0.0)]), 1e-9);
        let _ = cdt.subdivision();
    }
}

//! The simple-features validity predicate.
//!
//! [`IsValidOp`] runs, per geometry variant, an ordered pipeline of checks
//! that short-circuits on the first failure: coordinate validity, ring
//! closure, point counts, area-label consistency over the self-noded
//! topology graph, ring self-intersection, hole containment and nesting,
//! shell nesting, and interior connectedness. The first error found is
//! the one reported, as an error kind plus the offending coordinate.
//!
//! # Example
//!
//! ```
//! use robustum::Point2;
//! use robustum::geometry::{Geometry, LinearRing, Polygon};
//! use robustum::valid::{is_valid, validation_error, ValidationErrorKind};
//!
//! let square = Geometry::Polygon(Polygon::new(
//!     LinearRing::new(vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(10.0, 0.0),
//!         Point2::new(10.0, 10.0),
//!         Point2::new(0.0, 10.0),
//!         Point2::new(0.0, 0.0),
//!     ]),
//!     vec![],
//! ));
//! assert!(is_valid(&square));
//!
//! let open = Geometry::Polygon(Polygon::new(
//!     LinearRing::new(vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(10.0, 0.0),
//!         Point2::new(10.0, 10.0),
//!         Point2::new(0.0, 10.0),
//!     ]),
//!     vec![],
//! ));
//! let err = validation_error(&open).unwrap();
//! assert_eq!(err.kind, ValidationErrorKind::RingNotClosed);
//! ```

mod connected_interior;
mod consistent_area;
mod nested_rings;

pub use connected_interior::find_interior_disconnection;
pub use consistent_area::{check_consistent_area, ConsistentAreaResult};
pub use nested_rings::NestedRingTester;

use crate::algorithm::locate_point_in_ring;
use crate::error::TopologyError;
use crate::geometry::{remove_repeated, Geometry, LinearRing, Polygon};
use crate::graph::{GeometryGraph, Location};
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt;

/// The kinds of validity failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A coordinate has a NaN or infinite ordinate.
    InvalidCoordinate,
    /// A ring's first and last coordinates differ.
    RingNotClosed,
    /// A ring has fewer than four points or a line fewer than two.
    TooFewPoints,
    /// The geometry self-intersects.
    SelfIntersection,
    /// Two rings are topologically identical.
    DuplicateRings,
    /// A ring touches or crosses itself away from its endpoints.
    RingSelfIntersection,
    /// A hole lies partly or wholly outside its shell.
    HoleOutsideShell,
    /// A hole lies inside another hole.
    NestedHoles,
    /// A shell lies inside another polygon's area.
    NestedShells,
    /// The rings split the interior into disconnected pieces.
    DisconnectedInteriors,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationErrorKind::InvalidCoordinate => "invalid coordinate",
            ValidationErrorKind::RingNotClosed => "ring not closed",
            ValidationErrorKind::TooFewPoints => "too few points",
            ValidationErrorKind::SelfIntersection => "self-intersection",
            ValidationErrorKind::DuplicateRings => "duplicate rings",
            ValidationErrorKind::RingSelfIntersection => "ring self-intersection",
            ValidationErrorKind::HoleOutsideShell => "hole lies outside shell",
            ValidationErrorKind::NestedHoles => "holes are nested",
            ValidationErrorKind::NestedShells => "nested shells",
            ValidationErrorKind::DisconnectedInteriors => "interior is disconnected",
        };
        f.write_str(msg)
    }
}

/// A validity failure: the kind plus the offending coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyValidationError<F> {
    /// What failed.
    pub kind: ValidationErrorKind,
    /// Where it failed.
    pub coordinate: Point2<F>,
}

impl<F: Float> TopologyValidationError<F> {
    fn new(kind: ValidationErrorKind, coordinate: Point2<F>) -> Self {
        TopologyValidationError { kind, coordinate }
    }
}

/// Tests whether a geometry is valid under simple-features semantics.
pub fn is_valid<F: Float>(geometry: &Geometry<F>) -> bool {
    IsValidOp::new(geometry).is_valid()
}

/// Returns the first validity failure of a geometry, or `None` if it is
/// valid.
pub fn validation_error<F: Float>(geometry: &Geometry<F>) -> Option<TopologyValidationError<F>> {
    IsValidOp::new(geometry).validation_error()
}

/// The validity-checking operation, with its configuration.
pub struct IsValidOp<'a, F> {
    geometry: &'a Geometry<F>,
    self_touching_ring_forming_hole_valid: bool,
}

impl<'a, F: Float> IsValidOp<'a, F> {
    /// Creates a validity check for a geometry.
    pub fn new(geometry: &'a Geometry<F>) -> Self {
        IsValidOp {
            geometry,
            self_touching_ring_forming_hole_valid: false,
        }
    }

    /// Relaxes the ring self-intersection rule for rings that merely
    /// touch themselves, forming holes (the spatial-database convention:
    /// inverted shells and exverted holes).
    ///
    /// Self-touches that disconnect the interior, such as bow-tie shells,
    /// stay invalid under every convention: the connected-interior stage
    /// runs regardless of this setting.
    pub fn with_self_touching_ring_forming_hole_valid(mut self, valid: bool) -> Self {
        self.self_touching_ring_forming_hole_valid = valid;
        self
    }

    /// Returns `true` if the geometry is valid.
    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    /// Returns the first validity failure, or `None`.
    pub fn validation_error(&self) -> Option<TopologyValidationError<F>> {
        self.check(self.geometry)
    }

    /// Exception-style surface: returns `Err` describing the first
    /// validity failure.
    pub fn check_valid(&self) -> Result<(), TopologyError> {
        match self.validation_error() {
            None => Ok(()),
            Some(e) => Err(TopologyError::InvalidGeometry {
                message: e.kind.to_string(),
                x: e.coordinate.x.to_f64().unwrap_or(f64::NAN),
                y: e.coordinate.y.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }

    fn check(&self, geometry: &Geometry<F>) -> Option<TopologyValidationError<F>> {
        if geometry.is_empty() {
            return None;
        }
        match geometry {
            Geometry::Point(p) => self.check_coordinates(std::slice::from_ref(p)),
            Geometry::MultiPoint(pts) => self.check_coordinates(pts),
            Geometry::LineString(line) => self
                .check_coordinates(&line.coords)
                .or_else(|| self.check_too_few(&GeometryGraph::new(0, geometry))),
            Geometry::LinearRing(ring) => self.check_ring(ring, geometry),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => self.check_area(geometry),
            Geometry::GeometryCollection(geoms) => {
                geoms.iter().find_map(|g| self.check(g))
            }
        }
    }

    fn check_coordinates(&self, coords: &[Point2<F>]) -> Option<TopologyValidationError<F>> {
        coords.iter().find(|p| !p.is_finite()).map(|p| {
            TopologyValidationError::new(ValidationErrorKind::InvalidCoordinate, *p)
        })
    }

    fn check_closed(&self, ring: &LinearRing<F>) -> Option<TopologyValidationError<F>> {
        if ring.is_empty() || ring.is_closed() {
            None
        } else {
            Some(TopologyValidationError::new(
                ValidationErrorKind::RingNotClosed,
                ring.coords[0],
            ))
        }
    }

    fn check_too_few(&self, graph: &GeometryGraph<F>) -> Option<TopologyValidationError<F>> {
        graph
            .too_few_points()
            .map(|p| TopologyValidationError::new(ValidationErrorKind::TooFewPoints, p))
    }

    /// Validity of a standalone ring: a closed, non-self-intersecting
    /// line.
    fn check_ring(
        &self,
        ring: &LinearRing<F>,
        geometry: &Geometry<F>,
    ) -> Option<TopologyValidationError<F>> {
        self.check_coordinates(&ring.coords)
            .or_else(|| self.check_closed(ring))
            .or_else(|| {
                if remove_repeated(&ring.coords).len() < 4 {
                    return Some(TopologyValidationError::new(
                        ValidationErrorKind::TooFewPoints,
                        ring.coords[0],
                    ));
                }
                let mut graph = GeometryGraph::new(0, geometry);
                graph.compute_self_nodes();
                self.check_no_self_intersecting_rings(&graph)
            })
    }

    /// The full pipeline for polygons and multipolygons.
    fn check_area(&self, geometry: &Geometry<F>) -> Option<TopologyValidationError<F>> {
        let polygons: Vec<&Polygon<F>> = match geometry {
            Geometry::Polygon(p) => vec![p],
            Geometry::MultiPolygon(ps) => ps.iter().collect(),
            _ => unreachable!("check_area is only called on area geometries"),
        };

        for poly in &polygons {
            for ring in poly.rings() {
                if let Some(e) = self.check_coordinates(&ring.coords) {
                    return Some(e);
                }
            }
            for ring in poly.rings() {
                if let Some(e) = self.check_closed(ring) {
                    return Some(e);
                }
            }
        }

        let mut graph = GeometryGraph::new(0, geometry);
        if let Some(e) = self.check_too_few(&graph) {
            return Some(e);
        }

        match check_consistent_area(&mut graph) {
            ConsistentAreaResult::Consistent => {}
            ConsistentAreaResult::SelfIntersection(pt) => {
                return Some(TopologyValidationError::new(
                    ValidationErrorKind::SelfIntersection,
                    pt,
                ));
            }
            ConsistentAreaResult::DuplicateRings(pt) => {
                return Some(TopologyValidationError::new(
                    ValidationErrorKind::DuplicateRings,
                    pt,
                ));
            }
        }

        if !self.self_touching_ring_forming_hole_valid {
            if let Some(e) = self.check_no_self_intersecting_rings(&graph) {
                return Some(e);
            }
        }

        for &poly in &polygons {
            if let Some(e) = self.check_holes_in_shell(poly, &graph) {
                return Some(e);
            }
        }
        for &poly in &polygons {
            if let Some(e) = self.check_holes_not_nested(poly, &graph) {
                return Some(e);
            }
        }
        if polygons.len() > 1 {
            if let Some(e) = self.check_shells_not_nested(&polygons, &graph) {
                return Some(e);
            }
        }
        find_interior_disconnection(&mut graph, geometry).map(|pt| {
            TopologyValidationError::new(ValidationErrorKind::DisconnectedInteriors, pt)
        })
    }

    /// A ring may self-intersect only at its own endpoints.
    ///
    /// A coordinate appearing at two distinct positions along one edge's
    /// intersection list means the ring passes through that point twice: a
    /// self-touch or crossing. A coordinate appearing once is merely
    /// where a different ring touches this one, which is not this stage's
    /// concern.
    fn check_no_self_intersecting_rings(
        &self,
        graph: &GeometryGraph<F>,
    ) -> Option<TopologyValidationError<F>> {
        for edge in graph.edges() {
            let closed = edge.is_closed();
            let last_seg = edge.coordinates().len() - 2;
            let mut positions: Vec<(usize, F)> = Vec::new();
            let mut seen: Vec<Point2<F>> = Vec::new();
            for node in edge.intersections() {
                // An intersection at the closure of a ring is recorded at
                // both ends of the coordinate sequence; fold it onto the
                // start so one touch counts once.
                let (seg, frac) = if closed
                    && node.segment_index == last_seg
                    && node.fraction == F::one()
                {
                    (0, F::zero())
                } else {
                    (node.segment_index, node.fraction)
                };
                if positions.iter().any(|&(s, f)| s == seg && f == frac) {
                    continue;
                }
                positions.push((seg, frac));
                if seen.contains(&node.point) {
                    return Some(TopologyValidationError::new(
                        ValidationErrorKind::RingSelfIntersection,
                        node.point,
                    ));
                }
                seen.push(node.point);
            }
        }
        None
    }

    /// Each hole must lie inside the shell. A hole vertex that is not a
    /// shared node decides containment with one point-in-ring test.
    fn check_holes_in_shell(
        &self,
        poly: &Polygon<F>,
        graph: &GeometryGraph<F>,
    ) -> Option<TopologyValidationError<F>> {
        let shell_pts = remove_repeated(&poly.shell.coords);
        for hole in &poly.holes {
            // A hole with no vertex free of the shell must split the
            // interior; the connected-interior stage reports that case.
            let hole_pt = match find_point_not_node(&hole.coords, &poly.shell, graph) {
                Some(pt) => pt,
                None => continue,
            };
            if locate_point_in_ring(hole_pt, &shell_pts) == Location::Exterior {
                return Some(TopologyValidationError::new(
                    ValidationErrorKind::HoleOutsideShell,
                    hole_pt,
                ));
            }
        }
        None
    }

    fn check_holes_not_nested(
        &self,
        poly: &Polygon<F>,
        graph: &GeometryGraph<F>,
    ) -> Option<TopologyValidationError<F>> {
        if poly.holes.len() < 2 {
            return None;
        }
        let mut tester = NestedRingTester::new(graph);
        for hole in &poly.holes {
            tester.add(hole);
        }
        if tester.is_non_nested() {
            None
        } else {
            tester.nested_point().map(|pt| {
                TopologyValidationError::new(ValidationErrorKind::NestedHoles, pt)
            })
        }
    }

    /// No polygon's shell may sit inside another polygon of the same
    /// multipolygon, except inside one of its holes.
    fn check_shells_not_nested(
        &self,
        polygons: &[&Polygon<F>],
        graph: &GeometryGraph<F>,
    ) -> Option<TopologyValidationError<F>> {
        for (i, poly) in polygons.iter().enumerate() {
            for (j, other) in polygons.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(pt) = self.shell_nested_in(&poly.shell, *other, graph) {
                    return Some(TopologyValidationError::new(
                        ValidationErrorKind::NestedShells,
                        pt,
                    ));
                }
            }
        }
        None
    }

    /// Returns a witness point if `shell` is improperly nested in
    /// `other`: inside its shell but not inside any of its holes.
    fn shell_nested_in(
        &self,
        shell: &LinearRing<F>,
        other: &Polygon<F>,
        graph: &GeometryGraph<F>,
    ) -> Option<Point2<F>> {
        let shell_pt = find_point_not_node(&shell.coords, &other.shell, graph)?;
        let other_shell_pts = remove_repeated(&other.shell.coords);
        if locate_point_in_ring(shell_pt, &other_shell_pts) != Location::Interior {
            return None;
        }
        for hole in &other.holes {
            if self.shell_inside_hole(shell, hole, graph) {
                return None;
            }
        }
        Some(shell_pt)
    }

    /// Tests whether `shell` is properly contained in `hole`. The two
    /// rings may share nodes but not cross, so one free vertex on either
    /// ring settles it.
    fn shell_inside_hole(
        &self,
        shell: &LinearRing<F>,
        hole: &LinearRing<F>,
        graph: &GeometryGraph<F>,
    ) -> bool {
        if let Some(shell_pt) = find_point_not_node(&shell.coords, hole, graph) {
            let hole_pts = remove_repeated(&hole.coords);
            if locate_point_in_ring(shell_pt, &hole_pts) != Location::Interior {
                return false;
            }
        }
        if let Some(hole_pt) = find_point_not_node(&hole.coords, shell, graph) {
            let shell_pts = remove_repeated(&shell.coords);
            if locate_point_in_ring(hole_pt, &shell_pts) == Location::Interior {
                return false;
            }
        }
        true
    }
}

/// Finds a coordinate of `test_coords` that is not an intersection node
/// of the edge built from `search_ring`.
pub(crate) fn find_point_not_node<F: Float>(
    test_coords: &[Point2<F>],
    search_ring: &LinearRing<F>,
    graph: &GeometryGraph<F>,
) -> Option<Point2<F>> {
    let edge = graph.find_edge(&search_ring.coords)?;
    test_coords
        .iter()
        .copied()
        .find(|pt| !edge.is_intersection(*pt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineString;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn ring(coords: &[(f64, f64)]) -> LinearRing<f64> {
        LinearRing::new(pts(coords))
    }

    fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            ring(shell),
            holes.iter().map(|h| ring(h)).collect(),
        ))
    }

    fn square() -> Geometry<f64> {
        polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[],
        )
    }

    #[test]
    fn test_valid_simple_polygons() {
        assert!(is_valid(&square()));
        assert!(validation_error(&square()).is_none());

        let concave = polygon(
            &[
                (0.0, 0.0),
                (10.0, 0.0),
                (5.0, 4.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ],
            &[],
        );
        assert!(is_valid(&concave));

        let with_hole = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]],
        );
        assert!(is_valid(&with_hole));
    }

    #[test]
    fn test_invalid_coordinate() {
        let g = Geometry::Point(Point2::new(f64::NAN, 1.0));
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::InvalidCoordinate);

        let line = Geometry::LineString(LineString::new(pts(&[(0.0, 0.0), (f64::INFINITY, 1.0)])));
        assert_eq!(
            validation_error(&line).unwrap().kind,
            ValidationErrorKind::InvalidCoordinate
        );
    }

    #[test]
    fn test_ring_not_closed_reports_first_coordinate() {
        let open = polygon(
            &[(3.0, 4.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            &[],
        );
        let err = validation_error(&open).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::RingNotClosed);
        assert_eq!(err.coordinate, Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_too_few_points() {
        let line = Geometry::LineString(LineString::new(pts(&[(1.0, 1.0)])));
        assert_eq!(
            validation_error(&line).unwrap().kind,
            ValidationErrorKind::TooFewPoints
        );

        let collapsed = polygon(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)], &[]);
        assert_eq!(
            validation_error(&collapsed).unwrap().kind,
            ValidationErrorKind::TooFewPoints
        );
    }

    #[test]
    fn test_crossing_figure_eight_polygon() {
        let g = polygon(
            &[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)],
            &[],
        );
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::SelfIntersection);
        assert_eq!(err.coordinate, Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_figure_eight_linear_ring() {
        let g = Geometry::LinearRing(ring(&[
            (0.0, 0.0),
            (2.0, 2.0),
            (2.0, 0.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]));
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::RingSelfIntersection);
        assert_eq!(err.coordinate, Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_vertex_bowtie_polygon() {
        let bowtie = polygon(
            &[
                (0.0, 0.0),
                (2.0, 0.0),
                (1.0, 1.0),
                (2.0, 2.0),
                (0.0, 2.0),
                (1.0, 1.0),
                (0.0, 0.0),
            ],
            &[],
        );
        // Default: the self-touch at (1,1) is a ring self-intersection.
        let err = validation_error(&bowtie).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::RingSelfIntersection);
        assert_eq!(err.coordinate, Point2::new(1.0, 1.0));

        // Relaxed self-touch rule: still invalid, because the touch
        // disconnects the interior.
        let err = IsValidOp::new(&bowtie)
            .with_self_touching_ring_forming_hole_valid(true)
            .validation_error()
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::DisconnectedInteriors);
    }

    #[test]
    fn test_self_touch_forming_hole_with_flag() {
        let pinched = polygon(
            &[
                (0.0, 0.0),
                (8.0, 0.0),
                (8.0, 8.0),
                (4.0, 8.0),
                (6.0, 4.0),
                (2.0, 4.0),
                (4.0, 8.0),
                (0.0, 8.0),
                (0.0, 0.0),
            ],
            &[],
        );
        // Strict rule: the self-touch is invalid.
        assert_eq!(
            validation_error(&pinched).unwrap().kind,
            ValidationErrorKind::RingSelfIntersection
        );
        // Relaxed rule: the touch only forms a hole, which is accepted.
        assert!(IsValidOp::new(&pinched)
            .with_self_touching_ring_forming_hole_valid(true)
            .is_valid());
    }

    #[test]
    fn test_hole_outside_shell() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(20.0, 20.0), (22.0, 20.0), (22.0, 22.0), (20.0, 22.0), (20.0, 20.0)]],
        );
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::HoleOutsideShell);
    }

    #[test]
    fn test_nested_holes() {
        let g = polygon(
            &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)],
            &[
                &[(10.0, 10.0), (60.0, 10.0), (60.0, 60.0), (10.0, 60.0), (10.0, 10.0)],
                &[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 30.0), (20.0, 20.0)],
            ],
        );
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::NestedHoles);
    }

    #[test]
    fn test_nested_shells() {
        let outer = Polygon::new(
            ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)]),
            vec![],
        );
        let inner = Polygon::new(
            ring(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0), (10.0, 10.0)]),
            vec![],
        );
        let g = Geometry::MultiPolygon(vec![outer, inner]);
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::NestedShells);
    }

    #[test]
    fn test_shell_inside_hole_is_valid() {
        let donut = Polygon::new(
            ring(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)]),
            vec![ring(&[
                (10.0, 10.0),
                (90.0, 10.0),
                (90.0, 90.0),
                (10.0, 90.0),
                (10.0, 10.0),
            ])],
        );
        let island = Polygon::new(
            ring(&[(30.0, 30.0), (70.0, 30.0), (70.0, 70.0), (30.0, 70.0), (30.0, 30.0)]),
            vec![],
        );
        let g = Geometry::MultiPolygon(vec![donut, island]);
        assert!(is_valid(&g));
    }

    #[test]
    fn test_duplicate_rings() {
        let p = Polygon::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![],
        );
        let g = Geometry::MultiPolygon(vec![p.clone(), p]);
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateRings);
    }

    #[test]
    fn test_interior_disconnected_by_hole() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(5.0, 0.0), (6.0, 5.0), (5.0, 10.0), (4.0, 5.0), (5.0, 0.0)]],
        );
        let err = validation_error(&g).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::DisconnectedInteriors);
    }

    #[test]
    fn test_empty_geometries_are_valid() {
        let empty: Geometry<f64> = Geometry::MultiPoint(vec![]);
        assert!(is_valid(&empty));
        let empty_collection: Geometry<f64> = Geometry::GeometryCollection(vec![]);
        assert!(is_valid(&empty_collection));
    }

    #[test]
    fn test_lines_are_forgiving() {
        // A self-crossing line is still a valid LineString.
        let g = Geometry::LineString(LineString::new(pts(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 10.0),
        ])));
        assert!(is_valid(&g));
    }

    #[test]
    fn test_check_valid_error_surface() {
        let err = IsValidOp::new(&square()).check_valid();
        assert!(err.is_ok());

        let bad = polygon(
            &[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)],
            &[],
        );
        match IsValidOp::new(&bad).check_valid() {
            Err(TopologyError::InvalidGeometry { message, x, y }) => {
                assert!(message.contains("self-intersection"));
                assert_eq!((x, y), (1.0, 1.0));
            }
            other => panic!("expected InvalidGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_collection_recurses() {
        let bad = polygon(
            &[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)],
            &[],
        );
        let g = Geometry::GeometryCollection(vec![square(), bad]);
        assert_eq!(
            validation_error(&g).unwrap().kind,
            ValidationErrorKind::SelfIntersection
        );
    }
}

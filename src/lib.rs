//! robustum - Robust planar topology
//!
//! Computational geometry for planar vector data, built around one hard
//! requirement: topological decisions must stay correct under
//! floating-point arithmetic. The crate provides validity checking of
//! polygonal geometry over a planar topology graph, segment noding with
//! spatial-index pruning, and conforming Delaunay triangulation with
//! constraint enforcement, all resting on exact-fallback geometric
//! predicates.
//!
//! # Subsystems
//!
//! - [`algorithm`]: robust orientation/in-circle predicates, segment
//!   intersection, point-in-ring location, convex hull.
//! - [`index`]: STR-packed R-tree, quadtree, and a snap-merging kd-tree.
//! - [`noding`]: making segment intersections explicit, and validating
//!   fully noded sets.
//! - [`graph`]: labeled planar topology graphs with radially sorted node
//!   stars and the DE-9IM matrix.
//! - [`valid`]: the simple-features validity predicate.
//! - [`triangulate`]: quad-edge Delaunay triangulation, unconstrained and
//!   conforming.
//!
//! # Example
//!
//! ```
//! use robustum::Point2;
//! use robustum::geometry::{Geometry, LinearRing, Polygon};
//! use robustum::valid::{validation_error, ValidationErrorKind};
//!
//! // A figure-eight pretending to be a polygon.
//! let bowtie = Geometry::Polygon(Polygon::new(
//!     LinearRing::new(vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(2.0, 2.0),
//!         Point2::new(2.0, 0.0),
//!         Point2::new(0.0, 2.0),
//!         Point2::new(0.0, 0.0),
//!     ]),
//!     vec![],
//! ));
//! let err = validation_error(&bowtie).unwrap();
//! assert_eq!(err.kind, ValidationErrorKind::SelfIntersection);
//! assert_eq!(err.coordinate, Point2::new(1.0, 1.0));
//! ```

pub mod algorithm;
pub mod bounds;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod index;
pub mod noding;
pub mod primitives;
pub mod triangulate;
pub mod valid;

pub use algorithm::{
    orientation_index, LineIntersection, Orientation, RobustLineIntersector,
};
pub use bounds::Aabb2;
pub use error::TopologyError;
pub use primitives::{Point2, Segment2, Vec2};
pub use valid::{is_valid, validation_error, IsValidOp, TopologyValidationError, ValidationErrorKind};

//! Geometric predicates and constructions with controlled robustness.
//!
//! Everything in this module is built on one idea: the fast floating-point
//! formula is used whenever an error bound can certify its sign, and an
//! exact extended-precision evaluation takes over when it cannot. The
//! orientation and in-circle predicates here underlie segment noding,
//! validity checking, and Delaunay insertion; any misclassification in
//! them surfaces as a missed or spurious intersection downstream.

mod hull;
mod intersection;
mod point_in_ring;
mod robust;

pub use hull::convex_hull;
pub use intersection::{edge_fraction, LineIntersection, RobustLineIntersector};
pub use point_in_ring::locate_point_in_ring;
pub use robust::{in_circle, is_ccw, orientation_index, signed_area, Orientation};

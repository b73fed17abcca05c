//! Segment noding: making intersections explicit.
//!
//! Noding takes a collection of segment strings and augments each with the
//! points where it crosses or touches any other (or itself), so that the
//! split results meet only at shared endpoints. The noder prunes candidate
//! pairs with monotone chains in an [`StrTree`](crate::index::StrTree) and
//! classifies each candidate with the robust line intersector; a separate
//! validator re-runs the search to certify that a collection really is
//! fully noded.

mod chain;
mod noder;
mod segment_string;
mod validate;

pub use chain::{chains_of, overlap_pairs, MonotoneChain};
pub use noder::{IndexNoder, IntersectionAdder, InteriorIntersectionFinder, SegmentIntersector};
pub use segment_string::{SegmentNode, SegmentString};
pub use validate::{InteriorIntersection, NodingValidator};

//! Validation of fully noded segment collections.

use super::noder::{IndexNoder, InteriorIntersectionFinder};
use super::segment_string::SegmentString;
use crate::error::TopologyError;
use crate::primitives::Point2;
use num_traits::Float;

/// A remaining interior intersection found by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteriorIntersection<F> {
    /// The intersection point.
    pub point: Point2<F>,
    /// Endpoints of the two segments that still intersect, as
    /// `[s0.start, s0.end, s1.start, s1.end]`.
    pub segments: [Point2<F>; 4],
}

/// Checks that a collection of segment strings is fully noded: no segment
/// interior meets any other segment.
///
/// The validator assumes at least one round of noding has been performed.
/// It deliberately does not detect degenerate "a-b-a" collapses or
/// endpoint-versus-interior-vertex coincidences; a noding pass resolves
/// those before validation makes sense. The result is dual-surfaced:
/// callers can ask for a boolean, the offending intersection, or an error.
///
/// # Example
///
/// ```
/// use robustum::Point2;
/// use robustum::noding::{NodingValidator, SegmentString};
///
/// let mut crossing = vec![
///     SegmentString::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)], 0),
///     SegmentString::new(vec![Point2::new(5.0, -5.0), Point2::new(5.0, 5.0)], 1),
/// ];
/// let validator = NodingValidator::of(&mut crossing);
/// assert!(!validator.is_valid());
/// assert!(validator.check_valid().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NodingValidator<F> {
    error: Option<InteriorIntersection<F>>,
}

impl<F: Float> NodingValidator<F> {
    /// Runs the pairwise intersection search over the collection.
    pub fn of(strings: &mut [SegmentString<F>]) -> Self {
        let mut finder = InteriorIntersectionFinder::new();
        IndexNoder::new().compute_nodes(strings, &mut finder);
        NodingValidator {
            error: finder
                .intersection
                .map(|(point, segments)| InteriorIntersection { point, segments }),
        }
    }

    /// Returns `true` if no interior intersection remains.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the first remaining interior intersection, if any.
    pub fn error(&self) -> Option<&InteriorIntersection<F>> {
        self.error.as_ref()
    }

    /// Returns `Err` carrying the intersection location if the collection
    /// is not fully noded.
    pub fn check_valid(&self) -> Result<(), TopologyError> {
        match &self.error {
            None => Ok(()),
            Some(e) => Err(TopologyError::NotNoded {
                x: e.point.x.to_f64().unwrap_or(f64::NAN),
                y: e.point.y.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }
}

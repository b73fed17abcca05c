//! Error types for topology operations.

use thiserror::Error;

/// Errors raised by the exception-style entry points.
///
/// Most query surfaces in this crate report problems as values (a boolean
/// plus an error description carrying the offending coordinate). The
/// variants here back the `check_*` conveniences and the operations whose
/// failure leaves no usable result at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// A geometry failed validation.
    #[error("invalid geometry: {message} at ({x}, {y})")]
    InvalidGeometry {
        /// Description of the validation failure.
        message: String,
        /// X ordinate of the offending coordinate.
        x: f64,
        /// Y ordinate of the offending coordinate.
        y: f64,
    },

    /// A supposedly noded segment collection still contains an interior
    /// intersection.
    #[error("found non-noded intersection at ({x}, {y})")]
    NotNoded {
        /// X ordinate of the remaining intersection.
        x: f64,
        /// Y ordinate of the remaining intersection.
        y: f64,
    },

    /// Constraint enforcement did not converge within the iteration cap.
    ///
    /// The coordinates are the last split point computed before giving up,
    /// which usually points at the narrow-angle constraint cluster that
    /// prevented convergence.
    #[error("too many splitting iterations while enforcing constraints; last split point was at ({x}, {y})")]
    ConstraintEnforcement {
        /// X ordinate of the last computed split point.
        x: f64,
        /// Y ordinate of the last computed split point.
        y: f64,
    },

    /// Walking point location in the subdivision exceeded its step budget.
    #[error("point location failed after {iterations} iterations")]
    LocateFailed {
        /// Number of walk steps attempted.
        iterations: usize,
    },
}

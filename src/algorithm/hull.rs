//! Convex hull by Andrew's monotone chain.

use super::robust::{orientation_index, Orientation};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Computes the convex hull of a set of points.
///
/// Returns the hull vertices in counter-clockwise order, starting from the
/// lexicographically smallest point. The ring is open: the first vertex is
/// not repeated at the end. Collinear points on a hull edge are dropped.
/// Degenerate inputs return what they can: fewer than three distinct
/// points come back as-is, fully collinear input as its two extremes.
pub fn convex_hull<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    let mut sorted: Vec<Point2<F>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 {
            let a = lower[lower.len() - 2];
            let b = lower[lower.len() - 1];
            if orientation_index(a, b, p) != Orientation::CounterClockwise {
                lower.pop();
            } else {
                break;
            }
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 {
            let a = upper[upper.len() - 2];
            let b = upper[upper.len() - 1];
            if orientation_index(a, b, p) != Orientation::CounterClockwise {
                upper.pop();
            } else {
                break;
            }
        }
        upper.push(p);
    }

    // Each chain's last point is the other chain's first.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

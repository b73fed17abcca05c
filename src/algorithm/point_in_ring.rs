//! Point-in-ring location by ray crossing.

use super::robust::{orientation_index, Orientation};
use crate::graph::Location;
use crate::primitives::Point2;
use num_traits::Float;

/// Locates a point relative to a closed ring (first coordinate equal to
/// the last) by counting crossings of a rightward ray.
///
/// Returns [`Location::Boundary`] when the point lies on a ring segment,
/// [`Location::Interior`] for an odd crossing count, and
/// [`Location::Exterior`] otherwise. The winding of the ring does not
/// matter. Crossing decisions at vertices use the exact orientation
/// predicate, so grazing rays are counted consistently.
pub fn locate_point_in_ring<F: Float>(p: Point2<F>, ring: &[Point2<F>]) -> Location {
    let mut crossings = 0usize;
    for i in 1..ring.len() {
        let p1 = ring[i];
        let p2 = ring[i - 1];

        if p == p1 || p == p2 {
            return Location::Boundary;
        }

        // Horizontal segment through the query point.
        if p1.y == p.y && p2.y == p.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if min_x <= p.x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }

        // Count only segments that straddle the ray's y level exactly once.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            if p1.x < p.x && p2.x < p.x {
                continue;
            }
            let orient = orientation_index(p1, p2, p);
            if orient == Orientation::Collinear {
                return Location::Boundary;
            }
            // The segment crosses the rightward ray when the point lies on
            // the side matching the segment's y direction.
            let sign = if p2.y < p1.y {
                -orient.sign()
            } else {
                orient.sign()
            };
            if sign > 0 {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_inside_outside() {
        assert_eq!(
            locate_point_in_ring(Point2::new(5.0, 5.0), &square()),
            Location::Interior
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(15.0, 5.0), &square()),
            Location::Exterior
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(-1.0, 5.0), &square()),
            Location::Exterior
        );
    }

    #[test]
    fn test_boundary() {
        assert_eq!(
            locate_point_in_ring(Point2::new(0.0, 0.0), &square()),
            Location::Boundary
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(5.0, 0.0), &square()),
            Location::Boundary
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(10.0, 5.0), &square()),
            Location::Boundary
        );
    }

    #[test]
    fn test_ray_through_vertex() {
        // The rightward ray from (5, 10) passes exactly through the top
        // corners; the point itself is on the boundary.
        assert_eq!(
            locate_point_in_ring(Point2::new(5.0, 10.0), &square()),
            Location::Boundary
        );
        // Just inside under the top edge, ray exits through one wall.
        assert_eq!(
            locate_point_in_ring(Point2::new(5.0, 10.0 - 1e-9), &square()),
            Location::Interior
        );
    }

    #[test]
    fn test_ray_grazing_corner() {
        // A concave ring where the ray from the query point passes
        // exactly through a reflex vertex.
        let ring = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(6.0, 4.0),
            Point2::new(10.0, 8.0),
            Point2::new(0.0, 8.0),
            Point2::new(0.0, 0.0),
        ];
        assert_eq!(
            locate_point_in_ring(Point2::new(1.0, 4.0), &ring),
            Location::Interior
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(11.0, 4.0), &ring),
            Location::Exterior
        );
    }

    #[test]
    fn test_winding_independent() {
        let cw: Vec<Point2<f64>> = square().iter().rev().copied().collect();
        assert_eq!(
            locate_point_in_ring(Point2::new(5.0, 5.0), &cw),
            Location::Interior
        );
        assert_eq!(
            locate_point_in_ring(Point2::new(-5.0, 5.0), &cw),
            Location::Exterior
        );
    }
}

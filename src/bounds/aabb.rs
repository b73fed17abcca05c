//! Axis-aligned bounding box.

use crate::primitives::Point2;
use num_traits::Float;

/// A 2D axis-aligned bounding box, defined by minimum and maximum corners.
///
/// This is the envelope type used throughout the spatial indexes: every
/// indexed item is keyed by its `Aabb2`, and every range query is an
/// `Aabb2` intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from two arbitrary corners, in any orientation.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates an AABB containing a single point.
    #[inline]
    pub fn from_point(p: Point2<F>) -> Self {
        Self { min: p, max: p }
    }

    /// Creates an AABB from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::from_point(first);
        for p in iter {
            aabb = aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Returns the width of the AABB.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the AABB.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Returns the smallest AABB containing both `self` and `p`.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns this AABB grown by `delta` on every side.
    #[inline]
    pub fn expand_by(self, delta: F) -> Self {
        Self {
            min: Point2::new(self.min.x - delta, self.min.y - delta),
            max: Point2::new(self.max.x + delta, self.max.y + delta),
        }
    }

    /// Tests whether this AABB intersects another (boundaries touching
    /// counts as intersecting).
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Tests whether a point lies inside or on the boundary of this AABB.
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Tests whether `other` lies entirely inside or on this AABB.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_any_orientation() {
        let a = Aabb2::from_corners(Point2::new(5.0_f64, 1.0), Point2::new(2.0, 7.0));
        assert_eq!(a.min, Point2::new(2.0, 1.0));
        assert_eq!(a.max, Point2::new(5.0, 7.0));
    }

    #[test]
    fn test_from_points() {
        let pts = vec![
            Point2::new(1.0_f64, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let a = Aabb2::from_points(pts).unwrap();
        assert_eq!(a.min, Point2::new(-2.0, -1.0));
        assert_eq!(a.max, Point2::new(4.0, 5.0));

        let empty: Vec<Point2<f64>> = vec![];
        assert!(Aabb2::from_points(empty).is_none());
    }

    #[test]
    fn test_measures() {
        let a = Aabb2::from_corners(Point2::new(0.0_f64, 0.0), Point2::new(4.0, 2.0));
        assert_eq!(a.width(), 4.0);
        assert_eq!(a.height(), 2.0);
        assert_eq!(a.center(), Point2::new(2.0, 1.0));
    }

    #[test]
    fn test_expand() {
        let a = Aabb2::from_point(Point2::new(1.0_f64, 1.0));
        let b = a.expand_to_include(Point2::new(3.0, -1.0));
        assert_eq!(b.min, Point2::new(1.0, -1.0));
        assert_eq!(b.max, Point2::new(3.0, 1.0));
        let c = b.expand_by(0.5);
        assert_eq!(c.min, Point2::new(0.5, -1.5));
        assert_eq!(c.max, Point2::new(3.5, 1.5));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb2::from_corners(Point2::new(0.0_f64, 0.0), Point2::new(2.0, 2.0));
        let b = Aabb2::from_corners(Point2::new(1.0_f64, 1.0), Point2::new(3.0, 3.0));
        let c = Aabb2::from_corners(Point2::new(5.0_f64, 5.0), Point2::new(6.0, 6.0));
        let touching = Aabb2::from_corners(Point2::new(2.0_f64, 0.0), Point2::new(4.0, 2.0));
        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
        assert!(a.intersects(touching));
    }

    #[test]
    fn test_containment() {
        let outer = Aabb2::from_corners(Point2::new(0.0_f64, 0.0), Point2::new(10.0, 10.0));
        let inner = Aabb2::from_corners(Point2::new(2.0_f64, 2.0), Point2::new(3.0, 3.0));
        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
        assert!(outer.contains_point(Point2::new(10.0, 10.0)));
        assert!(!outer.contains_point(Point2::new(10.1, 10.0)));
    }
}

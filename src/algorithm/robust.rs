//! Robust orientation and in-circle predicates.
//!
//! The fast paths evaluate the usual determinants directly. Each fast path
//! is guarded by an error-bound filter: when the magnitude of the result is
//! too small relative to the magnitudes that produced it, the sign cannot
//! be trusted and the predicate re-evaluates the determinant in
//! double-double arithmetic, which carries roughly 106 bits of mantissa and
//! resolves every case the filter rejects.

use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points turn clockwise (negative area).
    Clockwise,
    /// The three points are exactly collinear.
    Collinear,
    /// The three points turn counter-clockwise (positive area).
    CounterClockwise,
}

impl Orientation {
    /// Returns this orientation as a sign: -1, 0, or +1.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    #[inline]
    fn from_sign<F: Float>(v: F) -> Self {
        if v > F::zero() {
            Orientation::CounterClockwise
        } else if v < F::zero() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

/// Safe relative error bound for the 2x2 orientation determinant computed
/// in double precision.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Computes the orientation of point `c` relative to the directed line
/// from `a` to `b`.
///
/// Returns `CounterClockwise` if `c` lies to the left of `a -> b`,
/// `Clockwise` if it lies to the right, and `Collinear` if it lies exactly
/// on the line. The result is exact: near-collinear inputs that defeat the
/// plain cross product are resolved by the extended-precision fallback.
pub fn orientation_index<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Orientation {
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;

    // Filter: if the two products have opposite signs, or either is zero,
    // the subtraction cannot cancel catastrophically and the sign is exact.
    let det_sum = if det_left > F::zero() {
        if det_right <= F::zero() {
            return Orientation::from_sign(det);
        }
        det_left + det_right
    } else if det_left < F::zero() {
        if det_right >= F::zero() {
            return Orientation::from_sign(det);
        }
        -det_left - det_right
    } else {
        return Orientation::from_sign(det);
    };

    let err_bound = F::from(DP_SAFE_EPSILON).unwrap() * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Orientation::from_sign(det);
    }

    orientation_index_exact(a, b, c)
}

/// Exact orientation via double-double expansion of the six products.
fn orientation_index_exact<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Orientation {
    let ax = a.x.to_f64().unwrap();
    let ay = a.y.to_f64().unwrap();
    let bx = b.x.to_f64().unwrap();
    let by = b.y.to_f64().unwrap();
    let cx = c.x.to_f64().unwrap();
    let cy = c.y.to_f64().unwrap();

    // det = ax*by - ay*bx + ay*cx - ax*cy + bx*cy - by*cx
    let det = Dd::product(ax, by)
        .add(Dd::product(ay, bx).neg())
        .add(Dd::product(ay, cx))
        .add(Dd::product(ax, cy).neg())
        .add(Dd::product(bx, cy))
        .add(Dd::product(by, cx).neg());

    match det.signum() {
        s if s > 0 => Orientation::CounterClockwise,
        s if s < 0 => Orientation::Clockwise,
        _ => Orientation::Collinear,
    }
}

/// Relative error bound for the in-circle determinant (Shewchuk's bound
/// for the double-precision evaluation).
const IN_CIRCLE_ERR_BOUND: f64 = 1.2e-15;

/// Tests whether point `p` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `a`, `b`, `c`.
///
/// Points exactly on the circle are reported as outside. The triangle must
/// be in counter-clockwise order; for a clockwise triangle the result is
/// inverted.
pub fn in_circle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, p: Point2<F>) -> bool {
    let adx = a.x - p.x;
    let ady = a.y - p.y;
    let bdx = b.x - p.x;
    let bdy = b.y - p.y;
    let cdx = c.x - p.x;
    let cdy = c.y - p.y;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let bcdet = bdx * cdy - cdx * bdy;
    let cadet = cdx * ady - adx * cdy;
    let abdet = adx * bdy - bdx * ady;

    let det = alift * bcdet + blift * cadet + clift * abdet;

    let permanent = alift * (bdx.abs() * cdy.abs() + cdx.abs() * bdy.abs())
        + blift * (cdx.abs() * ady.abs() + adx.abs() * cdy.abs())
        + clift * (adx.abs() * bdy.abs() + bdx.abs() * ady.abs());
    let err_bound = F::from(IN_CIRCLE_ERR_BOUND).unwrap() * permanent;

    if det > err_bound {
        return true;
    }
    if -det > err_bound {
        return false;
    }

    in_circle_exact(a, b, c, p)
}

/// Exact in-circle via the 3x3 determinant evaluated in double-double
/// arithmetic on translated coordinates.
fn in_circle_exact<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, p: Point2<F>) -> bool {
    let px = p.x.to_f64().unwrap();
    let py = p.y.to_f64().unwrap();
    let diff = |q: Point2<F>| {
        (
            Dd::from(q.x.to_f64().unwrap()).add(Dd::from(px).neg()),
            Dd::from(q.y.to_f64().unwrap()).add(Dd::from(py).neg()),
        )
    };
    let (adx, ady) = diff(a);
    let (bdx, bdy) = diff(b);
    let (cdx, cdy) = diff(c);

    let alift = adx.mul(adx).add(ady.mul(ady));
    let blift = bdx.mul(bdx).add(bdy.mul(bdy));
    let clift = cdx.mul(cdx).add(cdy.mul(cdy));

    let bcdet = bdx.mul(cdy).add(cdx.mul(bdy).neg());
    let cadet = cdx.mul(ady).add(adx.mul(cdy).neg());
    let abdet = adx.mul(bdy).add(bdx.mul(ady).neg());

    let det = alift
        .mul(bcdet)
        .add(blift.mul(cadet))
        .add(clift.mul(abdet));

    det.signum() > 0
}

/// Computes the signed area of a closed ring (first coordinate equal to
/// the last), by the shoelace formula.
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area<F: Float>(ring: &[Point2<F>]) -> F {
    if ring.len() < 3 {
        return F::zero();
    }
    let mut sum = F::zero();
    for i in 0..ring.len() - 1 {
        let p = ring[i];
        let q = ring[i + 1];
        sum = sum + (p.x * q.y - q.x * p.y);
    }
    sum * F::from(0.5).unwrap()
}

/// Tests whether a closed ring is wound counter-clockwise.
#[inline]
pub fn is_ccw<F: Float>(ring: &[Point2<F>]) -> bool {
    signed_area(ring) > F::zero()
}

/// A double-double value: an unevaluated sum of two doubles where `lo` is
/// far below the last bit of `hi`. Only the operations the exact
/// predicates need are implemented.
#[derive(Debug, Clone, Copy)]
struct Dd {
    hi: f64,
    lo: f64,
}

/// Splitter constant for Dekker's product: 2^27 + 1.
const SPLIT: f64 = 134_217_729.0;

impl Dd {
    #[inline]
    fn from(x: f64) -> Self {
        Dd { hi: x, lo: 0.0 }
    }

    /// Exact product of two doubles as a double-double.
    #[inline]
    fn product(a: f64, b: f64) -> Self {
        let (hi, lo) = two_product(a, b);
        Dd { hi, lo }
    }

    #[inline]
    fn neg(self) -> Self {
        Dd {
            hi: -self.hi,
            lo: -self.lo,
        }
    }

    fn add(self, o: Dd) -> Self {
        let (s, mut e) = two_sum(self.hi, o.hi);
        let (t, f) = two_sum(self.lo, o.lo);
        e += t;
        let (s, mut e2) = quick_two_sum(s, e);
        e2 += f;
        let (hi, lo) = quick_two_sum(s, e2);
        Dd { hi, lo }
    }

    fn mul(self, o: Dd) -> Self {
        let (p, mut e) = two_product(self.hi, o.hi);
        e += self.hi * o.lo + self.lo * o.hi;
        let (hi, lo) = quick_two_sum(p, e);
        Dd { hi, lo }
    }

    fn signum(self) -> i32 {
        if self.hi > 0.0 || (self.hi == 0.0 && self.lo > 0.0) {
            1
        } else if self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0) {
            -1
        } else {
            0
        }
    }
}

#[inline]
fn split(a: f64) -> (f64, f64) {
    let c = SPLIT * a;
    let hi = c - (c - a);
    (hi, a - hi)
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let v = s - a;
    let e = (a - (s - v)) + (b - v);
    (s, e)
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let e = b - (s - a);
    (s, e)
}

#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let (ahi, alo) = split(a);
    let (bhi, blo) = split(b);
    let e = ((ahi * bhi - p) + ahi * blo + alo * bhi) + alo * blo;
    (p, e)
}

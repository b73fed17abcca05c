//! Planar geometry variants as plain data.
//!
//! The engine consumes geometries in exactly this in-memory shape: ordered
//! coordinate sequences grouped into the standard variants. Closed rings
//! repeat their first coordinate as the last. Parsing from interchange
//! formats is a caller concern.

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

/// A chain of two or more coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<F> {
    /// The coordinates of the line, in order.
    pub coords: Vec<Point2<F>>,
}

impl<F: Float> LineString<F> {
    /// Creates a line string.
    pub fn new(coords: Vec<Point2<F>>) -> Self {
        LineString { coords }
    }

    /// Returns `true` if the line has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// A closed chain of coordinates: the first coordinate is repeated as the
/// last.
///
/// Closure is a validity condition, not a construction invariant, so an
/// unclosed ring can be represented and will be reported by the validity
/// checker rather than rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing<F> {
    /// The coordinates of the ring, in order.
    pub coords: Vec<Point2<F>>,
}

impl<F: Float> LinearRing<F> {
    /// Creates a ring.
    pub fn new(coords: Vec<Point2<F>>) -> Self {
        LinearRing { coords }
    }

    /// Returns `true` if the ring has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns `true` if the first coordinate exactly equals the last.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// An area bounded by a shell ring and zero or more hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The exterior ring.
    pub shell: LinearRing<F>,
    /// The interior rings (holes).
    pub holes: Vec<LinearRing<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon from a shell and holes.
    pub fn new(shell: LinearRing<F>, holes: Vec<LinearRing<F>>) -> Self {
        Polygon { shell, holes }
    }

    /// Returns `true` if the shell is empty.
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Iterates the shell and then each hole.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing<F>> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }
}

/// The geometry variants accepted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<F> {
    /// A single coordinate.
    Point(Point2<F>),
    /// A set of coordinates.
    MultiPoint(Vec<Point2<F>>),
    /// A coordinate chain.
    LineString(LineString<F>),
    /// A closed coordinate chain.
    LinearRing(LinearRing<F>),
    /// A shell with holes.
    Polygon(Polygon<F>),
    /// A set of polygons.
    MultiPolygon(Vec<Polygon<F>>),
    /// A heterogeneous collection.
    GeometryCollection(Vec<Geometry<F>>),
}

impl<F: Float> Geometry<F> {
    /// Returns `true` if the geometry contains no coordinates.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::LineString(l) => l.is_empty(),
            Geometry::LinearRing(r) => r.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPolygon(ps) => ps.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gs) => gs.iter().all(Geometry::is_empty),
        }
    }

    /// Visits every coordinate of the geometry.
    pub fn each_coordinate<V: FnMut(Point2<F>)>(&self, visitor: &mut V) {
        match self {
            Geometry::Point(p) => visitor(*p),
            Geometry::MultiPoint(pts) => pts.iter().copied().for_each(visitor),
            Geometry::LineString(l) => l.coords.iter().copied().for_each(visitor),
            Geometry::LinearRing(r) => r.coords.iter().copied().for_each(visitor),
            Geometry::Polygon(p) => {
                for ring in p.rings() {
                    ring.coords.iter().copied().for_each(&mut *visitor);
                }
            }
            Geometry::MultiPolygon(ps) => {
                for p in ps {
                    for ring in p.rings() {
                        ring.coords.iter().copied().for_each(&mut *visitor);
                    }
                }
            }
            Geometry::GeometryCollection(gs) => {
                for g in gs {
                    g.each_coordinate(visitor);
                }
            }
        }
    }

    /// Returns the envelope of the geometry, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb2<F>> {
        let mut env: Option<Aabb2<F>> = None;
        self.each_coordinate(&mut |p| {
            env = Some(match env {
                None => Aabb2::from_point(p),
                Some(e) => e.expand_to_include(p),
            });
        });
        env
    }
}

/// Drops consecutive repeated coordinates from a sequence.
pub fn remove_repeated<F: Float>(pts: &[Point2<F>]) -> Vec<Point2<F>> {
    let mut out: Vec<Point2<F>> = Vec::with_capacity(pts.len());
    for &p in pts {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

//! Topological locations and edge labels.

/// The topological location of a point or region relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// In the interior of the geometry.
    Interior,
    /// On the boundary of the geometry.
    Boundary,
    /// In the exterior of the geometry.
    Exterior,
}

impl Location {
    /// Row/column index of this location in a DE-9IM matrix.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// The three positions a label describes relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// On the edge itself.
    On,
    /// To the left of the edge direction.
    Left,
    /// To the right of the edge direction.
    Right,
}

impl Position {
    #[inline]
    fn index(self) -> usize {
        match self {
            Position::On => 0,
            Position::Left => 1,
            Position::Right => 2,
        }
    }
}

/// Topological locations for up to two input geometries, per position.
///
/// A line label carries only the `On` location; an area label carries all
/// three. Unknown locations are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Label {
    locations: [[Option<Location>; 3]; 2],
}

impl Label {
    /// Creates an empty label.
    pub fn new() -> Self {
        Label::default()
    }

    /// Creates a line label: only the `On` location is set.
    pub fn new_line(geom_index: usize, on: Location) -> Self {
        let mut label = Label::new();
        label.set(geom_index, Position::On, on);
        label
    }

    /// Creates an area label with `On`, `Left`, and `Right` locations.
    pub fn new_area(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Label::new();
        label.set(geom_index, Position::On, on);
        label.set(geom_index, Position::Left, left);
        label.set(geom_index, Position::Right, right);
        label
    }

    /// Returns the location for a geometry at a position.
    #[inline]
    pub fn get(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.locations[geom_index][pos.index()]
    }

    /// Sets the location for a geometry at a position.
    #[inline]
    pub fn set(&mut self, geom_index: usize, pos: Position, loc: Location) {
        self.locations[geom_index][pos.index()] = Some(loc);
    }

    /// Returns `true` if the label carries side locations for the
    /// geometry (an area label).
    pub fn is_area(&self, geom_index: usize) -> bool {
        self.locations[geom_index][Position::Left.index()].is_some()
            || self.locations[geom_index][Position::Right.index()].is_some()
    }

    /// Returns a copy with the left and right locations swapped, the
    /// label of the same edge traversed in the opposite direction.
    pub fn flipped(&self) -> Self {
        let mut out = *self;
        for geom in &mut out.locations {
            geom.swap(Position::Left.index(), Position::Right.index());
        }
        out
    }

    /// Merges another label into this one position by position, combining
    /// conflicting locations by the precedence Interior > Boundary >
    /// Exterior.
    ///
    /// This is the rule used when several coincident edges stack into one
    /// bundle: the strongest claim about a region wins.
    pub fn merge(&mut self, other: &Label) {
        for geom in 0..2 {
            for pos in 0..3 {
                let merged = match (self.locations[geom][pos], other.locations[geom][pos]) {
                    (a, None) => a,
                    (None, b) => b,
                    (Some(a), Some(b)) => Some(merge_locations(a, b)),
                };
                self.locations[geom][pos] = merged;
            }
        }
    }
}

/// Combines two locations with the fixed precedence Interior > Boundary >
/// Exterior.
#[inline]
pub(crate) fn merge_locations(a: Location, b: Location) -> Location {
    use Location::*;
    match (a, b) {
        (Interior, _) | (_, Interior) => Interior,
        (Boundary, _) | (_, Boundary) => Boundary,
        _ => Exterior,
    }
}

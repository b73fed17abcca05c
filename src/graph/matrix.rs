//! The Dimensionally Extended 9-Intersection Model matrix.

use super::label::Location;
use std::fmt;

/// Dimension of an intersection set in a DE-9IM entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    /// The intersection is empty.
    False,
    /// The intersection contains a point (dimension 0).
    Point,
    /// The intersection contains a curve (dimension 1).
    Curve,
    /// The intersection contains an area (dimension 2).
    Surface,
}

impl Dimension {
    fn symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Curve => '1',
            Dimension::Surface => '2',
        }
    }

    /// Tests this dimension against one character of a DE-9IM pattern.
    fn matches(self, pattern: char) -> bool {
        match pattern {
            '*' => true,
            'T' => self != Dimension::False,
            'F' => self == Dimension::False,
            '0' => self == Dimension::Point,
            '1' => self == Dimension::Curve,
            '2' => self == Dimension::Surface,
            other => panic!("invalid DE-9IM pattern character: {:?}", other),
        }
    }
}

/// A 3x3 matrix of intersection dimensions between the interior,
/// boundary, and exterior of two geometries.
///
/// Every topological relationship test is phrased as updates to, and a
/// pattern match over, this matrix. Rows index the first geometry's
/// interior/boundary/exterior; columns the second's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionMatrix {
    dims: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// Creates a matrix with every entry `False`.
    pub fn new() -> Self {
        IntersectionMatrix {
            dims: [[Dimension::False; 3]; 3],
        }
    }

    /// Returns the dimension at a row/column pair of locations.
    pub fn get(&self, row: Location, col: Location) -> Dimension {
        self.dims[row.index()][col.index()]
    }

    /// Sets the dimension at a row/column pair of locations.
    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        self.dims[row.index()][col.index()] = dim;
    }

    /// Raises the entry to at least the given dimension.
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimension) {
        let cell = &mut self.dims[row.index()][col.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// Raises the entry if both locations are known.
    ///
    /// This is how graph components contribute: a component only updates
    /// the matrix when it is labeled for both geometries.
    pub fn set_at_least_if_valid(
        &mut self,
        row: Option<Location>,
        col: Option<Location>,
        dim: Dimension,
    ) {
        if let (Some(r), Some(c)) = (row, col) {
            self.set_at_least(r, c, dim);
        }
    }

    /// Tests the matrix against a 9-character DE-9IM pattern such as
    /// `"T*F**FFF*"`.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not 9 characters of `T F * 0 1 2`.
    pub fn matches(&self, pattern: &str) -> bool {
        let chars: Vec<char> = pattern.chars().collect();
        assert_eq!(chars.len(), 9, "DE-9IM pattern must have 9 characters");
        for row in 0..3 {
            for col in 0..3 {
                if !self.dims[row][col].matches(chars[row * 3 + col]) {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if the two geometries have no intersection at all.
    pub fn is_disjoint(&self) -> bool {
        self.matches("FF*FF****")
    }

    /// Returns `true` if the two geometries intersect in any way.
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.dims {
            for d in row {
                write!(f, "{}", d.symbol())?;
            }
        }
        Ok(())
    }
}

use core::fmt;

/// A grid coordinate addressed as `(row, col)`, both 0-indexed.
///
/// Coordinates are signed so that neighbour offsets can step off the grid;
/// [GridModel](crate::GridModel) bounds-checks every query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Absolute row and column differences to `other`.
    pub fn delta(&self, other: &Cell) -> (u32, u32) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// True if moving from `self` to `other` changes both row and column.
    pub fn is_diagonal_to(&self, other: &Cell) -> bool {
        self.row != other.row && self.col != other.col
    }

    /// Number of king moves between the two cells.
    pub fn move_distance(&self, other: &Cell) -> u32 {
        let (dr, dc) = self.delta(other);
        dr.max(dc)
    }

    /// The cell at offset `(dr, dc)`, or [None] if a coordinate would overflow.
    pub fn checked_offset(&self, (dr, dc): (i32, i32)) -> Option<Cell> {
        Some(Cell::new(self.row.checked_add(dr)?, self.col.checked_add(dc)?))
    }
}


impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

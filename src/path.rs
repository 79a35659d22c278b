use crate::cell::Cell;
use crate::grid_model::GridModel;
use crate::{DIAGONAL_COST, ORTHOGONAL_COST};
use itertools::Itertools;

/// Cost of a single move between two adjacent cells.
pub fn step_cost(from: &Cell, to: &Cell) -> f64 {
    if from.is_diagonal_to(to) {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Sum of the step costs along a sequence of cells.
pub fn path_cost(cells: &[Cell]) -> f64 {
    cells
        .iter()
        .tuple_windows()
        .map(|(a, b)| step_cost(a, b))
        .sum()
}

/// A path found by the search, ordered from start to goal with both endpoints included.
///
/// A path never holds zero cells: when start and goal coincide it is the single start cell.
/// "No path" is reported separately by [SearchOutcome](crate::SearchOutcome).
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<Cell>,
    cost: f64,
}

impl Path {
    /// Wraps a start-to-goal sequence and computes its cost. Returns [None] for an empty
    /// sequence.
    pub fn from_cells(cells: Vec<Cell>) -> Option<Path> {
        if cells.is_empty() {
            return None;
        }
        let cost = path_cost(&cells);
        Some(Path { cells, cost })
    }

    pub(crate) fn with_cost(cells: Vec<Cell>, cost: f64) -> Path {
        debug_assert!(!cells.is_empty());
        Path { cells, cost }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves.
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// True when start and goal are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Accumulated g-cost at the goal.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The cells strictly between start and goal, in start-to-goal order.
    pub fn interior(&self) -> &[Cell] {
        if self.cells.len() <= 2 {
            &[]
        } else {
            &self.cells[1..self.cells.len() - 1]
        }
    }

    /// Checks that every consecutive pair of cells is a legal move on `grid`.
    pub fn is_valid_on(&self, grid: &GridModel) -> bool {
        self.cells.iter().all(|&c| grid.is_passable(c))
            && self
                .cells
                .iter()
                .tuple_windows()
                .all(|(&a, &b)| grid.is_valid_step(a, b))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

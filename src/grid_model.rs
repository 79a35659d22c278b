use crate::cell::Cell;
use crate::error::GridError;
use crate::path::Path;
use crate::{DIAGONAL_COST, N_SMALLVEC_SIZE, ORTHOGONAL_COST};
use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// Neighbour offsets in expansion order: N, W, E, S.
const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
/// Neighbour offsets in expansion order: NW, NE, SW, SE.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub type Neighbours = SmallVec<[Cell; N_SMALLVEC_SIZE]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Passable,
    Blocked,
}

impl Occupancy {
    pub fn is_blocked(self) -> bool {
        self == Occupancy::Blocked
    }
}

impl From<bool> for Occupancy {
    /// `true` means blocked, matching the raw grid values.
    fn from(blocked: bool) -> Occupancy {
        if blocked {
            Occupancy::Blocked
        } else {
            Occupancy::Passable
        }
    }
}

/// [GridModel] stores the occupancy of a fixed-size grid as raw [bool] values that determine
/// whether a cell is blocked ([true]) or passable ([false]), row-major. In addition it maintains
/// connected components using a [UnionFind] structure so that reachability can be answered
/// without searching.
///
/// The model is never mutated by a search, so a `&GridModel` can be shared between threads that
/// each run their own search.
#[derive(Clone, Debug)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    allow_diagonal_move: bool,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl GridModel {
    /// Creates a `rows` x `cols` grid with every cell passable. Each side must be addressable by
    /// an `i32` coordinate and the cell count must fit a `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<GridModel, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let max_side = i32::MAX as usize;
        let len = rows
            .checked_mul(cols)
            .filter(|_| rows <= max_side && cols <= max_side)
            .ok_or(GridError::TooLarge { rows, cols })?;
        let mut grid = GridModel {
            rows,
            cols,
            blocked: vec![false; len],
            allow_diagonal_move: true,
            components: UnionFind::new(len),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Creates an N x N grid with every cell passable.
    pub fn square(n: usize) -> Result<GridModel, GridError> {
        GridModel::new(n, n)
    }

    /// Builds a grid from rows of raw values, `true` marking a blocked cell.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<GridModel, GridError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut grid = GridModel::new(rows.len(), cols)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            let offset = row * cols;
            grid.blocked[offset..offset + cols].copy_from_slice(values);
        }
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn allow_diagonal_move(&self) -> bool {
        self.allow_diagonal_move
    }

    /// Switches between 8-connectivity (default) and 4-connectivity. Components are flagged
    /// dirty as connectivity changes what is reachable.
    pub fn set_allow_diagonal_move(&mut self, allow: bool) {
        if self.allow_diagonal_move != allow {
            self.allow_diagonal_move = allow;
            self.components_dirty = true;
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.row as usize * self.cols + cell.col as usize)
        } else {
            None
        }
    }

    /// Inverse of [index](Self::index). The index must be smaller than [len](Self::len).
    pub fn cell_at(&self, ix: usize) -> Cell {
        debug_assert!(ix < self.len());
        Cell::new((ix / self.cols) as i32, (ix % self.cols) as i32)
    }

    pub fn occupancy(&self, cell: Cell) -> Option<Occupancy> {
        self.index(cell).map(|ix| Occupancy::from(self.blocked[ix]))
    }

    /// False if the cell is outside the grid or blocked.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|ix| !self.blocked[ix])
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple. Out-of-bounds cells are rejected.
    pub fn set_occupancy(&mut self, cell: Cell, state: Occupancy) -> Result<(), GridError> {
        let ix = self.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            rows: self.rows,
            cols: self.cols,
        })?;
        let blocked = state.is_blocked();
        if blocked {
            if !self.blocked[ix] {
                self.components_dirty = true;
            }
        } else {
            // The neighbourhood of a cell does not depend on the cell itself.
            for n in self.neighbours(cell) {
                if let Some(n_ix) = self.index(n) {
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.blocked[ix] = blocked;
        Ok(())
    }

    /// Sets every in-bounds cell of the rectangle with the given top-left corner and size.
    pub fn set_rect(&mut self, top_left: Cell, height: usize, width: usize, state: Occupancy) {
        let rows = clip_span(top_left.row, height, self.rows);
        let cols = clip_span(top_left.col, width, self.cols);
        for row in rows {
            for col in cols.clone() {
                // Clipped to the grid, so this cannot fail.
                let _ = self.set_occupancy(Cell::new(row, col), state);
            }
        }
    }

    /// Iterates over all passable cells in row-major order.
    pub fn passable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, &b)| !b)
            .map(move |(ix, _)| self.cell_at(ix))
    }

    /// Valid moves out of `cell`, in the order N, W, E, S, NW, NE, SW, SE.
    ///
    /// An orthogonal neighbour is valid if it is passable. A diagonal neighbour is valid only if
    /// it and both orthogonal cells flanking the move are passable, so paths never cut a corner.
    pub fn neighbours(&self, cell: Cell) -> Neighbours {
        let mut out = Neighbours::new();
        if !self.in_bounds(cell) {
            return out;
        }
        let passable = |offset: (i32, i32)| {
            cell.checked_offset(offset)
                .filter(|&n| self.is_passable(n))
        };
        out.extend(ORTHOGONAL_OFFSETS.into_iter().filter_map(passable));
        if self.allow_diagonal_move {
            for (dr, dc) in DIAGONAL_OFFSETS {
                if passable((dr, 0)).is_some() && passable((0, dc)).is_some() {
                    out.extend(passable((dr, dc)));
                }
            }
        }
        out
    }

    /// Same as [neighbours](Self::neighbours) with the cost of moving there.
    pub fn neighbours_and_cost(&self, cell: Cell) -> SmallVec<[(Cell, f64); N_SMALLVEC_SIZE]> {
        self.neighbours(cell)
            .into_iter()
            .map(|n| {
                let cost = if cell.is_diagonal_to(&n) {
                    DIAGONAL_COST
                } else {
                    ORTHOGONAL_COST
                };
                (n, cost)
            })
            .collect()
    }

    /// Checks whether `to` can be reached from `from` in a single move.
    pub fn is_valid_step(&self, from: Cell, to: Cell) -> bool {
        self.neighbours(from).contains(&to)
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: Cell) -> Option<usize> {
        self.index(cell).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are passable and on the same component. Regenerates the
    /// components first if they are dirty.
    pub fn reachable(&mut self, start: Cell, goal: Cell) -> bool {
        self.update();
        !self.unreachable(start, goal)
    }

    fn unreachable(&self, start: Cell, goal: Cell) -> bool {
        if !self.is_passable(start) || !self.is_passable(goal) {
            return true;
        }
        match (self.index(start), self.index(goal)) {
            (Some(s), Some(g)) => !self.components.equiv(s, g),
            _ => true,
        }
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.len());
        for ix in 0..self.len() {
            if self.blocked[ix] {
                continue;
            }
            let cell = self.cell_at(ix);
            for n in self.neighbours(cell) {
                if let Some(n_ix) = self.index(n) {
                    components.union(ix, n_ix);
                }
            }
        }
        self.components = components;
        self.components_dirty = false;
    }

    /// Renders the grid with the path drawn over it: `S` and `G` for the endpoints and `*` for
    /// the cells in between.
    pub fn render_path(&self, path: &Path) -> String {
        let mut canvas: Vec<Vec<char>> = (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| if self.blocked[r * self.cols + c] { '#' } else { '.' })
                    .collect()
            })
            .collect();
        let mut mark = |cell: Cell, ch: char| {
            if self.in_bounds(cell) {
                canvas[cell.row as usize][cell.col as usize] = ch;
            }
        };
        for &cell in path.interior() {
            mark(cell, '*');
        }
        mark(path.start(), 'S');
        mark(path.goal(), 'G');
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for line in canvas {
            out.extend(line);
            out.push('\n');
        }
        out
    }
}

/// Intersects `[start, start + len)` with `[0, limit)`.
fn clip_span(start: i32, len: usize, limit: usize) -> std::ops::Range<i32> {
    let start = i64::from(start);
    let end = start.saturating_add(i64::try_from(len).unwrap_or(i64::MAX));
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    // Both bounds lie in [0, limit] and the grid side fits an i32.
    let lo = start.clamp(0, limit) as i32;
    let hi = end.clamp(0, limit) as i32;
    lo..hi
}

/// Parses an ASCII map into a grid and the markers found on it. Blank lines and surrounding
/// whitespace are ignored.
pub(crate) fn parse_map(s: &str) -> Result<(GridModel, Vec<(char, Cell)>), GridError> {
    let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut rows = Vec::with_capacity(lines.len());
    let mut markers = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let mut values = Vec::with_capacity(line.len());
        for (col, ch) in line.chars().enumerate() {
            let blocked = match ch {
                '.' => false,
                'S' | 'G' => {
                    markers.push((ch, Cell::new(row as i32, col as i32)));
                    false
                }
                '#' | '@' | 'T' | 'O' | 'W' => true,
                _ => return Err(GridError::InvalidChar { ch, row, col }),
            };
            values.push(blocked);
        }
        rows.push(values);
    }
    Ok((GridModel::from_rows(rows)?, markers))
}

impl FromStr for GridModel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<GridModel, GridError> {
        parse_map(s).map(|(grid, _)| grid)
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.blocked.chunks(self.cols) {
            let line: String = row.iter().map(|&b| if b { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|&p| Cell::from(p)).collect()
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(GridModel::new(0, 3).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(GridModel::from_rows(vec![]).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = GridModel::from_rows(vec![vec![false, false], vec![false]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn passability_is_bounds_checked() {
        let mut grid = GridModel::square(3).unwrap();
        grid.set_occupancy(Cell::new(1, 2), Occupancy::Blocked).unwrap();
        assert!(grid.is_passable(Cell::new(0, 0)));
        assert!(!grid.is_passable(Cell::new(1, 2)));
        assert!(!grid.is_passable(Cell::new(-1, 0)));
        assert!(!grid.is_passable(Cell::new(0, 3)));
        assert_eq!(grid.occupancy(Cell::new(3, 0)), None);
    }

    #[test]
    fn set_occupancy_out_of_bounds_fails() {
        let mut grid = GridModel::new(2, 4).unwrap();
        let err = grid
            .set_occupancy(Cell::new(2, 0), Occupancy::Blocked)
            .unwrap_err();
        assert_eq!(err.code(), "OUT_OF_BOUNDS");
        assert_eq!(grid.passable_cells().count(), 8);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert_eq!(
            GridModel::new(usize::MAX, 2).unwrap_err(),
            GridError::TooLarge {
                rows: usize::MAX,
                cols: 2
            }
        );
        let too_wide = i32::MAX as usize + 1;
        assert_eq!(
            GridModel::new(1, too_wide).unwrap_err().code(),
            "TOO_LARGE"
        );
    }

    #[test]
    fn extreme_cells_have_no_neighbours() {
        let mut grid = GridModel::square(4).unwrap();
        for cell in [
            Cell::new(i32::MAX, 0),
            Cell::new(0, i32::MIN),
            Cell::new(i32::MIN, i32::MAX),
            Cell::new(-1, 0),
        ] {
            assert!(grid.neighbours(cell).is_empty());
            assert!(!grid.is_valid_step(cell, Cell::new(0, 0)));
        }
        grid.set_allow_diagonal_move(false);
        assert!(grid.neighbours(Cell::new(i32::MAX, i32::MAX)).is_empty());
    }

    #[test]
    fn set_rect_clips_to_grid() {
        let mut grid = GridModel::square(4).unwrap();
        grid.set_rect(Cell::new(i32::MAX - 1, 0), 4, 1, Occupancy::Blocked);
        grid.set_rect(Cell::new(0, i32::MAX), usize::MAX, usize::MAX, Occupancy::Blocked);
        assert_eq!(grid.passable_cells().count(), 16);
        // Starts above the grid and runs past its right edge.
        grid.set_rect(Cell::new(-2, 2), 3, usize::MAX, Occupancy::Blocked);
        assert_eq!(
            grid.passable_cells().count(),
            14,
            "only (0, 2) and (0, 3) are covered"
        );
        assert!(!grid.is_passable(Cell::new(0, 3)));
        grid.set_rect(Cell::new(i32::MIN, i32::MIN), usize::MAX, usize::MAX, Occupancy::Passable);
        assert_eq!(grid.passable_cells().count(), 16);
    }

    #[test]
    fn neighbour_order_on_open_grid() {
        let grid = GridModel::square(3).unwrap();
        let n = grid.neighbours(Cell::new(1, 1));
        assert_eq!(
            n.to_vec(),
            cells(&[
                (0, 1),
                (1, 0),
                (1, 2),
                (2, 1),
                (0, 0),
                (0, 2),
                (2, 0),
                (2, 2)
            ])
        );
        // Corner cell only has three moves.
        assert_eq!(
            grid.neighbours(Cell::new(0, 0)).to_vec(),
            cells(&[(0, 1), (1, 0), (1, 1)])
        );
    }

    #[test]
    fn diagonal_needs_both_flanks() {
        // .#
        // ..
        let grid: GridModel = ".#\n..".parse().unwrap();
        let n = grid.neighbours(Cell::new(1, 0));
        // NE of (1, 0) is (0, 1) which is blocked anyway; from (0, 0) the SE move is flanked
        // by the blocked (0, 1).
        assert_eq!(n.to_vec(), cells(&[(0, 0), (1, 1)]));
        assert!(!grid.is_valid_step(Cell::new(0, 0), Cell::new(1, 1)));
        assert!(grid.is_valid_step(Cell::new(0, 0), Cell::new(1, 0)));
    }

    #[test]
    fn four_connectivity_drops_diagonals() {
        let mut grid = GridModel::square(3).unwrap();
        grid.set_allow_diagonal_move(false);
        assert_eq!(grid.neighbours(Cell::new(1, 1)).len(), 4);
        let costs = grid.neighbours_and_cost(Cell::new(1, 1));
        assert!(costs.iter().all(|&(_, c)| c == ORTHOGONAL_COST));
    }

    #[test]
    fn diagonal_moves_cost_sqrt_two() {
        let grid = GridModel::square(2).unwrap();
        let costs = grid.neighbours_and_cost(Cell::new(0, 0));
        assert_eq!(costs[2], (Cell::new(1, 1), DIAGONAL_COST));
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // .#.
        // .#.
        let grid: GridModel = ".#.\n.#.".parse().unwrap();
        let c = |r, c| grid.get_component(Cell::new(r, c)).unwrap();
        assert_eq!(c(0, 0), c(1, 0));
        assert_ne!(c(0, 0), c(0, 2));
        assert_eq!(c(0, 2), c(1, 2));
    }

    #[test]
    fn reachable_without_diagonals() {
        // S..
        // .#.
        // ..G
        let mut grid = GridModel::square(3).unwrap();
        grid.set_allow_diagonal_move(false);
        grid.set_occupancy(Cell::new(1, 1), Occupancy::Blocked)
            .unwrap();
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(2, 2)));
    }

    // Tests whether corner-cutting prevention separates a diagonal pair in a minimal setting.
    #[test]
    fn test_diagonal_gap_unreachable() {
        // .#
        // #.
        let mut grid: GridModel = ".#\n#.".parse().unwrap();
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(1, 1)));
        grid.set_occupancy(Cell::new(0, 1), Occupancy::Passable)
            .unwrap();
        assert!(!grid.components_dirty());
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(1, 1)));
    }

    #[test]
    fn blocking_marks_components_dirty() {
        let mut grid: GridModel = "...\n...\n...".parse().unwrap();
        grid.set_rect(Cell::new(0, 1), 3, 1, Occupancy::Blocked);
        assert!(grid.components_dirty());
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(!grid.components_dirty());
        assert!(!grid.reachable(Cell::new(0, 0), Cell::new(0, 1)));
    }

    #[test]
    fn parse_and_display() {
        let grid: GridModel = "\n  .#..\n  S..G\n".parse().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 4));
        assert_eq!(grid.to_string(), ".#..\n....\n");
        let err = "..x".parse::<GridModel>().unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidChar {
                ch: 'x',
                row: 0,
                col: 2
            }
        );
    }

    #[test]
    fn render_path_marks_cells() {
        let grid = GridModel::new(1, 4).unwrap();
        let path = Path::from_cells(cells(&[(0, 0), (0, 1), (0, 2), (0, 3)])).unwrap();
        assert_eq!(grid.render_path(&path), "S**G\n");
    }
}

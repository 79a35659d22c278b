//! # grid_astar
//!
//! Weighted [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on occupancy grids.
//! Cells are either passable or blocked; movement is 8-directional by default (4-directional
//! on request) with orthogonal moves costing 1 and diagonal moves costing sqrt(2). A diagonal
//! move is only allowed if both orthogonal cells it passes between are passable, so paths never
//! cut corners.
//!
//! The heuristic is chosen from [Heuristic] (euclidean, manhattan, chebyshev, octile) or supplied
//! as any `Fn(Cell, Cell, f64) -> f64`, and is scaled by a weight. A weight of 1 with an
//! admissible heuristic gives optimal paths, 0 gives uniform-cost search and anything else
//! trades optimality for a different exploration order.
//!
//! ```
//! use grid_astar::{heuristic, solve, Cell, GridModel};
//!
//! let grid: GridModel = "
//!     ....
//!     .##.
//!     ....
//! "
//! .parse()
//! .unwrap();
//! let outcome = solve(&grid, Cell::new(0, 0), Cell::new(2, 3), heuristic::octile, 1.0).unwrap();
//! let path = outcome.path().unwrap();
//! assert_eq!(path.start(), Cell::new(0, 0));
//! assert_eq!(path.goal(), Cell::new(2, 3));
//! ```
//!
//! Connected components are maintained on the grid to answer reachability without searching,
//! see [GridModel::reachable].
mod astar;
pub mod cell;
pub mod error;
pub mod grid_model;
pub mod heuristic;
pub mod path;
pub mod scenario;
pub mod solver;

pub use cell::Cell;
pub use error::{GridError, HeuristicError, SearchError};
pub use grid_model::{GridModel, Occupancy};
pub use heuristic::{Heuristic, HeuristicFn};
pub use path::Path;
pub use scenario::Scenario;
pub use solver::{solve, PathFinder, SearchConfig, SearchOutcome, SearchStats};

/// Cost of a move along a row or column.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Inline capacity of neighbour lists; a cell has at most 8 neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;

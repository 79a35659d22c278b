//! Error types for grid construction, heuristic lookup and search.

use std::fmt;
use std::time::Duration;

use crate::cell::Cell;

/// Errors raised while building or editing a [GridModel](crate::GridModel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    EmptyGrid,

    /// A side exceeds the `i32` coordinate range or the cell count overflows `usize`.
    TooLarge { rows: usize, cols: usize },

    /// A row of the input does not have as many columns as the first row.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The cell lies outside the grid.
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    /// Character in an ASCII map that is neither terrain nor a marker.
    InvalidChar { ch: char, row: usize, col: usize },

    /// A scenario map lacks its start (`S`) or goal (`G`) marker.
    MissingMarker(char),

    /// A scenario map contains a marker more than once.
    DuplicateMarker(char),
}

impl GridError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyGrid => "EMPTY_GRID",
            Self::TooLarge { .. } => "TOO_LARGE",
            Self::RaggedRows { .. } => "RAGGED_ROWS",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::InvalidChar { .. } => "INVALID_CHAR",
            Self::MissingMarker(_) => "MISSING_MARKER",
            Self::DuplicateMarker(_) => "DUPLICATE_MARKER",
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            Self::TooLarge { rows, cols } => write!(f, "a {}x{} grid is too large", rows, cols),
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected
            ),
            Self::OutOfBounds { cell, rows, cols } => {
                write!(f, "cell {} is outside the {}x{} grid", cell, rows, cols)
            }
            Self::InvalidChar { ch, row, col } => {
                write!(f, "invalid map character {:?} at row {}, col {}", ch, row, col)
            }
            Self::MissingMarker(m) => write!(f, "map has no '{}' marker", m),
            Self::DuplicateMarker(m) => write!(f, "map has more than one '{}' marker", m),
        }
    }
}

impl std::error::Error for GridError {}

/// Returned when a heuristic name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicError {
    Unknown(String),
}

impl fmt::Display for HeuristicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(
                f,
                "unknown heuristic {:?} (expected euclidean, manhattan, chebyshev or octile)",
                name
            ),
        }
    }
}

impl std::error::Error for HeuristicError {}

/// Reasons a search did not run or was cut short.
///
/// Running out of frontier is not an error; it is reported as
/// [SearchOutcome::Exhausted](crate::SearchOutcome::Exhausted).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    StartOutOfBounds(Cell),
    GoalOutOfBounds(Cell),
    StartBlocked(Cell),
    GoalBlocked(Cell),

    /// The configured expansion budget ran out before the goal was closed.
    ExpansionLimit { limit: usize },

    /// The configured wall-clock limit elapsed.
    TimedOut { elapsed: Duration },
}

impl SearchError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StartOutOfBounds(_) => "START_OUT_OF_BOUNDS",
            Self::GoalOutOfBounds(_) => "GOAL_OUT_OF_BOUNDS",
            Self::StartBlocked(_) => "START_BLOCKED",
            Self::GoalBlocked(_) => "GOAL_BLOCKED",
            Self::ExpansionLimit { .. } => "EXPANSION_LIMIT",
            Self::TimedOut { .. } => "TIMED_OUT",
        }
    }

    /// True for the invalid-endpoint family: nothing was searched.
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(
            self,
            Self::StartOutOfBounds(_)
                | Self::GoalOutOfBounds(_)
                | Self::StartBlocked(_)
                | Self::GoalBlocked(_)
        )
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds(c) => write!(f, "start {} is out of bounds", c),
            Self::GoalOutOfBounds(c) => write!(f, "goal {} is out of bounds", c),
            Self::StartBlocked(c) => write!(f, "start {} is blocked", c),
            Self::GoalBlocked(c) => write!(f, "goal {} is blocked", c),
            Self::ExpansionLimit { limit } => {
                write!(f, "search gave up after expanding {} cells", limit)
            }
            Self::TimedOut { elapsed } => {
                write!(f, "search timed out after {:.3}s", elapsed.as_secs_f64())
            }
        }
    }
}

impl std::error::Error for SearchError {}

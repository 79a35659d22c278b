use crate::astar::{astar, SearchLimits};
use crate::cell::Cell;
use crate::error::SearchError;
use crate::grid_model::GridModel;
use crate::heuristic::Heuristic;
use crate::path::Path;
use std::time::Duration;

/// Counters collected during a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells closed, the goal included.
    pub expanded: usize,
    /// Frontier insertions, duplicates included.
    pub pushed: usize,
    /// Largest frontier length observed after an expansion.
    pub max_frontier: usize,
}

/// Result of a search that ran.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The goal was closed; the path runs from start to goal inclusive.
    Found { path: Path, stats: SearchStats },
    /// The frontier ran empty before the goal was reached.
    Exhausted { stats: SearchStats },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found { stats, .. } | SearchOutcome::Exhausted { stats } => *stats,
        }
    }
}

/// Settings for a [PathFinder].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    /// Multiplier passed to the heuristic. Any real number is accepted.
    pub weight: f64,
    /// 8-connectivity when true, 4-connectivity otherwise. Applied to a grid with
    /// [apply_to](Self::apply_to).
    pub allow_diagonal_move: bool,
    /// Give up after closing this many cells.
    pub max_expansions: Option<usize>,
    /// Give up once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            weight: 1.0,
            allow_diagonal_move: true,
            max_expansions: None,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Sets the grid connectivity to the configured value.
    pub fn apply_to(&self, grid: &mut GridModel) {
        grid.set_allow_diagonal_move(self.allow_diagonal_move);
    }
}

fn validate_endpoints(grid: &GridModel, start: Cell, goal: Cell) -> Result<(), SearchError> {
    if !grid.in_bounds(start) {
        return Err(SearchError::StartOutOfBounds(start));
    }
    if !grid.in_bounds(goal) {
        return Err(SearchError::GoalOutOfBounds(goal));
    }
    if !grid.is_passable(start) {
        return Err(SearchError::StartBlocked(start));
    }
    if !grid.is_passable(goal) {
        return Err(SearchError::GoalBlocked(goal));
    }
    Ok(())
}

/// Finds a path from `start` to `goal` on `grid` with weighted A*.
///
/// `heuristic` is called as `heuristic(cell, goal, weight)`; any of the functions in
/// [heuristic](crate::heuristic) fits, as does a closure. Endpoints that are out of bounds or
/// blocked are rejected before searching. Running out of frontier yields
/// [SearchOutcome::Exhausted].
pub fn solve<H>(
    grid: &GridModel,
    start: Cell,
    goal: Cell,
    heuristic: H,
    weight: f64,
) -> Result<SearchOutcome, SearchError>
where
    H: Fn(Cell, Cell, f64) -> f64,
{
    validate_endpoints(grid, start, goal)?;
    astar(grid, start, goal, heuristic, weight, SearchLimits::default())
}

/// A configured weighted A* solver. It holds no search state, so one instance can serve any
/// number of grids and threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PathFinder {
    pub heuristic: Heuristic,
    pub weight: f64,
    limits: SearchLimits,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder::new()
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder {
            heuristic: Heuristic::Euclidean,
            weight: 1.0,
            limits: SearchLimits::default(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> PathFinder {
        PathFinder {
            heuristic: config.heuristic,
            weight: config.weight,
            limits: SearchLimits {
                max_expansions: config.max_expansions,
                time_limit: config.time_limit,
            },
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> PathFinder {
        self.heuristic = heuristic;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> PathFinder {
        self.weight = weight;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> PathFinder {
        self.limits.max_expansions = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> PathFinder {
        self.limits.time_limit = Some(limit);
        self
    }

    /// Searches with the configured heuristic and weight.
    pub fn find_path(
        &self,
        grid: &GridModel,
        start: Cell,
        goal: Cell,
    ) -> Result<SearchOutcome, SearchError> {
        self.find_path_with(grid, start, goal, self.heuristic.function())
    }

    /// Searches with a caller-supplied heuristic, keeping the configured weight and limits.
    pub fn find_path_with<H>(
        &self,
        grid: &GridModel,
        start: Cell,
        goal: Cell,
        heuristic: H,
    ) -> Result<SearchOutcome, SearchError>
    where
        H: Fn(Cell, Cell, f64) -> f64,
    {
        validate_endpoints(grid, start, goal)?;
        astar(grid, start, goal, heuristic, self.weight, self.limits)
    }
}

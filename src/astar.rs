//! This module implements the weighted A* search over a [GridModel]. The node table is allocated
//! per call and indexed 1:1 with the grid cells, so concurrent searches over the same grid never
//! share mutable state.
use crate::cell::Cell;
use crate::error::SearchError;
use crate::grid_model::GridModel;
use crate::path::Path;
use crate::solver::{SearchOutcome, SearchStats};

use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Optional bounds on a single search, checked once per main-loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

/// Per-cell search state.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    g: f64,
    f: f64,
    parent: Option<usize>,
    closed: bool,
}

impl Default for SearchNode {
    fn default() -> SearchNode {
        SearchNode {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            closed: false,
        }
    }
}

/// Frontier entry. A cell may be pushed several times; only the first pop of a cell that is not
/// yet closed counts, later ones are stale and skipped.
struct SmallestCostHolder {
    estimated_cost: f64,
    cost: f64,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of the deepest nodes first.
        // The cell index settles whatever is left so runs are reproducible.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.total_cmp(&other.cost) {
                Ordering::Equal => other.index.cmp(&self.index),
                s => s,
            },
            s => s,
        }
    }
}

fn reverse_path(grid: &GridModel, nodes: &[SearchNode], goal: usize) -> Vec<Cell> {
    let mut path: Vec<Cell> = std::iter::successors(Some(goal), |&ix| nodes[ix].parent)
        .map(|ix| grid.cell_at(ix))
        .collect();
    path.reverse();
    path
}

/// Runs A* from `start` to `goal`. Both endpoints must already be known to be in bounds and
/// passable.
///
/// The start entry enters the frontier with an f-cost of 0.0 rather than its heuristic value.
/// A neighbour is relaxed only when its new f-cost is strictly lower than the stored one.
pub(crate) fn astar<H>(
    grid: &GridModel,
    start: Cell,
    goal: Cell,
    heuristic: H,
    weight: f64,
    limits: SearchLimits,
) -> Result<SearchOutcome, SearchError>
where
    H: Fn(Cell, Cell, f64) -> f64,
{
    let start_ix = grid.index(start).ok_or(SearchError::StartOutOfBounds(start))?;
    let goal_ix = grid.index(goal).ok_or(SearchError::GoalOutOfBounds(goal))?;
    debug!("Searching from {} to {} with weight {}", start, goal, weight);

    let started = Instant::now();
    let mut stats = SearchStats::default();
    let mut nodes = vec![SearchNode::default(); grid.len()];
    nodes[start_ix].g = 0.0;
    nodes[start_ix].f = 0.0;

    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: 0.0,
        cost: 0.0,
        index: start_ix,
    });
    stats.pushed = 1;
    stats.max_frontier = 1;

    while let Some(SmallestCostHolder { index, .. }) = to_see.pop() {
        if nodes[index].closed {
            continue;
        }
        if let Some(limit) = limits.max_expansions {
            if stats.expanded >= limit {
                warn!("Search from {} to {} hit the expansion limit of {}", start, goal, limit);
                return Err(SearchError::ExpansionLimit { limit });
            }
        }
        if let Some(limit) = limits.time_limit {
            let elapsed = started.elapsed();
            if elapsed > limit {
                warn!("Search from {} to {} timed out after {:?}", start, goal, elapsed);
                return Err(SearchError::TimedOut { elapsed });
            }
        }

        nodes[index].closed = true;
        stats.expanded += 1;
        let g = nodes[index].g;
        let current = grid.cell_at(index);
        trace!("Expanding {} (g = {:.3}, f = {:.3})", current, g, nodes[index].f);

        if index == goal_ix {
            let cells = reverse_path(grid, &nodes, goal_ix);
            debug!(
                "Found path of {} cells, cost {:.3}, after expanding {} cells",
                cells.len(),
                g,
                stats.expanded
            );
            return Ok(SearchOutcome::Found {
                path: Path::with_cost(cells, g),
                stats,
            });
        }

        for (successor, move_cost) in grid.neighbours_and_cost(current) {
            let Some(n) = grid.index(successor) else {
                continue;
            };
            let node = &mut nodes[n];
            if node.closed {
                continue;
            }
            let new_cost = g + move_cost;
            let estimated_cost = new_cost + heuristic(successor, goal, weight);
            if estimated_cost < node.f {
                node.parent = Some(index);
                node.g = new_cost;
                node.f = estimated_cost;
                to_see.push(SmallestCostHolder {
                    estimated_cost,
                    cost: new_cost,
                    index: n,
                });
                stats.pushed += 1;
            }
        }
        stats.max_frontier = stats.max_frontier.max(to_see.len());
    }
    debug!(
        "No path from {} to {}: frontier exhausted after expanding {} cells",
        start, goal, stats.expanded
    );
    Ok(SearchOutcome::Exhausted { stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{euclidean, manhattan};

    fn holder(estimated_cost: f64, cost: f64, index: usize) -> SmallestCostHolder {
        SmallestCostHolder {
            estimated_cost,
            cost,
            index,
        }
    }

    #[test]
    fn frontier_pops_lowest_estimate_then_deepest() {
        let mut heap = BinaryHeap::new();
        heap.push(holder(3.0, 1.0, 0));
        heap.push(holder(2.0, 0.5, 1));
        heap.push(holder(2.0, 1.5, 2));
        heap.push(holder(2.0, 1.5, 3));
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|h| h.index)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn start_equals_goal() {
        let grid = GridModel::square(3).unwrap();
        let c = Cell::new(1, 1);
        let outcome = astar(&grid, c, c, euclidean, 1.0, SearchLimits::default()).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.cells(), &[c]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(outcome.stats().expanded, 1);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // A greedy manhattan weight relaxes some cells twice; every cell is still expanded at
        // most once.
        let grid: GridModel = "
            .....
            .###.
            .....
        "
        .parse()
        .unwrap();
        let outcome = astar(
            &grid,
            Cell::new(0, 0),
            Cell::new(2, 4),
            manhattan,
            3.0,
            SearchLimits::default(),
        )
        .unwrap();
        let stats = outcome.stats();
        assert!(stats.expanded <= grid.passable_cells().count());
        assert!(stats.pushed >= stats.expanded);
        assert!(outcome.path().unwrap().is_valid_on(&grid));
    }

    #[test]
    fn expansion_limit_stops_search() {
        let grid = GridModel::square(10).unwrap();
        let limits = SearchLimits {
            max_expansions: Some(3),
            time_limit: None,
        };
        let err = astar(&grid, Cell::new(0, 0), Cell::new(9, 9), euclidean, 0.0, limits)
            .unwrap_err();
        assert_eq!(err, SearchError::ExpansionLimit { limit: 3 });
    }
}

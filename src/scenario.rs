use crate::cell::Cell;
use crate::error::{GridError, SearchError};
use crate::grid_model::{parse_map, GridModel};
use crate::solver::{PathFinder, SearchOutcome};
use std::str::FromStr;

/// A grid together with a start and goal, read from an ASCII map that marks them with `S` and
/// `G`:
///
/// ```text
/// S..#
/// .#..
/// ...G
/// ```
#[derive(Clone, Debug)]
pub struct Scenario {
    pub grid: GridModel,
    pub start: Cell,
    pub goal: Cell,
}

impl Scenario {
    /// Runs `finder` on the scenario.
    pub fn solve(&self, finder: &PathFinder) -> Result<SearchOutcome, SearchError> {
        finder.find_path(&self.grid, self.start, self.goal)
    }

    /// Checks if the goal is on the same component as the start.
    pub fn reachable(&mut self) -> bool {
        self.grid.reachable(self.start, self.goal)
    }
}

fn single_marker(markers: &[(char, Cell)], marker: char) -> Result<Cell, GridError> {
    let mut found = markers.iter().filter(|(m, _)| *m == marker).map(|&(_, c)| c);
    let cell = found.next().ok_or(GridError::MissingMarker(marker))?;
    if found.next().is_some() {
        return Err(GridError::DuplicateMarker(marker));
    }
    Ok(cell)
}

impl FromStr for Scenario {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Scenario, GridError> {
        let (grid, markers) = parse_map(s)?;
        let start = single_marker(&markers, 'S')?;
        let goal = single_marker(&markers, 'G')?;
        Ok(Scenario { grid, start, goal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_markers() {
        let scenario: Scenario = "
            S..#
            .#..
            ...G
        "
        .parse()
        .unwrap();
        assert_eq!(scenario.start, Cell::new(0, 0));
        assert_eq!(scenario.goal, Cell::new(2, 3));
        assert!(scenario.grid.is_passable(scenario.goal));
        assert!(!scenario.grid.is_passable(Cell::new(0, 3)));
    }

    #[test]
    fn marker_errors() {
        assert_eq!(
            "S..\n...".parse::<Scenario>().unwrap_err(),
            GridError::MissingMarker('G')
        );
        assert_eq!(
            "S.G\nS..".parse::<Scenario>().unwrap_err(),
            GridError::DuplicateMarker('S')
        );
    }

    #[test]
    fn solve_and_reachable() {
        let mut scenario: Scenario = "
            S#.
            ##.
            ..G
        "
        .parse()
        .unwrap();
        assert!(!scenario.reachable());
        let outcome = scenario.solve(&PathFinder::new()).unwrap();
        assert!(!outcome.is_found());
    }
}

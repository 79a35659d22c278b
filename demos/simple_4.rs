use grid_astar::{Cell, GridModel, Heuristic, PathFinder};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Cells have a 4-neighbourhood, so manhattan distance is a consistent heuristic.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut grid: GridModel = "
        ...
        .#.
        ...
    "
    .parse()?;
    grid.set_allow_diagonal_move(false);
    println!("{}", grid);
    let finder = PathFinder::new().with_heuristic(Heuristic::Manhattan);
    let outcome = finder.find_path(&grid, Cell::new(0, 0), Cell::new(2, 2))?;
    if let Some(path) = outcome.path() {
        println!("Path:");
        for cell in path {
            println!("{}", cell);
        }
        println!("Interior cells: {:?}", path.interior());
    }
    Ok(())
}

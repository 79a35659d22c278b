use grid_astar::{Cell, GridModel, Occupancy, PathFinder};

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
// Cells have an 8-neighbourhood, but the diagonals around the obstacle would cut its corners, so
// the path goes around the edge.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut grid = GridModel::square(3)?;
    grid.set_occupancy(Cell::new(1, 1), Occupancy::Blocked)?;
    println!("{}", grid);
    let outcome = PathFinder::new().find_path(&grid, Cell::new(0, 0), Cell::new(2, 2))?;
    match outcome.path() {
        Some(path) => {
            println!("Path (cost {:.3}):", path.cost());
            for cell in path {
                println!("{}", cell);
            }
            print!("{}", grid.render_path(path));
        }
        None => println!("No path"),
    }
    println!("{:?}", outcome.stats());
    Ok(())
}

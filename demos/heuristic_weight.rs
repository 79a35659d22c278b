use grid_astar::{Cell, GridModel, Heuristic, Occupancy, PathFinder};

// The weight scales the heuristic. Values above 1 make cells that are closer to the goal (ignoring
// obstacles) get expanded sooner, which is called Weighted A*. It usually closes fewer cells at
// the price of possibly longer paths; a weight of 0 turns the search into uniform-cost search.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    const N: usize = 30;
    let mut grid = GridModel::square(N)?;
    grid.set_rect(Cell::new(8, 8), 8, 8, Occupancy::Blocked);
    grid.set_rect(Cell::new(0, 3), 6, 6, Occupancy::Blocked);
    grid.set_rect(Cell::new(10, 0), 6, 6, Occupancy::Blocked);
    grid.set_rect(Cell::new(20, 12), 2, 16, Occupancy::Blocked);
    println!("{}", grid);
    let start = Cell::new(1, 1);
    let goal = Cell::new(N as i32 - 3, N as i32 - 3);
    for heuristic in Heuristic::ALL {
        for weight in [0.0, 1.0, 1.3, 3.0] {
            let finder = PathFinder::new()
                .with_heuristic(heuristic)
                .with_weight(weight);
            let outcome = finder.find_path(&grid, start, goal)?;
            let stats = outcome.stats();
            match outcome.path() {
                Some(path) => println!(
                    "{heuristic:>9} x{weight:<3}: cost {:>7.3}, {} cells, {} expanded, {} pushed",
                    path.cost(),
                    path.len(),
                    stats.expanded,
                    stats.pushed
                ),
                None => println!("{heuristic:>9} x{weight:<3}: no path"),
            }
        }
    }
    let path = PathFinder::new()
        .with_heuristic(Heuristic::Octile)
        .with_weight(1.3)
        .find_path(&grid, start, goal)?
        .into_path();
    if let Some(path) = path {
        print!("{}", grid.render_path(&path));
    }
    Ok(())
}

use grid_astar::{PathFinder, Scenario, SearchConfig};
use std::env;

// Reads a map from the file given as the first argument, or uses a built-in one. `S` and `G` mark
// the start and goal, `.` is passable and `#`, `@`, `T`, `O`, `W` are obstacles. The second
// argument names the heuristic (euclidean, manhattan, chebyshev or octile) and the third the
// weight.
//
//     cargo run --example ascii_map -- map.txt octile 1.5

const DEFAULT_MAP: &str = "
    S.....#...........
    .####.#.#########.
    .#....#.#.......#.
    .#.####.#.#####.#.
    .#......#.#...#.#.
    .########.#.#.#.#.
    ..........#.#G#...
    ###########.###.##
    ..................
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut args = env::args().skip(1);
    let map = match args.next() {
        Some(file) => std::fs::read_to_string(file)?,
        None => DEFAULT_MAP.to_owned(),
    };
    let mut config = SearchConfig::default();
    if let Some(name) = args.next() {
        config.heuristic = name.parse()?;
    }
    if let Some(weight) = args.next() {
        config.weight = weight.parse()?;
    }

    let mut scenario: Scenario = map.parse()?;
    config.apply_to(&mut scenario.grid);
    let reachable = scenario.reachable();
    println!(
        "{}x{} map, start {}, goal {}, reachable: {}",
        scenario.grid.rows(),
        scenario.grid.cols(),
        scenario.start,
        scenario.goal,
        reachable
    );
    let outcome = scenario.solve(&PathFinder::from_config(&config))?;
    match outcome.path() {
        Some(path) => {
            print!("{}", scenario.grid.render_path(path));
            println!("cost {:.3} over {} steps", path.cost(), path.steps());
        }
        None => println!("no path"),
    }
    println!("{:?}", outcome.stats());
    Ok(())
}

use grid_util::grid::ValueGrid;
use unique_paths::{cell, OccupancyGrid, ShortestPathFinder};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood; diagonal moves cost √2.

fn main() {
    let mut grid = OccupancyGrid::new(3, 3, false);
    grid.set(1, 1, true);
    grid.update();
    println!("{}", grid);
    let start = cell(0, 0);
    let end = cell(2, 2);
    match ShortestPathFinder.find_path_with_cost(&grid, start, end) {
        Some((path, cost)) => {
            println!("Path with cost {:.3}:", cost);
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("No path from {} to {}", start, end),
    }
}

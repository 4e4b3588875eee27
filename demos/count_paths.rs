use unique_paths::{OccupancyGrid, PathCounter};

// In this example the monotone paths are counted on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the top-left start
// - E marks the bottom-right end
//
// Only right and down moves are allowed, leaving two paths.

fn main() {
    let grid: OccupancyGrid = "S..\n.#.\n..E".parse().unwrap();
    println!("{}", grid);
    let table = PathCounter.compute_table(&grid);
    println!("Table:\n{}", table);
    println!("Paths: {}", PathCounter.total_paths(&table));
    println!("One of them:");
    for p in PathCounter.sample_random_path_thread_rng(&table) {
        println!("{:?}", p);
    }
}

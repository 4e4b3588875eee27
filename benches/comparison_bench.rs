use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use unique_paths::{is_path_possible, Mode, OccupancyGrid, PathCounter, ShortestPathFinder};

const SIZES: [usize; 3] = [6, 12, 32];

fn random_grid(n: usize, rng: &mut StdRng) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(n, n, false);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            grid.set(x, y, rng.gen_bool(0.25));
        }
    }
    grid.set(0, 0, false);
    grid.set(n as i32 - 1, n as i32 - 1, false);
    grid.generate_components();
    grid
}

fn counting_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in SIZES {
        let grid = random_grid(n, &mut rng);
        c.bench_function(format!("{n}x{n}, compute_table").as_str(), |b| {
            b.iter(|| black_box(PathCounter.compute_table(&grid)))
        });
        let table = PathCounter.compute_table(&grid);
        c.bench_function(format!("{n}x{n}, sample_random_path").as_str(), |b| {
            b.iter(|| black_box(PathCounter.sample_random_path(&table, &mut rng)))
        });
    }
}

fn shortest_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in SIZES {
        let grid = random_grid(n, &mut rng);
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{n}x{n}, find_path").as_str(), |b| {
            b.iter(|| black_box(ShortestPathFinder.find_path(&grid, start, end)))
        });
    }
}

// Compares answering reachability from the components with a full search on dirty components.
fn possible_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in SIZES {
        let mut grid = random_grid(n, &mut rng);
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{n}x{n}, is_path_possible (components)").as_str(), |b| {
            b.iter(|| black_box(is_path_possible(&grid, start, end, Mode::ShortestPath)))
        });
        grid.components_dirty = true;
        c.bench_function(format!("{n}x{n}, is_path_possible (search)").as_str(), |b| {
            b.iter(|| black_box(is_path_possible(&grid, start, end, Mode::ShortestPath)))
        });
    }
}

criterion_group!(benches, counting_bench, shortest_bench, possible_bench);
criterion_main!(benches);

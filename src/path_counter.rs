use core::fmt;

use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::{debug, warn};
use rand::Rng;

use crate::occupancy_grid::OccupancyGrid;
use crate::Path;

/// Number of monotone (right/down) paths from the top-left corner to every cell.
///
/// A cell holds 0 if it is an obstacle or cannot be reached. Counts saturate at [u128::MAX].
#[derive(Clone, Debug)]
pub struct DpTable {
    pub counts: SimpleValueGrid<u128>,
}

impl Default for DpTable {
    fn default() -> DpTable {
        DpTable {
            counts: SimpleValueGrid::new(0, 0, 0),
        }
    }
}

impl DpTable {
    pub fn rows(&self) -> usize {
        self.counts.height()
    }

    pub fn cols(&self) -> usize {
        self.counts.width()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Count at `point`, 0 outside the table.
    pub fn value(&self, point: Point) -> u128 {
        if self.counts.point_in_bounds(point) {
            self.counts.get_point(point)
        } else {
            0
        }
    }

    /// Count at the given row and column, if inside the table.
    pub fn get(&self, row: usize, col: usize) -> Option<u128> {
        if row < self.rows() && col < self.cols() {
            Some(self.counts.get(col as i32, row as i32))
        } else {
            None
        }
    }

    /// The table as row-major nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<u128>> {
        (0..self.rows() as i32)
            .map(|y| {
                (0..self.cols() as i32)
                    .map(|x| self.counts.get(x, y))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for DpTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

/// Counts and samples monotone paths from the top-left to the bottom-right corner.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCounter;

impl PathCounter {
    /// Fills the [DpTable] for `grid`. Each free cell receives the sum of its upper and left
    /// neighbours, the origin receives 1 if it is free. A grid without rows or columns gives an
    /// empty table.
    pub fn compute_table(&self, grid: &OccupancyGrid) -> DpTable {
        let (w, h) = (grid.width(), grid.height());
        let mut counts: SimpleValueGrid<u128> = SimpleValueGrid::new(w, h, 0);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if grid.get(x, y) {
                    continue;
                }
                let value = if x == 0 && y == 0 {
                    1
                } else {
                    let up = if y > 0 { counts.get(x, y - 1) } else { 0 };
                    let left = if x > 0 { counts.get(x - 1, y) } else { 0 };
                    up.saturating_add(left)
                };
                counts.set(x, y, value);
            }
        }
        DpTable { counts }
    }

    /// Number of paths reaching the bottom-right corner, 0 for an empty table.
    pub fn total_paths(&self, table: &DpTable) -> u128 {
        if table.is_empty() {
            return 0;
        }
        table.value(Point::new(table.cols() as i32 - 1, table.rows() as i32 - 1))
    }

    /// Draws one monotone path from the top-left to the bottom-right corner.
    ///
    /// Walking back from the destination, the next cell is the upper or the left neighbour
    /// with probability proportional to its count, so every path is equally likely to be
    /// drawn. Returns an empty path if no path exists. Should the table contradict itself (a
    /// cell with a count but no counted predecessor) the walk stops there and the partial path
    /// is returned.
    ///
    /// Once counts saturate at [u128::MAX] a cell no longer holds the sum of its predecessors,
    /// and the choices made from saturated cells are no longer proportional to the true counts.
    /// The drawn path is still monotone and free.
    pub fn sample_random_path<R: Rng + ?Sized>(&self, table: &DpTable, rng: &mut R) -> Path {
        if self.total_paths(table) == 0 {
            return Vec::new();
        }
        let mut current = Point::new(table.cols() as i32 - 1, table.rows() as i32 - 1);
        let mut path = vec![current];
        while current.x > 0 || current.y > 0 {
            let up_point = Point::new(current.x, current.y - 1);
            let left_point = Point::new(current.x - 1, current.y);
            let up = table.value(up_point);
            let left = table.value(left_point);
            current = match (up > 0, left > 0) {
                (true, true) => {
                    let up_weight = up as f64 / (up as f64 + left as f64);
                    if rng.gen::<f64>() < up_weight {
                        up_point
                    } else {
                        left_point
                    }
                }
                (true, false) => up_point,
                (false, true) => left_point,
                (false, false) => {
                    warn!("No counted predecessor for {}, stopping early", current);
                    break;
                }
            };
            path.push(current);
        }
        path.reverse();
        debug!("Sampled a path of {} cells", path.len());
        path
    }

    /// [sample_random_path](Self::sample_random_path) with the thread-local generator, so that
    /// repeated calls reveal different paths.
    pub fn sample_random_path_thread_rng(&self, table: &DpTable) -> Path {
        self.sample_random_path(table, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cell;

    fn count(text: &str) -> u128 {
        let grid: OccupancyGrid = text.parse().unwrap();
        PathCounter.total_paths(&PathCounter.compute_table(&grid))
    }

    #[test]
    fn single_cell() {
        let free = PathCounter.compute_table(&".".parse::<OccupancyGrid>().unwrap());
        assert_eq!(free.to_rows(), vec![vec![1]]);
        assert_eq!(PathCounter.total_paths(&free), 1);
        let blocked = PathCounter.compute_table(&"#".parse::<OccupancyGrid>().unwrap());
        assert_eq!(blocked.to_rows(), vec![vec![0]]);
        assert_eq!(PathCounter.total_paths(&blocked), 0);
    }

    #[test]
    fn three_by_three() {
        assert_eq!(count("...\n...\n..."), 6);
        assert_eq!(count("...\n.#.\n..."), 2);
    }

    #[test]
    fn table_values() {
        let grid: OccupancyGrid = "...\n.#.\n...".parse().unwrap();
        let table = PathCounter.compute_table(&grid);
        assert_eq!(
            table.to_rows(),
            vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 2]]
        );
        assert_eq!(table.get(2, 2), Some(2));
        assert_eq!(table.get(3, 0), None);
        assert_eq!(table.to_string(), "[1, 1, 1]\n[1, 0, 1]\n[1, 1, 2]\n");
    }

    #[test]
    fn first_row_stops_at_obstacle() {
        let grid: OccupancyGrid = ".#..\n....".parse().unwrap();
        let table = PathCounter.compute_table(&grid);
        assert_eq!(table.to_rows(), vec![vec![1, 0, 0, 0], vec![1, 1, 1, 1]]);
    }

    #[test]
    fn blocked_corners() {
        assert_eq!(count("#..\n...\n..."), 0);
        assert_eq!(count("...\n...\n..#"), 0);
    }

    #[test]
    fn empty_grid() {
        let grid = OccupancyGrid::new(0, 0, false);
        let table = PathCounter.compute_table(&grid);
        assert!(table.is_empty());
        assert_eq!(PathCounter.total_paths(&table), 0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(PathCounter.sample_random_path(&table, &mut rng).is_empty());
    }

    #[test]
    fn sampled_path_is_monotone() {
        let grid: OccupancyGrid = "....\n.#..\n...#\n....".parse().unwrap();
        let table = PathCounter.compute_table(&grid);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let path = PathCounter.sample_random_path(&table, &mut rng);
            assert_eq!(path.len(), 7);
            assert_eq!(path[0], cell(0, 0));
            assert_eq!(path[6], cell(3, 3));
            for w in path.windows(2) {
                assert_eq!((w[1].x - w[0].x) + (w[1].y - w[0].y), 1);
                assert!(!grid.get_point(w[1]));
            }
        }
    }

    #[test]
    fn no_path_samples_nothing() {
        let grid: OccupancyGrid = ".#\n#.".parse().unwrap();
        let table = PathCounter.compute_table(&grid);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(PathCounter.sample_random_path(&table, &mut rng).is_empty());
    }

    #[test]
    fn inconsistent_table_stops_early() {
        let mut table = PathCounter.compute_table(&OccupancyGrid::new(2, 2, false));
        table.counts.set(0, 1, 0);
        table.counts.set(1, 0, 0);
        let mut rng = StdRng::seed_from_u64(0);
        let path = PathCounter.sample_random_path(&table, &mut rng);
        assert_eq!(path, vec![cell(1, 1)]);
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let table = PathCounter.compute_table(&OccupancyGrid::new(6, 6, false));
        let a = PathCounter.sample_random_path(&table, &mut StdRng::seed_from_u64(42));
        let b = PathCounter.sample_random_path(&table, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn large_counts_saturate() {
        let table = PathCounter.compute_table(&OccupancyGrid::new(80, 80, false));
        assert_eq!(PathCounter.total_paths(&table), u128::MAX);
    }

    #[test]
    fn saturated_table_still_samples_monotone_path() {
        let table = PathCounter.compute_table(&OccupancyGrid::new(70, 70, false));
        let (up, left) = (table.value(cell(68, 69)), table.value(cell(69, 68)));
        assert_eq!(up, u128::MAX);
        assert_eq!(left, u128::MAX);
        assert_eq!(PathCounter.total_paths(&table), u128::MAX);
        let mut rng = StdRng::seed_from_u64(9);
        let path = PathCounter.sample_random_path(&table, &mut rng);
        assert_eq!(path.len(), 139);
        assert_eq!(path[0], cell(0, 0));
        assert_eq!(path[138], cell(69, 69));
        for w in path.windows(2) {
            assert_eq!((w[1].x - w[0].x) + (w[1].y - w[0].y), 1);
        }
    }
}

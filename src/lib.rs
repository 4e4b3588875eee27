//! # unique_paths
//!
//! Path computations behind a small grid visualizer. Two algorithms are provided:
//!
//! - [PathCounter] counts the obstacle-avoiding
//!   [monotone paths](https://leetcode.com/problems/unique-paths-ii/) from the top-left to the
//!   bottom-right corner with a dynamic-programming table, and samples one such path with
//!   probability proportional to the number of paths through each cell.
//! - [ShortestPathFinder] runs a uniform-cost (Dijkstra) search on the 8-neighbourhood where
//!   orthogonal moves cost `1` and diagonal moves cost `√2`.
//!
//! Both operate on an [OccupancyGrid] snapshot and never fail: impossible requests produce an
//! empty path, a zero count or an empty table. The [session] module holds the headless editing
//! state of the visualizer (obstacle painting, endpoint dragging, resizing) and the
//! cancellable [reveal](reveal::Reveal) of a computed path.
//!
//! Points are [grid_util::Point]s where `x` is the column and `y` the row; use [cell] to build
//! one in row/column order.
pub mod occupancy_grid;
pub mod path_counter;
pub mod reveal;
pub mod search;
pub mod session;
pub mod shortest_path;
pub mod validity;

use std::time::Duration;

use grid_util::point::Point;

pub use crate::occupancy_grid::{OccupancyGrid, ParseGridError};
pub use crate::path_counter::{DpTable, PathCounter};
pub use crate::shortest_path::ShortestPathFinder;

/// Cost of a horizontal or vertical move.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Smallest number of rows or columns the interactive session allows.
pub const MIN_DIMENSION: usize = 1;
/// Largest number of rows or columns the interactive session allows. The algorithms
/// themselves have no limit.
pub const MAX_DIMENSION: usize = 12;
/// Delay between two frames of a path reveal.
pub const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// A sequence of cells from a start to an end.
pub type Path = Vec<Point>;

/// Builds a [Point] from a row and a column.
pub fn cell(row: i32, col: i32) -> Point {
    Point::new(col, row)
}

/// Which of the two computations the visualizer is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Monotone path counting between the fixed corners.
    Counting,
    /// 8-directional shortest path between movable endpoints.
    #[default]
    ShortestPath,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Counting => Mode::ShortestPath,
            Mode::ShortestPath => Mode::Counting,
        }
    }
}

/// Whether a path can currently be shown.
///
/// In [Mode::ShortestPath] this is true iff [ShortestPathFinder::find_path] would return a
/// non-empty path; `start == end` on a free cell counts as possible. When the grid's components
/// are up to date the answer comes from the union-find structure instead of a full search.
/// In [Mode::Counting] the endpoints are ignored and the answer is whether at least one
/// monotone path between the corners exists.
pub fn is_path_possible(grid: &OccupancyGrid, start: Point, end: Point, mode: Mode) -> bool {
    match mode {
        Mode::ShortestPath => {
            if grid.components_dirty {
                !ShortestPathFinder.find_path(grid, start, end).is_empty()
            } else {
                grid.reachable(&start, &end)
            }
        }
        Mode::Counting => PathCounter.total_paths(&PathCounter.compute_table(grid)) > 0,
    }
}

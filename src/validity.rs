//! Checks that a path only uses legal moves over free cells.
use fxhash::FxHashSet;
use grid_util::point::Point;

use crate::occupancy_grid::OccupancyGrid;

/// `b` is one cell to the right of or below `a`.
pub fn is_monotone_step(a: &Point, b: &Point) -> bool {
    (b.x - a.x, b.y - a.y) == (1, 0) || (b.x - a.x, b.y - a.y) == (0, 1)
}

/// `b` is one of the 8 neighbours of `a`.
pub fn is_moore_step(a: &Point, b: &Point) -> bool {
    a != b && (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1
}

fn all_free(grid: &OccupancyGrid, path: &[Point]) -> bool {
    path.iter().all(|p| grid.can_move_to(*p))
}

/// A path drawn by path counting: starts at the top-left corner, ends at the bottom-right
/// corner, moves right or down over free cells.
pub fn is_valid_counting_path(grid: &OccupancyGrid, path: &[Point]) -> bool {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return false;
    };
    *first == Point::new(0, 0)
        && Some(*last) == grid.last_cell()
        && all_free(grid, path)
        && path.windows(2).all(|w| is_monotone_step(&w[0], &w[1]))
}

/// A path produced by the shortest-path search: free cells joined by 8-directional moves,
/// without visiting a cell twice.
pub fn is_valid_shortest_path(grid: &OccupancyGrid, path: &[Point]) -> bool {
    let mut seen = FxHashSet::default();
    !path.is_empty()
        && all_free(grid, path)
        && path.iter().all(|p| seen.insert(*p))
        && path.windows(2).all(|w| is_moore_step(&w[0], &w[1]))
}

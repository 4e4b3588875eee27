use grid_util::point::Point;
use log::debug;

use crate::occupancy_grid::OccupancyGrid;
use crate::search::dijkstra;
use crate::{Path, DIAGONAL_COST, ORTHOGONAL_COST};

/// Cost of the cheapest unobstructed route between two points when moving in 8 directions:
/// as many diagonal steps as possible, then straight ones.
pub fn octile_distance(p1: &Point, p2: &Point) -> f64 {
    let delta_x = (p1.x - p2.x).abs();
    let delta_y = (p1.y - p2.y).abs();
    let diagonal = delta_x.min(delta_y);
    let straight = delta_x.max(delta_y) - diagonal;
    diagonal as f64 * DIAGONAL_COST + straight as f64 * ORTHOGONAL_COST
}

/// Dijkstra search on the 8-neighbourhood of an [OccupancyGrid], with cost 1 for orthogonal and
/// `√2` for diagonal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestPathFinder;

impl ShortestPathFinder {
    /// Cheapest path from `start` to `end`, both included. Empty if either endpoint is off the
    /// grid or an obstacle, or if `end` cannot be reached.
    pub fn find_path(&self, grid: &OccupancyGrid, start: Point, end: Point) -> Path {
        self.find_path_with_cost(grid, start, end)
            .map(|(path, _cost)| path)
            .unwrap_or_default()
    }

    /// Like [find_path](Self::find_path), also returning the total cost. Up-to-date components
    /// let an unreachable `end` be rejected without searching.
    pub fn find_path_with_cost(
        &self,
        grid: &OccupancyGrid,
        start: Point,
        end: Point,
    ) -> Option<(Path, f64)> {
        if !grid.can_move_to(start) || !grid.can_move_to(end) {
            debug!("{} or {} is blocked or outside the grid", start, end);
            return None;
        }
        if !grid.components_dirty && grid.unreachable(&start, &end) {
            debug!("{} is not reachable from {}", end, start);
            return None;
        }
        let result = dijkstra(
            &start,
            |node| grid.neighborhood_points_and_cost(node),
            |node| *node == end,
        );
        if let Some((path, cost)) = &result {
            debug!("Found a path of {} cells with cost {:.3}", path.len(), cost);
        }
        result
    }

    /// Sum of the move costs along `path`.
    pub fn path_cost(&self, path: &[Point]) -> f64 {
        path.windows(2)
            .map(|step| octile_distance(&step[0], &step[1]))
            .sum()
    }
}

use core::fmt;
use std::error::Error;
use std::str::FromStr;

use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{DIAGONAL_COST, ORTHOGONAL_COST};

/// Offsets `(dx, dy)` of the 8-neighbourhood, orthogonal moves first.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Size of the inline buffer used for neighbourhoods.
pub const N_SMALLVEC_SIZE: usize = 8;

/// [OccupancyGrid] maintains information about components using a [UnionFind] structure in
/// addition to the raw [bool] grid values in the [BoolGrid] that determine whether a cell is an
/// obstacle ([true]) or free ([false]). Components connect free cells through any of the 8
/// neighbour moves. Implements [ValueGrid] by building on [BoolGrid], with `width` the number of
/// columns and `height` the number of rows.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for OccupancyGrid {
    fn default() -> OccupancyGrid {
        OccupancyGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl OccupancyGrid {
    /// Builds a grid from a row-major 0/1 matrix where any non-zero value is an obstacle.
    /// Short rows are padded with free cells up to the longest row.
    pub fn from_matrix<R: AsRef<[u8]>>(rows: &[R]) -> OccupancyGrid {
        let height = rows.len();
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = OccupancyGrid::new(width, height, false);
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.as_ref().iter().enumerate() {
                grid.grid.set(x as i32, y as i32, value != 0);
            }
        }
        grid.generate_components();
        grid
    }

    /// The grid as a row-major 0/1 matrix.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| self.grid.get(x, y) as u8)
                    .collect()
            })
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.height()
    }

    pub fn cols(&self) -> usize {
        self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Bottom-right cell, the fixed destination of path counting.
    pub fn last_cell(&self) -> Option<Point> {
        if self.is_empty() {
            None
        } else {
            Some(Point::new(self.width() as i32 - 1, self.height() as i32 - 1))
        }
    }

    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }

    /// Free neighbours of `pos` with the cost of moving there. Diagonal moves may pass between
    /// two obstacles touching at a corner.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .map(|p| {
                let cost = if p.x != pos.x && p.y != pos.y {
                    DIAGONAL_COST
                } else {
                    ORTHOGONAL_COST
                };
                (p, cost)
            })
            .collect()
    }

    /// True if `pos` lies on the grid and is free.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get_point(pos)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.index_in_bounds(x, y)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.grid.get_ix_point(point))
    }

    /// Checks if start and goal are free and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start or goal is blocked or if they are on different components.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            let start_ix = self.grid.get_ix_point(start);
            let goal_ix = self.grid.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.grid.get_ix_point(&point);
                // The remaining four directions are covered from the other side.
                let neighbours = [
                    Point::new(x, y + 1),
                    Point::new(x + 1, y - 1),
                    Point::new(x + 1, y),
                    Point::new(x + 1, y + 1),
                ]
                .into_iter()
                .filter(|p| self.can_move_to(*p))
                .map(|p| self.grid.get_ix_point(&p))
                .collect::<SmallVec<[usize; 4]>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// Copy of this grid with `rows` rows and `cols` columns. Cells inside both grids keep their
    /// state, new cells are free.
    pub fn resized(&self, rows: usize, cols: usize) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(cols, rows, false);
        let kept_rows = 0..rows.min(self.height()) as i32;
        let kept_cols = 0..cols.min(self.width()) as i32;
        for (y, x) in iproduct!(kept_rows, kept_cols) {
            grid.grid.set(x, y, self.grid.get(x, y));
        }
        grid.generate_components();
        grid
    }

    /// Removes every obstacle.
    pub fn clear(&mut self) {
        self.grid = BoolGrid::new(self.width(), self.height(), false);
        self.generate_components();
    }

    pub fn obstacle_count(&self) -> usize {
        self.to_matrix()
            .iter()
            .map(|row| row.iter().filter(|&&v| v != 0).count())
            .sum()
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height as i32 {
            let row = (0..self.grid.width as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Reasons a text map cannot be turned into an [OccupancyGrid].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseGridError {
    /// A row has a different length than the first row.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.`, `S` or `E`.
    InvalidCell { line: usize, column: usize, found: char },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseGridError::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {} has {} cells, expected {}",
                line, found, expected
            ),
            ParseGridError::InvalidCell {
                line,
                column,
                found,
            } => write!(f, "invalid cell {:?} at line {}, column {}", found, line, column),
        }
    }
}

impl Error for ParseGridError {}

/// Parses a text map with one line per row. `#` marks an obstacle; `.`, `S` and `E` are free.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for OccupancyGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (line_ix, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(column, c)| match c {
                    '#' => Ok(1),
                    '.' | 'S' | 'E' => Ok(0),
                    found => Err(ParseGridError::InvalidCell {
                        line: line_ix + 1,
                        column: column + 1,
                        found,
                    }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(ParseGridError::Ragged {
                        line: line_ix + 1,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }
        Ok(OccupancyGrid::from_matrix(&rows))
    }
}

impl ValueGrid<bool> for OccupancyGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        let mut base_grid = OccupancyGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        base_grid.generate_components();
        base_grid
    }
    fn get(&self, x: i32, y: i32) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    fn set(&mut self, x: i32, y: i32, blocked: bool) {
        let was_blocked = self.grid.get(x, y);
        self.grid.set(x, y, blocked);
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let p = Point::new(x, y);
            let p_ix = self.grid.get_ix_point(&p);
            for n in self.neighborhood_points(&p) {
                if self.can_move_to(n) {
                    self.components.union(p_ix, self.grid.get_ix_point(&n));
                }
            }
        }
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

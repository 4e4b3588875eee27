//! Headless state of the interactive visualizer.
//!
//! A front end forwards pointer events ([press](Visualizer::press),
//! [enter](Visualizer::enter), [release](Visualizer::release)) and form input
//! ([resize](Visualizer::resize), [toggle_mode](Visualizer::toggle_mode)) and draws what the
//! accessors report. The path algorithms only ever see the finished grid after each event.
use std::time::Duration;

use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::{debug, info};
use rand::Rng;

use crate::occupancy_grid::OccupancyGrid;
use crate::path_counter::{DpTable, PathCounter};
use crate::reveal::{CancelHandle, Reveal};
use crate::shortest_path::ShortestPathFinder;
use crate::{is_path_possible, Mode, MAX_DIMENSION, MIN_DIMENSION, REVEAL_DELAY};

/// Start-up configuration of a [Visualizer].
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub min_dimension: usize,
    pub max_dimension: usize,
    pub reveal_delay: Duration,
    pub mode: Mode,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            rows: 6,
            cols: 6,
            min_dimension: MIN_DIMENSION,
            max_dimension: MAX_DIMENSION,
            reveal_delay: REVEAL_DELAY,
            mode: Mode::default(),
        }
    }
}

impl Settings {
    fn clamp_dimension(&self, value: usize) -> usize {
        value.clamp(self.min_dimension, self.max_dimension.max(self.min_dimension))
    }
}

/// Whether a paint stroke places or removes obstacles. Decided by the first cell of the stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    Add,
    Remove,
}

impl PaintMode {
    fn blocked(self) -> bool {
        self == PaintMode::Add
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// Pointer interaction in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    PaintingObstacle(PaintMode),
    DraggingEndpoint(Endpoint),
}

#[derive(Debug)]
pub struct Visualizer {
    settings: Settings,
    grid: OccupancyGrid,
    start: Point,
    end: Point,
    mode: Mode,
    edit_state: EditState,
    dp_table: Option<DpTable>,
    path_possible: bool,
    reveal: Option<CancelHandle>,
    pub show_dp_values: bool,
}

impl Default for Visualizer {
    fn default() -> Visualizer {
        Visualizer::new(Settings::default())
    }
}

impl Visualizer {
    pub fn new(settings: Settings) -> Visualizer {
        let rows = settings.clamp_dimension(settings.rows);
        let cols = settings.clamp_dimension(settings.cols);
        let grid = OccupancyGrid::new(cols, rows, false);
        let end = grid.last_cell().unwrap_or(Point::new(0, 0));
        let mut visualizer = Visualizer {
            grid,
            start: Point::new(0, 0),
            end,
            mode: settings.mode,
            edit_state: EditState::Idle,
            dp_table: None,
            path_possible: false,
            reveal: None,
            show_dp_values: false,
            settings,
        };
        visualizer.refresh();
        visualizer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn edit_state(&self) -> EditState {
        self.edit_state
    }

    /// Start and end as used by the current mode. Path counting always runs between the
    /// corners.
    pub fn endpoints(&self) -> (Point, Point) {
        match self.mode {
            Mode::ShortestPath => (self.start, self.end),
            Mode::Counting => (
                Point::new(0, 0),
                self.grid.last_cell().unwrap_or(Point::new(0, 0)),
            ),
        }
    }

    /// Whether a reveal may be started.
    pub fn path_possible(&self) -> bool {
        self.path_possible
    }

    /// The path-count table; only kept in [Mode::Counting].
    pub fn dp_table(&self) -> Option<&DpTable> {
        self.dp_table.as_ref()
    }

    pub fn total_paths(&self) -> u128 {
        self.dp_table
            .as_ref()
            .map_or(0, |table| PathCounter.total_paths(table))
    }

    pub fn toggle_dp_values(&mut self) {
        self.show_dp_values = !self.show_dp_values;
    }

    /// Pointer pressed on `cell`. In shortest-path mode pressing an endpoint picks it up;
    /// anywhere else toggles the cell and starts a paint stroke. The counting corners cannot
    /// be painted.
    pub fn press(&mut self, cell: Point) {
        self.cancel_reveal();
        if !self.in_bounds(cell) {
            return;
        }
        if self.mode == Mode::ShortestPath {
            if cell == self.start {
                self.edit_state = EditState::DraggingEndpoint(Endpoint::Start);
                return;
            }
            if cell == self.end {
                self.edit_state = EditState::DraggingEndpoint(Endpoint::End);
                return;
            }
        } else if self.is_endpoint(cell) {
            return;
        }
        let paint_mode = if self.grid.get_point(cell) {
            PaintMode::Remove
        } else {
            PaintMode::Add
        };
        self.edit_state = EditState::PaintingObstacle(paint_mode);
        self.paint(cell, paint_mode);
    }

    /// Pointer moved onto `cell` while pressed.
    pub fn enter(&mut self, cell: Point) {
        if !self.in_bounds(cell) {
            return;
        }
        match self.edit_state {
            EditState::Idle => {}
            EditState::DraggingEndpoint(endpoint) => {
                let other = match endpoint {
                    Endpoint::Start => self.end,
                    Endpoint::End => self.start,
                };
                if self.grid.get_point(cell) || cell == other {
                    return;
                }
                let moved = match endpoint {
                    Endpoint::Start => &mut self.start,
                    Endpoint::End => &mut self.end,
                };
                if *moved != cell {
                    *moved = cell;
                    self.cancel_reveal();
                    self.refresh();
                }
            }
            EditState::PaintingObstacle(paint_mode) => {
                if self.is_endpoint(cell) {
                    return;
                }
                self.paint(cell, paint_mode);
            }
        }
    }

    pub fn release(&mut self) {
        self.edit_state = EditState::Idle;
    }

    /// Changes the grid size, clamped to the configured bounds. Cells present in both sizes
    /// keep their state and the endpoints are pulled inside the new bounds. An obstacle that
    /// ends up under an endpoint is removed.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = self.settings.clamp_dimension(rows);
        let cols = self.settings.clamp_dimension(cols);
        self.cancel_reveal();
        self.edit_state = EditState::Idle;
        self.grid = self.grid.resized(rows, cols);
        let clamp = |p: Point| {
            Point::new(
                p.x.min(cols as i32 - 1).max(0),
                p.y.min(rows as i32 - 1).max(0),
            )
        };
        self.start = clamp(self.start);
        self.end = clamp(self.end);
        let (start, end) = self.endpoints();
        for endpoint in [start, end] {
            if self.in_bounds(endpoint) && self.grid.get_point(endpoint) {
                debug!("Freeing {} under an endpoint", endpoint);
                self.grid.set_point(endpoint, false);
            }
        }
        info!("Resized grid to {} rows and {} columns", rows, cols);
        self.refresh();
    }

    /// Removes all obstacles and puts the endpoints back into the corners.
    pub fn reset(&mut self) {
        self.cancel_reveal();
        self.edit_state = EditState::Idle;
        self.grid.clear();
        self.start = Point::new(0, 0);
        self.end = self.grid.last_cell().unwrap_or(Point::new(0, 0));
        self.refresh();
    }

    /// Switches between path counting and shortest path, resetting the grid.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        info!("Switched to {:?}", self.mode);
        self.reset();
    }

    /// Computes the path to show and returns its reveal, or [None] if no path is possible.
    /// A reveal that is still running is cancelled first. Path counting draws a fresh random
    /// path from `rng` every time.
    pub fn start_reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Reveal> {
        self.cancel_reveal();
        if !self.path_possible {
            debug!("No path possible, not revealing");
            return None;
        }
        let path = match (self.mode, &self.dp_table) {
            (Mode::ShortestPath, _) => {
                ShortestPathFinder.find_path(&self.grid, self.start, self.end)
            }
            (Mode::Counting, Some(table)) => PathCounter.sample_random_path(table, rng),
            (Mode::Counting, None) => Vec::new(),
        };
        if path.is_empty() {
            return None;
        }
        let reveal = Reveal::new(path);
        self.reveal = Some(reveal.cancel_handle());
        Some(reveal)
    }

    /// Stops the reveal handed out by the last [start_reveal](Self::start_reveal).
    pub fn cancel_reveal(&mut self) {
        if let Some(handle) = self.reveal.take() {
            handle.cancel();
        }
    }

    fn in_bounds(&self, cell: Point) -> bool {
        self.grid.point_in_bounds(cell)
    }

    fn is_endpoint(&self, cell: Point) -> bool {
        let (start, end) = self.endpoints();
        cell == start || cell == end
    }

    fn paint(&mut self, cell: Point, paint_mode: PaintMode) {
        if self.grid.get_point(cell) == paint_mode.blocked() {
            return;
        }
        self.cancel_reveal();
        self.grid.set_point(cell, paint_mode.blocked());
        self.refresh();
    }

    /// Brings the components, the table and the path flag up to date with the grid.
    fn refresh(&mut self) {
        self.grid.update();
        self.dp_table = match self.mode {
            Mode::Counting => Some(PathCounter.compute_table(&self.grid)),
            Mode::ShortestPath => None,
        };
        self.path_possible = is_path_possible(&self.grid, self.start, self.end, self.mode);
        debug!("Path possible: {}", self.path_possible);
    }
}

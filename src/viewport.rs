//! Coordinate mapping between the display surface and the pixel grid.
//!
//! The canvas is fitted into its container at an integer cell size and
//! centred. Zoom and pan only change the display transform, so pointer
//! positions are un-zoomed before the cell formula is applied.

use crate::tools::Cell;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 64.0;

/// A position on the display surface, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The container axis that decides the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Maps display positions to grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    grid_width: u32,
    grid_height: u32,
    container_width: f64,
    container_height: f64,
    cell_size: u32,
    dominant: Axis,
    origin: Point,
    zoom: f64,
    pan: Point,
}

impl Viewport {
    /// Fit a `grid_width` x `grid_height` canvas into a container.
    pub fn new(grid_width: u32, grid_height: u32, container_width: f64, container_height: f64) -> Self {
        let mut viewport = Self {
            grid_width: grid_width.max(1),
            grid_height: grid_height.max(1),
            container_width: 0.0,
            container_height: 0.0,
            cell_size: 1,
            dominant: Axis::Width,
            origin: Point::default(),
            zoom: 1.0,
            pan: Point::default(),
        };
        viewport.resize(container_width, container_height);
        viewport
    }

    /// Recompute the cell size and origin for a new container size.
    ///
    /// The dominant axis is the one that fits exactly: a container wider
    /// than the artwork's aspect ratio is limited by its height, otherwise
    /// by its width. The cell size is never below 1.
    pub fn resize(&mut self, container_width: f64, container_height: f64) {
        self.container_width = container_width.max(0.0);
        self.container_height = container_height.max(0.0);

        let grid_w = self.grid_width as f64;
        let grid_h = self.grid_height as f64;
        let container_wider = self.container_width * grid_h > grid_w * self.container_height;

        let (dominant, cell) = if container_wider {
            (Axis::Height, (self.container_height / grid_h).floor())
        } else {
            (Axis::Width, (self.container_width / grid_w).floor())
        };
        self.dominant = dominant;
        self.cell_size = (cell as u32).max(1);

        let canvas_w = grid_w * self.cell_size as f64;
        let canvas_h = grid_h * self.cell_size as f64;
        self.origin = Point::new(
            ((self.container_width - canvas_w) / 2.0).floor(),
            ((self.container_height - canvas_h) / 2.0).floor(),
        );
        tracing::debug!(cell = self.cell_size, ?dominant, "viewport resized");
    }

    /// Change the grid dimensions, e.g. after loading another artwork.
    pub fn set_grid(&mut self, grid_width: u32, grid_height: u32) {
        self.grid_width = grid_width.max(1);
        self.grid_height = grid_height.max(1);
        self.resize(self.container_width, self.container_height);
    }

    /// Display pixels per grid cell at zoom 1.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn dominant_axis(&self) -> Axis {
        self.dominant
    }

    /// Top-left corner of the unzoomed canvas inside the container.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamped to a sane range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    /// Move the canvas by a display-space offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = Point::new(self.pan.x + dx, self.pan.y + dy);
    }

    /// Map a display position to the grid cell under it.
    ///
    /// The result may lie outside the grid; tools ignore such cells.
    pub fn to_cell(&self, point: Point) -> Cell {
        let local_x = (point.x - self.origin.x - self.pan.x) / self.zoom;
        let local_y = (point.y - self.origin.y - self.pan.y) / self.zoom;
        let cell = self.cell_size as f64;
        Cell::new((local_x / cell).floor() as i64, (local_y / cell).floor() as i64)
    }

    /// Display position of a cell's top-left corner.
    pub fn to_display(&self, cell: Cell) -> Point {
        let size = self.cell_size as f64 * self.zoom;
        Point::new(
            self.origin.x + self.pan.x + cell.x as f64 * size,
            self.origin.y + self.pan.y + cell.y as f64 * size,
        )
    }

    /// Check if a cell is on the canvas.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.grid_width as i64 && cell.y < self.grid_height as i64
    }
}

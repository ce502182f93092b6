//! Colour picker.

use crate::types::{Colour, RasterBuffer};

use super::{cell_colour, cell_in_grid, Cell};

/// Read the colour under a cell. `None` outside the grid.
pub fn pick(buffer: &RasterBuffer, cell: Cell, pixel_size: u32) -> Option<Colour> {
    let (x, y) = cell_in_grid(buffer, cell, pixel_size)?;
    Some(cell_colour(buffer, x, y, pixel_size))
}

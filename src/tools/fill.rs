//! Flood fill.
//!
//! Fills the 4-connected region of cells whose colour exactly matches the
//! clicked cell. The traversal is an explicit stack (depth-first, no
//! recursion) that visits neighbours left, up, right, down. It runs on a
//! working copy and replaces the buffer only once finished.

use crate::types::{Colour, RasterBuffer};

use super::{cell_colour, cell_in_grid, grid_size, paint_cell, Cell};

/// Flood-fill from a cell with the colour at full alpha.
///
/// Returns false when nothing changed: the cell is outside the grid, or the
/// clicked colour already equals the fill colour.
pub fn flood_fill(buffer: &mut RasterBuffer, cell: Cell, colour: Colour, pixel_size: u32) -> bool {
    let Some((start_x, start_y)) = cell_in_grid(buffer, cell, pixel_size) else {
        return false;
    };

    let fill = colour.with_alpha(255);
    let target = cell_colour(buffer, start_x, start_y, pixel_size);
    if target == fill {
        return false;
    }

    let (grid_w, grid_h) = grid_size(buffer, pixel_size);
    let index = |x: u32, y: u32| y as usize * grid_w as usize + x as usize;

    let mut working = buffer.clone();
    let mut checked = vec![false; grid_w as usize * grid_h as usize];
    let mut stack = vec![(start_x, start_y)];
    checked[index(start_x, start_y)] = true;

    while let Some((x, y)) = stack.pop() {
        paint_cell(&mut working, x, y, fill, pixel_size);

        let neighbours = [
            (x.checked_sub(1), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x + 1).filter(|&nx| nx < grid_w), Some(y)),
            (Some(x), Some(y + 1).filter(|&ny| ny < grid_h)),
        ];

        for (nx, ny) in neighbours {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            let i = index(nx, ny);
            if !checked[i] && cell_colour(&working, nx, ny, pixel_size) == target {
                checked[i] = true;
                stack.push((nx, ny));
            }
        }
    }

    *buffer = working;
    true
}

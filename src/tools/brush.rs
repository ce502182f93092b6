//! Pencil and eraser.

use crate::types::{Colour, RasterBuffer};

use super::{cell_in_grid, paint_cell, Cell};

/// Set one cell to the colour at full alpha. Returns false outside the grid.
pub fn pencil(buffer: &mut RasterBuffer, cell: Cell, colour: Colour, pixel_size: u32) -> bool {
    let Some((x, y)) = cell_in_grid(buffer, cell, pixel_size) else {
        return false;
    };
    paint_cell(buffer, x, y, colour.with_alpha(255), pixel_size);
    true
}

/// Clear one cell to transparent. Returns false outside the grid.
pub fn erase(buffer: &mut RasterBuffer, cell: Cell, pixel_size: u32) -> bool {
    let Some((x, y)) = cell_in_grid(buffer, cell, pixel_size) else {
        return false;
    };
    paint_cell(buffer, x, y, Colour::TRANSPARENT, pixel_size);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pencil_sets_single_pixel() {
        let mut buffer = RasterBuffer::new(4, 4);
        let red = crate::types::hex_to_rgb("#FF0000");

        assert!(pencil(&mut buffer, Cell::new(1, 1), red, 1));

        for (x, y, colour) in buffer.pixels() {
            if (x, y) == (1, 1) {
                assert_eq!(colour.to_rgba(), [255, 0, 0, 255]);
            } else {
                assert_eq!(colour, Colour::TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_pencil_forces_full_alpha() {
        let mut buffer = RasterBuffer::new(1, 1);
        pencil(&mut buffer, Cell::new(0, 0), Colour::new(10, 20, 30, 40), 1);
        assert_eq!(buffer.get_pixel(0, 0), Colour::rgb(10, 20, 30));
    }

    #[test]
    fn test_pencil_out_of_bounds_is_ignored() {
        let mut buffer = RasterBuffer::new(2, 2);
        assert!(!pencil(&mut buffer, Cell::new(-1, 0), Colour::WHITE, 1));
        assert!(!pencil(&mut buffer, Cell::new(0, 2), Colour::WHITE, 1));
        assert!(buffer.is_transparent());
    }

    #[test]
    fn test_pencil_with_pixel_size_paints_block() {
        let mut buffer = RasterBuffer::new(4, 4);
        pencil(&mut buffer, Cell::new(1, 0), Colour::WHITE, 2);

        let painted: Vec<_> = buffer
            .pixels()
            .filter(|(_, _, c)| *c == Colour::WHITE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(painted, vec![(2, 0), (3, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_erase_clears_alpha() {
        let mut buffer = RasterBuffer::new(2, 2);
        pencil(&mut buffer, Cell::new(0, 1), Colour::WHITE, 1);
        assert!(erase(&mut buffer, Cell::new(0, 1), 1));
        assert_eq!(buffer.get_pixel(0, 1).a, 0);
        assert!(!erase(&mut buffer, Cell::new(2, 2), 1));
    }
}

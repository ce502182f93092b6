//! Tool engine.
//!
//! Each tool is a function of a buffer, a grid cell, the active colour, and
//! the pixel size. Cells are in logical grid units; a cell covers a
//! `pixel_size` x `pixel_size` block of buffer samples. Cells outside the
//! grid are ignored.

mod brush;
mod fill;
mod picker;

use std::fmt;
use std::str::FromStr;

use crate::error::{EditError, Result};
use crate::types::{Colour, RasterBuffer};

pub use brush::{erase, pencil};
pub use fill::flood_fill;
pub use picker::pick;

/// A grid cell, possibly outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl FromStr for Cell {
    type Err = EditError;

    /// Parse `x,y`.
    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || EditError::Parse {
            message: format!("Invalid cell: {}", s),
            help: Some("Use x,y with integer coordinates, e.g. 3,4".to_string()),
        };
        let (x, y) = s.split_once(',').ok_or_else(parse_err)?;
        let x = x.trim().parse().map_err(|_| parse_err())?;
        let y = y.trim().parse().map_err(|_| parse_err())?;
        Ok(Self { x, y })
    }
}

/// The selectable drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Picker,
}

impl Tool {
    /// Drag tools apply on pointer-down and every move while held;
    /// the others apply once on pointer-up.
    pub fn is_drag(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }

    /// Whether the tool writes to the buffer.
    pub fn mutates(self) -> bool {
        !matches!(self, Tool::Picker)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Picker => "picker",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pencil" => Ok(Tool::Pencil),
            "eraser" => Ok(Tool::Eraser),
            "fill" | "bucket" => Ok(Tool::Fill),
            "picker" | "eyedropper" => Ok(Tool::Picker),
            _ => Err(EditError::Parse {
                message: format!("Unknown tool: {}", s),
                help: Some("Available tools: pencil, eraser, fill, picker".to_string()),
            }),
        }
    }
}

/// The editor's selection state, threaded through every tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// Active tool.
    pub tool: Tool,
    /// Active colour.
    pub colour: Colour,
    /// Active layer index (0 = bottom).
    pub layer: usize,
    /// Active frame index (1-based).
    pub frame: usize,
    /// Buffer samples per grid cell along each axis.
    pub pixel_size: u32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            colour: Colour::BLACK,
            layer: 0,
            frame: 1,
            pixel_size: 1,
        }
    }
}

/// What a tool application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The buffer was written.
    Painted,
    /// Nothing changed (out of bounds, or a fill that matched already).
    Unchanged,
    /// The picker read a colour.
    Picked(Colour),
    /// The picker was used outside the canvas.
    NoColour,
}

impl ToolOutcome {
    pub fn is_painted(self) -> bool {
        matches!(self, ToolOutcome::Painted)
    }
}

/// Apply a tool at a cell.
pub fn apply(tool: Tool, buffer: &mut RasterBuffer, cell: Cell, colour: Colour, pixel_size: u32) -> ToolOutcome {
    let changed = match tool {
        Tool::Pencil => pencil(buffer, cell, colour, pixel_size),
        Tool::Eraser => erase(buffer, cell, pixel_size),
        Tool::Fill => flood_fill(buffer, cell, colour, pixel_size),
        Tool::Picker => {
            return match pick(buffer, cell, pixel_size) {
                Some(colour) => ToolOutcome::Picked(colour),
                None => ToolOutcome::NoColour,
            }
        }
    };
    if changed {
        ToolOutcome::Painted
    } else {
        ToolOutcome::Unchanged
    }
}

/// Grid size in cells for a buffer at a pixel size.
pub(crate) fn grid_size(buffer: &RasterBuffer, pixel_size: u32) -> (u32, u32) {
    let pixel_size = pixel_size.max(1);
    (buffer.width() / pixel_size, buffer.height() / pixel_size)
}

/// Cell as unsigned grid coordinates, or `None` outside the grid.
pub(crate) fn cell_in_grid(buffer: &RasterBuffer, cell: Cell, pixel_size: u32) -> Option<(u32, u32)> {
    let (w, h) = grid_size(buffer, pixel_size);
    let inside = cell.x >= 0 && cell.y >= 0 && cell.x < w as i64 && cell.y < h as i64;
    inside.then(|| (cell.x as u32, cell.y as u32))
}

/// Write every sample of a cell's block.
pub(crate) fn paint_cell(buffer: &mut RasterBuffer, x: u32, y: u32, colour: Colour, pixel_size: u32) {
    let pixel_size = pixel_size.max(1);
    for dy in 0..pixel_size {
        for dx in 0..pixel_size {
            buffer.set_pixel(x * pixel_size + dx, y * pixel_size + dy, colour);
        }
    }
}

/// Read the colour of a cell (its top-left sample).
pub(crate) fn cell_colour(buffer: &RasterBuffer, x: u32, y: u32, pixel_size: u32) -> Colour {
    let pixel_size = pixel_size.max(1);
    buffer.get_pixel(x * pixel_size, y * pixel_size)
}

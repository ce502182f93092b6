//! Paint command implementation.
//!
//! Applies one tool to a stored artwork at one or more grid cells. The
//! cells form a single stroke, committed and saved once.

use clap::Args;

use crate::error::{EditError, Result};
use crate::output::{plural, Printer};
use crate::tools::{Cell, Tool, ToolOutcome};
use crate::types::Colour;

use super::{finish, ProjectArgs};

/// Apply a tool at grid cells
#[derive(Args, Debug)]
pub struct PaintArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,

    /// Grid cells as x,y
    #[arg(required = true, allow_hyphen_values = true)]
    pub cells: Vec<Cell>,

    /// Tool to apply (pencil, eraser, fill, picker)
    #[arg(long, short, default_value = "pencil")]
    pub tool: Tool,

    /// Colour as hex (#RGB, #RRGGBB, #RRGGBBAA)
    #[arg(long, short, default_value = "#000000")]
    pub colour: Colour,

    /// Layer index, 0 is the bottom
    #[arg(long, default_value = "0")]
    pub layer: usize,

    /// Frame index, 1-based
    #[arg(long, default_value = "1")]
    pub frame: usize,

    /// Buffer pixels per grid cell (default: from pxedit.yaml)
    #[arg(long)]
    pub pixel_size: Option<u32>,
}

pub fn run(args: PaintArgs, printer: &Printer) -> Result<Vec<ToolOutcome>> {
    let mut session = args.project.session(&args.key)?;

    if !session.select_layer(args.layer) {
        return Err(EditError::Parse {
            message: format!("No layer {} in {}", args.layer, args.key),
            help: Some(format!(
                "Layers are numbered 0 to {}",
                session.artwork().layer_count() - 1
            )),
        });
    }
    if !session.select_frame(args.frame) {
        return Err(EditError::Parse {
            message: format!("No frame {} in {}", args.frame, args.key),
            help: Some(format!(
                "Frames are numbered 1 to {}",
                session.artwork().frame_count()
            )),
        });
    }
    if let Some(pixel_size) = args.pixel_size {
        session.set_pixel_size(pixel_size);
    }
    session.set_tool(args.tool);
    session.set_colour(args.colour);

    let outcomes = session.stroke_cells(&args.cells);
    let painted = outcomes.iter().filter(|o| o.is_painted()).count();

    if args.tool == Tool::Picker {
        let picked = outcomes.iter().rev().find_map(|outcome| match outcome {
            ToolOutcome::Picked(colour) => Some(*colour),
            _ => None,
        });
        match picked {
            Some(colour) => {
                printer.info("Picked", &printer.swatch(colour));
                println!("{}", colour);
            }
            None => printer.warning("Skipped", "no cell inside the canvas"),
        }
        return Ok(outcomes);
    }

    if painted == 0 {
        let reason = match session.artwork().layer(args.layer) {
            Some(layer) if layer.locked => "layer is locked",
            _ => "nothing changed",
        };
        printer.warning("Unchanged", &format!("{} ({})", args.key, reason));
        return Ok(outcomes);
    }

    finish(session)?;
    printer.success(
        "Painted",
        &format!(
            "{} with {} {}",
            plural(painted, "cell", "cells"),
            args.tool,
            printer.swatch(args.colour)
        ),
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::project;
    use crate::store::ArtworkStore;
    use crate::types::Artwork;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::tempdir;

    fn seed(dir: &Path) {
        let (_, mut store) = project(dir).open().unwrap();
        store.save(&Artwork::new("art", 4, 4)).unwrap();
    }

    fn args(dir: &Path, tool: Tool, cells: &[(i64, i64)]) -> PaintArgs {
        PaintArgs {
            project: project(dir),
            key: "art".to_string(),
            cells: cells.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            tool,
            colour: Colour::rgb(255, 0, 0),
            layer: 0,
            frame: 1,
            pixel_size: None,
        }
    }

    fn pixel(dir: &Path, x: u32, y: u32) -> Colour {
        let (_, store) = project(dir).open().unwrap();
        let artwork = store.get("art").unwrap().unwrap();
        artwork
            .layer(0)
            .unwrap()
            .frame(1)
            .map(|buffer| buffer.get_pixel(x, y))
            .unwrap_or(Colour::TRANSPARENT)
    }

    #[test]
    fn test_paint_pencil_and_persist() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let outcomes = run(args(dir.path(), Tool::Pencil, &[(0, 0), (3, 3), (7, 7)]), &Printer::new()).unwrap();

        assert_eq!(
            outcomes,
            vec![ToolOutcome::Painted, ToolOutcome::Painted, ToolOutcome::Unchanged]
        );
        assert_eq!(pixel(dir.path(), 3, 3), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_paint_fill_then_pick() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        run(args(dir.path(), Tool::Fill, &[(1, 1)]), &Printer::new()).unwrap();
        assert_eq!(pixel(dir.path(), 0, 3), Colour::rgb(255, 0, 0));

        let outcomes = run(args(dir.path(), Tool::Picker, &[(2, 2)]), &Printer::new()).unwrap();
        assert_eq!(outcomes, vec![ToolOutcome::Picked(Colour::rgb(255, 0, 0))]);
    }

    #[test]
    fn test_paint_rejects_missing_layer() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let mut paint = args(dir.path(), Tool::Pencil, &[(0, 0)]);
        paint.layer = 3;
        assert!(matches!(run(paint, &Printer::new()), Err(EditError::Parse { .. })));
    }
}

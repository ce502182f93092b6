//! Layer command implementation.
//!
//! Structural and property edits on one layer of a stored artwork.

use clap::{Args, Subcommand};

use crate::error::Result;
use crate::output::Printer;
use crate::types::BlendMode;

use super::{finish, ProjectArgs};

/// Edit layers
#[derive(Args, Debug)]
pub struct LayerArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,

    #[command(subcommand)]
    pub action: LayerAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LayerAction {
    /// Add a layer on top
    Add,
    /// Copy a layer directly above itself
    Duplicate { index: usize },
    /// Delete a layer (the last layer cannot be deleted)
    Delete { index: usize },
    /// Move a layer one step up
    Up { index: usize },
    /// Move a layer one step down
    Down { index: usize },
    /// Rename a layer
    Rename { index: usize, name: String },
    /// Toggle a layer's lock
    Lock { index: usize },
    /// Toggle a layer's visibility
    Hide { index: usize },
    /// Set a layer's opacity (0-100)
    Opacity {
        index: usize,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    /// Set a layer's blend mode
    Blend { index: usize, mode: BlendMode },
}

impl LayerAction {
    fn index(&self) -> Option<usize> {
        match self {
            LayerAction::Add => None,
            LayerAction::Duplicate { index }
            | LayerAction::Delete { index }
            | LayerAction::Up { index }
            | LayerAction::Down { index }
            | LayerAction::Rename { index, .. }
            | LayerAction::Lock { index }
            | LayerAction::Hide { index }
            | LayerAction::Opacity { index, .. }
            | LayerAction::Blend { index, .. } => Some(*index),
        }
    }
}

/// Returns whether the artwork changed.
pub fn run(args: LayerArgs, printer: &Printer) -> Result<bool> {
    let mut session = args.project.session(&args.key)?;

    if let Some(index) = args.action.index() {
        if !session.select_layer(index) {
            printer.warning("Skipped", &format!("{} has no layer {}", args.key, index));
            return Ok(false);
        }
    }

    let (done, verb) = match args.action.clone() {
        LayerAction::Add => {
            session.add_layer();
            (true, "Added")
        }
        LayerAction::Duplicate { .. } => (session.duplicate_layer(), "Duplicated"),
        LayerAction::Delete { .. } => (session.delete_layer(), "Deleted"),
        LayerAction::Up { .. } => (session.move_layer_up(), "Moved"),
        LayerAction::Down { .. } => (session.move_layer_down(), "Moved"),
        LayerAction::Rename { name, .. } => (session.rename_layer(name), "Renamed"),
        LayerAction::Lock { .. } => (session.toggle_lock(), "Toggled"),
        LayerAction::Hide { .. } => (session.toggle_visibility(), "Toggled"),
        LayerAction::Opacity { value, .. } => (session.set_opacity(value), "Updated"),
        LayerAction::Blend { mode, .. } => (session.set_blend_mode(mode), "Updated"),
    };

    if !done {
        printer.warning("Skipped", &format!("{:?} is not possible on {}", args.action, args.key));
        return Ok(false);
    }

    let active = session.state().layer;
    let artwork = finish(session)?;
    if let Some(layer) = artwork.layer(active) {
        printer.success(
            verb,
            &format!(
                "layer {} {} {}",
                active,
                printer.bold(&layer.name),
                printer.dim(&format!("({}% {})", layer.opacity(), layer.blend_mode))
            ),
        );
    }

    Ok(true)
}

//! Info command implementation.
//!
//! Prints a summary of one artwork: canvas size, frame timings, and the
//! layer stack from bottom to top.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::Artwork;

use super::{load, ProjectArgs};

/// Show an artwork's layers and frames
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let (_, store) = args.project.open()?;
    let artwork = load(&store, &args.key)?;

    printer.info(
        "Artwork",
        &format!(
            "{} ({}, {})",
            printer.bold(artwork.id()),
            plural(artwork.layer_count(), "layer", "layers"),
            plural(artwork.frame_count(), "frame", "frames")
        ),
    );
    print!("{}", describe(&artwork));

    Ok(())
}

/// Plain-text description, one line per fact.
pub fn describe(artwork: &Artwork) -> String {
    let mut out = format!("{} {}x{}\n", artwork.id(), artwork.width(), artwork.height());

    let timings: Vec<String> = artwork
        .frames()
        .iter()
        .map(|frame| format!("{}ms", frame.duration))
        .collect();
    out.push_str(&format!("frames: {}\n", timings.join(", ")));

    for (index, layer) in artwork.layers().iter().enumerate() {
        let mut flags = String::new();
        if !layer.visible {
            flags.push_str(" hidden");
        }
        if layer.locked {
            flags.push_str(" locked");
        }

        let filled: Vec<String> = (1..=layer.frame_count())
            .filter(|&i| layer.has_frame(i))
            .map(|i| i.to_string())
            .collect();
        let filled = if filled.is_empty() {
            "-".to_string()
        } else {
            filled.join(",")
        };

        out.push_str(&format!(
            "layer {}: {} | {}% {}{} | filled {}\n",
            index,
            layer.name,
            layer.opacity(),
            layer.blend_mode,
            flags,
            filled
        ));
    }

    out
}

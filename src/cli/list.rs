//! List command implementation.
//!
//! Prints every artwork in the project store.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::store::ArtworkStore;

use super::ProjectArgs;

/// List stored artworks
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print only the keys, one per line
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<Vec<String>> {
    let (manifest, store) = args.project.open()?;
    let keys = store.keys()?;

    if keys.is_empty() && !args.quiet {
        printer.info("Empty", &format!("no artworks in {}", manifest.store.display()));
    }

    for key in &keys {
        if args.quiet {
            println!("{}", key);
            continue;
        }
        match store.get(key) {
            Ok(Some(artwork)) => printer.info(
                key,
                &format!(
                    "{}x{} {}",
                    artwork.width(),
                    artwork.height(),
                    printer.dim(&format!(
                        "{}, {}",
                        plural(artwork.layer_count(), "layer", "layers"),
                        plural(artwork.frame_count(), "frame", "frames")
                    ))
                ),
            ),
            Ok(None) => {}
            Err(err) => printer.warning(key, &err.to_string()),
        }
    }

    Ok(keys)
}

//! New command implementation.
//!
//! Creates a blank artwork in the project store.

use clap::Args;

use crate::error::{EditError, Result};
use crate::output::Printer;
use crate::store::ArtworkStore;
use crate::types::Artwork;

use super::ProjectArgs;

/// Create a blank artwork
#[derive(Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Key for the artwork (default: a generated id)
    #[arg(long)]
    pub id: Option<String>,

    /// Canvas width (default: from pxedit.yaml)
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height (default: from pxedit.yaml)
    #[arg(long)]
    pub height: Option<u32>,

    /// Overwrite an existing artwork with the same key
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: NewArgs, printer: &Printer) -> Result<String> {
    let (manifest, mut store) = args.project.open()?;

    let width = args.width.unwrap_or(manifest.width);
    let height = args.height.unwrap_or(manifest.height);
    if width == 0 || height == 0 {
        return Err(EditError::Parse {
            message: format!("Invalid canvas size {}x{}", width, height),
            help: Some("Width and height must be at least 1".to_string()),
        });
    }

    let key = match args.id {
        Some(id) => {
            if store.contains(&id)? && !args.force {
                return Err(EditError::Store {
                    key: id,
                    message: "already exists (use --force to overwrite)".to_string(),
                });
            }
            id
        }
        None => store.generate_key()?,
    };

    let mut artwork = Artwork::new(key.clone(), width, height);
    artwork.set_frame_duration(1, manifest.frame_duration);
    store.save(&artwork)?;

    printer.success("Created", &format!("{} ({}x{})", printer.bold(&key), width, height));
    println!("{}", key);

    Ok(key)
}

//! Import command implementation.
//!
//! Brings an image or a JSON document into the project store.

use std::path::PathBuf;

use clap::Args;

use crate::error::{EditError, Result};
use crate::io::{import_image, read_json};
use crate::output::{display_path, plural, Printer};
use crate::store::ArtworkStore;

use super::ProjectArgs;

/// Import an image or JSON document as a new artwork
#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Image file (PNG, GIF, BMP, ...) or pxedit JSON document
    pub file: PathBuf,

    /// Key for the artwork (default: the document's id, or a generated one)
    #[arg(long)]
    pub id: Option<String>,

    /// Overwrite an existing artwork with the same key
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: ImportArgs, printer: &Printer) -> Result<String> {
    let (_, mut store) = args.project.open()?;
    printer.status("Importing", &display_path(&args.file));

    let is_json = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut artwork = if is_json {
        read_json(&args.file)?
    } else {
        import_image(&args.file, String::new())?
    };

    let key = match args.id {
        Some(id) => id,
        None if is_json && !artwork.id().is_empty() => artwork.id().to_string(),
        None => store.generate_key()?,
    };
    if store.contains(&key)? && !args.force {
        return Err(EditError::Store {
            key,
            message: "already exists (use --force to overwrite)".to_string(),
        });
    }
    artwork.set_id(key.clone());
    store.save(&artwork)?;

    printer.success(
        "Imported",
        &format!(
            "{} ({}x{}, {}, {})",
            printer.bold(&key),
            artwork.width(),
            artwork.height(),
            plural(artwork.layer_count(), "layer", "layers"),
            plural(artwork.frame_count(), "frame", "frames"),
        ),
    );
    println!("{}", key);

    Ok(key)
}

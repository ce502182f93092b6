pub mod completions;
pub mod delete;
pub mod export;
pub mod frame;
pub mod import;
pub mod info;
pub mod layer;
pub mod list;
pub mod new;
pub mod paint;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::{EditError, Result};
use crate::manifest::Manifest;
use crate::session::EditorSession;
use crate::store::{ArtworkStore, DirectoryStore};
use crate::types::Artwork;

/// pxedit - Layered, animated pixel-art editing
#[derive(Parser, Debug)]
#[command(name = "pxedit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a blank artwork
    New(new::NewArgs),

    /// Import an image or JSON document as a new artwork
    Import(import::ImportArgs),

    /// Export a frame as PNG or the whole artwork as JSON
    Export(export::ExportArgs),

    /// Show an artwork's layers and frames
    Info(info::InfoArgs),

    /// List stored artworks
    List(list::ListArgs),

    /// Delete a stored artwork
    Delete(delete::DeleteArgs),

    /// Apply a tool at grid cells
    Paint(paint::PaintArgs),

    /// Edit layers
    Layer(layer::LayerArgs),

    /// Edit frames
    Frame(frame::FrameArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Locates the project and its artwork store.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory (holds pxedit.yaml and the store)
    #[arg(long, short = 'C', default_value = ".")]
    pub project: PathBuf,
}

impl ProjectArgs {
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::discover(&self.project)
    }

    /// Load the manifest and open the store it names.
    pub fn open(&self) -> Result<(Manifest, DirectoryStore)> {
        let manifest = self.manifest()?;
        let store = DirectoryStore::open(manifest.store_path(&self.project))?;
        Ok((manifest, store))
    }

    /// Open an editing session on a stored artwork.
    pub fn session(&self, key: &str) -> Result<EditorSession<DirectoryStore>> {
        let (manifest, store) = self.open()?;
        let artwork = load(&store, key)?;
        Ok(EditorSession::new(artwork, store, manifest.session_options()))
    }
}

/// Fetch an artwork, treating a missing key as an error.
pub(crate) fn load(store: &impl ArtworkStore, key: &str) -> Result<Artwork> {
    store.get(key)?.ok_or_else(|| EditError::Store {
        key: key.to_string(),
        message: "no such artwork".to_string(),
    })
}

/// Save the session's artwork, surfacing any store failure.
pub(crate) fn finish(session: EditorSession<DirectoryStore>) -> Result<Artwork> {
    let (artwork, mut store) = session.into_parts();
    store.save(&artwork)?;
    Ok(artwork)
}

/// Map `-v` counts to a log level. Warnings are always shown.
pub fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

//! Export command implementation.
//!
//! Writes a composited frame as PNG, every frame as numbered PNGs, or the
//! whole artwork as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{EditError, Result};
use crate::io::write_json;
use crate::output::{display_path, plural, Printer};
use crate::render::export_frame_png;
use crate::types::Artwork;

use super::{load, ProjectArgs};

/// Output format for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Png,
    Json,
}

/// Export a frame as PNG or the whole artwork as JSON
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,

    /// Output file (default: <key>.png or <key>.json)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, else png)
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Frame to export (1-based)
    #[arg(long, default_value = "1")]
    pub frame: usize,

    /// Export every frame as <output>-<n>.png
    #[arg(long, conflicts_with = "frame")]
    pub all_frames: bool,

    /// Scale factor for PNG output (default: from pxedit.yaml)
    #[arg(long)]
    pub scale: Option<u32>,
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<Vec<PathBuf>> {
    let (manifest, store) = args.project.open()?;
    let artwork = load(&store, &args.key)?;

    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(format_from_extension))
        .unwrap_or(ExportFormat::Png);
    let output = args.output.clone().unwrap_or_else(|| {
        let extension = match format {
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
        };
        PathBuf::from(format!("{}.{}", args.key, extension))
    });
    create_parent(&output)?;

    let written = match format {
        ExportFormat::Json => {
            write_json(&artwork, &output)?;
            vec![output]
        }
        ExportFormat::Png => {
            let scale = args.scale.unwrap_or(manifest.scale).max(1);
            if args.all_frames {
                export_all_frames(&artwork, &output, scale, printer)?
            } else {
                export_one_frame(&artwork, args.frame, &output, scale, printer)?;
                vec![output]
            }
        }
    };

    printer.success(
        "Exported",
        &format!("{} ({})", args.key, plural(written.len(), "file", "files")),
    );
    for path in &written {
        println!("{}", path.display());
    }

    Ok(written)
}

fn export_one_frame(artwork: &Artwork, frame: usize, output: &Path, scale: u32, printer: &Printer) -> Result<()> {
    printer.status(
        "Exporting",
        &format!(
            "{} frame {} ({}x{}) {}",
            artwork.id(),
            frame,
            u64::from(artwork.width()) * u64::from(scale),
            u64::from(artwork.height()) * u64::from(scale),
            printer.dim(&format!("-> {}", display_path(output)))
        ),
    );
    export_frame_png(artwork, frame, output, scale)
}

fn export_all_frames(artwork: &Artwork, output: &Path, scale: u32, printer: &Printer) -> Result<Vec<PathBuf>> {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(artwork.id())
        .to_string();
    let parent = output.parent().unwrap_or(Path::new(""));

    let mut written = Vec::with_capacity(artwork.frame_count());
    for frame in 1..=artwork.frame_count() {
        let path = parent.join(format!("{}-{}.png", stem, frame));
        export_one_frame(artwork, frame, &path, scale, printer)?;
        written.push(path);
    }
    Ok(written)
}

fn format_from_extension(path: &Path) -> Option<ExportFormat> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "png" => Some(ExportFormat::Png),
        "json" => Some(ExportFormat::Json),
        _ => None,
    }
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| EditError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })
        }
        _ => Ok(()),
    }
}

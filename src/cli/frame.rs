//! Frame command implementation.

use clap::{Args, Subcommand};

use crate::error::Result;
use crate::output::{plural, Printer};

use super::{finish, ProjectArgs};

/// Edit frames
#[derive(Args, Debug)]
pub struct FrameArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,

    #[command(subcommand)]
    pub action: FrameAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FrameAction {
    /// Append a frame with the last frame's duration
    Add,
    /// Copy a frame directly after itself
    Duplicate { index: usize },
    /// Delete a frame (the last frame cannot be deleted)
    Delete { index: usize },
    /// Set a frame's duration in milliseconds
    Duration { index: usize, millis: u32 },
}

/// Returns whether the artwork changed.
pub fn run(args: FrameArgs, printer: &Printer) -> Result<bool> {
    let mut session = args.project.session(&args.key)?;

    let selected = match &args.action {
        FrameAction::Add => true,
        FrameAction::Duplicate { index }
        | FrameAction::Delete { index }
        | FrameAction::Duration { index, .. } => session.select_frame(*index),
    };

    let (done, verb) = if !selected {
        (false, "")
    } else {
        match args.action {
            FrameAction::Add => {
                session.add_frame();
                (true, "Added")
            }
            FrameAction::Duplicate { .. } => (session.duplicate_frame(), "Duplicated"),
            FrameAction::Delete { .. } => (session.delete_frame(), "Deleted"),
            FrameAction::Duration { millis, .. } => (session.set_frame_duration(millis), "Updated"),
        }
    };

    if !done {
        printer.warning("Skipped", &format!("frame edit is not possible on {}", args.key));
        return Ok(false);
    }

    let artwork = finish(session)?;
    let timings: Vec<String> = artwork
        .frames()
        .iter()
        .map(|frame| format!("{}ms", frame.duration))
        .collect();
    printer.success(
        verb,
        &format!(
            "{} {}",
            plural(artwork.frame_count(), "frame", "frames"),
            printer.dim(&format!("({})", timings.join(", ")))
        ),
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::project;
    use crate::store::ArtworkStore;
    use crate::types::{Artwork, Colour, RasterBuffer};
    use std::path::Path;
    use tempfile::tempdir;

    fn frame(dir: &Path, action: FrameAction) -> bool {
        run(
            FrameArgs {
                project: project(dir),
                key: "art".to_string(),
                action,
            },
            &Printer::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_frame_edits_persist() {
        let dir = tempdir().unwrap();
        let (_, mut store) = project(dir.path()).open().unwrap();
        let mut artwork = Artwork::new("art", 1, 1);
        let mut buffer = RasterBuffer::new(1, 1);
        buffer.set_pixel(0, 0, Colour::WHITE);
        artwork.layer_mut(0).unwrap().set_frame(1, Some(buffer));
        store.save(&artwork).unwrap();

        assert!(frame(dir.path(), FrameAction::Duration { index: 1, millis: 40 }));
        assert!(frame(dir.path(), FrameAction::Duplicate { index: 1 }));
        assert!(frame(dir.path(), FrameAction::Add));

        let artwork = store.get("art").unwrap().unwrap();
        assert_eq!(artwork.frame_count(), 3);
        assert!(artwork.frames().iter().all(|f| f.duration == 40));
        let layer = artwork.layer(0).unwrap();
        assert_eq!(layer.frame(2).unwrap().get_pixel(0, 0), Colour::WHITE);
        assert!(!layer.has_frame(3));

        assert!(frame(dir.path(), FrameAction::Delete { index: 1 }));
        assert_eq!(store.get("art").unwrap().unwrap().frame_count(), 2);
    }

    #[test]
    fn test_cannot_delete_only_frame() {
        let dir = tempdir().unwrap();
        let (_, mut store) = project(dir.path()).open().unwrap();
        store.save(&Artwork::new("art", 1, 1)).unwrap();

        assert!(!frame(dir.path(), FrameAction::Delete { index: 1 }));
        assert!(!frame(dir.path(), FrameAction::Duplicate { index: 4 }));
    }
}

//! Project manifest (pxedit.yaml) parsing.
//!
//! The manifest sets where artworks are stored and the defaults used for
//! new canvases, editing sessions, and exports. Every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::session::SessionOptions;
use crate::types::DEFAULT_FRAME_DURATION;

/// File name looked up in the project directory.
pub const MANIFEST_FILENAME: &str = "pxedit.yaml";

/// Project manifest loaded from pxedit.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding one JSON document per artwork, relative to the project.
    pub store: PathBuf,

    /// Canvas width for new artworks.
    pub width: u32,

    /// Canvas height for new artworks.
    pub height: u32,

    /// Duration of the first frame of new artworks, in milliseconds.
    pub frame_duration: u32,

    /// Number of undo snapshots kept per session.
    pub history_limit: usize,

    /// Seconds between autosaves; 0 disables autosave.
    pub autosave_secs: u64,

    /// Buffer samples per grid cell.
    pub pixel_size: u32,

    /// Default integer upscale for PNG export.
    pub scale: u32,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            store: PathBuf::from(".pxedit"),
            width: 16,
            height: 16,
            frame_duration: DEFAULT_FRAME_DURATION,
            history_limit: DEFAULT_HISTORY_LIMIT,
            autosave_secs: 10,
            pixel_size: 1,
            scale: 1,
        }
    }
}

impl Manifest {
    /// Load manifest from a pxedit.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EditError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // an empty document deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| EditError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Load `pxedit.yaml` from a project directory, or defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILENAME);
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading manifest");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        let invalid = |field: &str| EditError::Parse {
            message: format!("Invalid manifest: {} must be at least 1", field),
            help: None,
        };
        if self.width == 0 {
            return Err(invalid("width"));
        }
        if self.height == 0 {
            return Err(invalid("height"));
        }
        if self.pixel_size == 0 {
            return Err(invalid("pixel_size"));
        }
        if self.scale == 0 {
            return Err(invalid("scale"));
        }
        Ok(())
    }

    /// Store directory resolved against the project directory.
    pub fn store_path(&self, project: &Path) -> PathBuf {
        project.join(&self.store)
    }

    /// Session options derived from the manifest.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            history_limit: self.history_limit,
            autosave: Duration::from_secs(self.autosave_secs),
            pixel_size: self.pixel_size,
            ..SessionOptions::default()
        }
    }
}

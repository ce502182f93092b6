//! pxedit - Layered, animated pixel-art editing
//!
//! The editing core behind a pixel-art editor: RGBA raster buffers, drawing
//! tools, layers and frames, blend-mode compositing, bounded undo/redo, and
//! pluggable persistence. A thin CLI drives the same core.

pub mod cli;
pub mod error;
pub mod history;
pub mod io;
pub mod manifest;
pub mod output;
pub mod playback;
pub mod render;
pub mod session;
pub mod store;
pub mod tools;
pub mod types;
pub mod viewport;

pub use error::{EditError, Result};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use io::{decode_image, from_json, import_image, read_json, to_json, write_json};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use playback::{Playback, TickHandle};
pub use render::{blend_pixel, composite, composite_frame, export_frame_png, write_png};
pub use session::{Autosave, EditorSession, SessionOptions};
pub use store::{ArtworkStore, DirectoryStore, MemoryStore};
pub use tools::{Cell, EditorState, Tool, ToolOutcome};
pub use types::{
    hex_to_hsl, hex_to_rgb, hsl_to_rgb, normalize_hex, rgb_to_hex, rgb_to_hsl, Artwork, BlendMode,
    Colour, Frame, Hsl, Layer, RasterBuffer,
};
pub use viewport::{Axis, Point, Viewport};

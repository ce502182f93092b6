//! Rendering module for pxedit.
//!
//! This module flattens layers into a single frame buffer and writes
//! frames out as images.

mod blend;
mod compositor;
mod png;

pub use blend::{blend_pixel, blend_rgb};
pub use compositor::{composite, composite_frame};
pub use png::{export_frame_png, scale_buffer, write_png};

//! Core domain types for pxedit.
//!
//! This module contains the document model the editor works on:
//! - `Colour` - RGBA colour values and hex/HSL conversions
//! - `RasterBuffer` - fixed-size RGBA pixel grids
//! - `Layer` - named raster tracks with opacity, blend mode, and per-frame buffers
//! - `Artwork` - the layer stack plus frame timings

mod artwork;
mod buffer;
pub mod colour;
mod layer;

pub use artwork::{Artwork, Frame, DEFAULT_FRAME_DURATION};
pub use buffer::RasterBuffer;
pub use colour::{hex_to_hsl, hex_to_rgb, hsl_to_rgb, normalize_hex, rgb_to_hex, rgb_to_hsl, Colour, Hsl};
pub use layer::{BlendMode, Layer};

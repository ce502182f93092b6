//! Import and export of artworks.
//!
//! - JSON: the full document, for round-tripping between sessions
//! - Images: any format the `image` crate decodes becomes a single-layer,
//!   single-frame artwork
//!
//! PNG export of a composited frame lives in [`crate::render`].

mod image;
mod json;

pub use self::image::{decode_image, import_image};
pub use self::json::{from_json, read_json, to_json, write_json};

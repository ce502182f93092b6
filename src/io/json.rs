//! JSON export and import of whole artworks.
//!
//! The document holds the canvas size, frame timings, and every layer with
//! its frame slots keyed by 1-based frame index. Empty slots are `null`.
//!
//! ```json
//! {
//!   "id": "c0ffee",
//!   "width": 2,
//!   "height": 1,
//!   "frames": [{ "duration": 100 }],
//!   "layers": [{
//!     "name": "Layer 1", "opacity": 100, "blend_mode": "normal",
//!     "visible": true, "locked": false,
//!     "frames": { "1": { "width": 2, "height": 1, "data": [0,0,0,0, 255,0,0,255] } }
//!   }]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EditError, Result};
use crate::types::{Artwork, BlendMode, Frame, Layer, RasterBuffer};

#[derive(Debug, Serialize, Deserialize)]
struct ArtworkDocument {
    id: String,
    width: u32,
    height: u32,
    #[serde(default)]
    frames: Vec<Frame>,
    layers: Vec<LayerDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LayerDocument {
    name: String,
    #[serde(default = "full_opacity")]
    opacity: u8,
    #[serde(default)]
    blend_mode: BlendMode,
    visible: bool,
    locked: bool,
    frames: BTreeMap<usize, Option<RasterBuffer>>,
}

fn full_opacity() -> u8 {
    100
}

/// Serialize an artwork to a pretty-printed JSON document.
pub fn to_json(artwork: &Artwork) -> Result<String> {
    let layers = artwork
        .layers()
        .iter()
        .map(|layer| LayerDocument {
            name: layer.name.clone(),
            opacity: layer.opacity(),
            blend_mode: layer.blend_mode,
            visible: layer.visible,
            locked: layer.locked,
            frames: (1..=layer.frame_count())
                .map(|i| (i, layer.frame(i).cloned()))
                .collect(),
        })
        .collect();

    let document = ArtworkDocument {
        id: artwork.id().to_string(),
        width: artwork.width(),
        height: artwork.height(),
        frames: artwork.frames().to_vec(),
        layers,
    };

    serde_json::to_string_pretty(&document).map_err(|e| EditError::Export {
        message: format!("Failed to serialize artwork: {}", e),
        help: None,
    })
}

/// Parse and validate a JSON document into an artwork.
///
/// Nothing is built unless the whole document is acceptable.
pub fn from_json(source: &str) -> Result<Artwork> {
    let value: Value = serde_json::from_str(source).map_err(|e| EditError::Import {
        message: format!("Not valid JSON: {}", e),
        help: None,
    })?;

    check_shape(&value)?;

    let document: ArtworkDocument = serde_json::from_value(value).map_err(|e| EditError::Import {
        message: format!("Malformed artwork document: {}", e),
        help: None,
    })?;

    build_artwork(document)
}

/// Write an artwork as JSON to a file.
pub fn write_json(artwork: &Artwork, path: &Path) -> Result<()> {
    let json = to_json(artwork)?;
    fs::write(path, json).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write JSON: {}", e),
    })
}

/// Read and validate an artwork JSON file.
pub fn read_json(path: &Path) -> Result<Artwork> {
    let source = fs::read_to_string(path).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    from_json(&source)
}

/// Check the layer shape before attempting a typed parse, so rejections
/// name the offending layer and field.
fn check_shape(value: &Value) -> Result<()> {
    let layers = value
        .get("layers")
        .and_then(Value::as_array)
        .ok_or_else(|| EditError::Import {
            message: "document has no layers array".to_string(),
            help: Some("Export the artwork from pxedit and import that file".to_string()),
        })?;

    if layers.is_empty() {
        return Err(EditError::import("document has no layers"));
    }

    for (i, layer) in layers.iter().enumerate() {
        let Some(layer) = layer.as_object() else {
            return Err(EditError::import(format!("layer {} is not an object", i)));
        };
        if !layer.get("name").is_some_and(Value::is_string) {
            return Err(EditError::import(format!("layer {} has no name", i)));
        }
        if !layer.get("visible").is_some_and(Value::is_boolean) {
            return Err(EditError::import(format!("layer {} is missing visible:boolean", i)));
        }
        if !layer.get("locked").is_some_and(Value::is_boolean) {
            return Err(EditError::import(format!("layer {} is missing locked:boolean", i)));
        }
        if !layer.get("frames").is_some_and(Value::is_object) {
            return Err(EditError::import(format!("layer {} has no frames", i)));
        }
    }

    Ok(())
}

fn build_artwork(document: ArtworkDocument) -> Result<Artwork> {
    let (width, height) = (document.width, document.height);
    if width == 0 || height == 0 {
        return Err(EditError::import(format!("canvas size {}x{} is empty", width, height)));
    }
    if RasterBuffer::byte_len(width, height).is_none() {
        return Err(EditError::import(format!("canvas size {}x{} is too large", width, height)));
    }

    let frame_count = document.frames.len().max(1);
    let mut layers = Vec::with_capacity(document.layers.len());

    for doc in document.layers {
        let mut layer = Layer::new(doc.name, frame_count);
        layer.set_opacity(doc.opacity);
        layer.blend_mode = doc.blend_mode;
        layer.visible = doc.visible;
        layer.locked = doc.locked;

        for (index, slot) in doc.frames {
            let Some(buffer) = slot else {
                continue;
            };
            if buffer.size() != (width, height) {
                return Err(EditError::import(format!(
                    "layer '{}' frame {} is {}x{}, canvas is {}x{}",
                    layer.name,
                    index,
                    buffer.width(),
                    buffer.height(),
                    width,
                    height
                )));
            }
            // re-wrap to check the byte count
            let buffer = RasterBuffer::from_rgba(width, height, buffer.as_raw().to_vec())
                .map_err(|e| EditError::import(format!("layer '{}' frame {}: {}", layer.name, index, e)))?;
            if !layer.set_frame(index, Some(buffer)) {
                tracing::warn!(layer = %layer.name, index, "dropping frame beyond frame count");
            }
        }

        layers.push(layer);
    }

    Ok(Artwork::from_parts(document.id, width, height, layers, document.frames))
}

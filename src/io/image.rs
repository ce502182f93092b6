//! Raster image import.

use std::path::Path;

use image::RgbaImage;

use crate::error::{EditError, Result};
use crate::types::{Artwork, RasterBuffer};

/// Decode an image file into a one-layer, one-frame artwork.
pub fn import_image(path: &Path, id: impl Into<String>) -> Result<Artwork> {
    let image = image::open(path)
        .map_err(|e| EditError::Import {
            message: format!("{}: {}", path.display(), e),
            help: Some("Use a PNG, GIF, BMP, or another format the image decoder supports".to_string()),
        })?
        .to_rgba8();

    artwork_from_image(&image, id)
}

/// Decode in-memory image bytes into a one-layer, one-frame artwork.
pub fn decode_image(bytes: &[u8], id: impl Into<String>) -> Result<Artwork> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| EditError::import(format!("cannot decode image: {}", e)))?
        .to_rgba8();

    artwork_from_image(&image, id)
}

fn artwork_from_image(image: &RgbaImage, id: impl Into<String>) -> Result<Artwork> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EditError::import("image has no pixels"));
    }

    let mut artwork = Artwork::new(id, image.width(), image.height());
    if let Some(layer) = artwork.layer_mut(0) {
        layer.set_frame(1, Some(RasterBuffer::from_image(image)));
    }
    Ok(artwork)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_import_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let artwork = import_image(&path, "imported").unwrap();

        assert_eq!(artwork.id(), "imported");
        assert_eq!(artwork.size(), (3, 2));
        assert_eq!(artwork.layer_count(), 1);
        assert_eq!(artwork.frame_count(), 1);
        let buffer = artwork.layer(0).unwrap().frame(1).unwrap();
        assert_eq!(buffer.get_pixel(2, 1), Colour::rgb(10, 20, 30));
    }

    #[test]
    fn test_import_garbage_fails() {
        let err = decode_image(b"definitely not an image", "x").unwrap_err();
        assert!(matches!(err, EditError::Import { .. }));
    }

    #[test]
    fn test_import_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(import_image(&dir.path().join("nope.png"), "x").is_err());
    }
}

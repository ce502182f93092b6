//! PNG output for composited frames.
//!
//! Converts a flattened frame to a PNG file with optional integer scaling.

use std::path::Path;

use crate::error::{EditError, Result};
use crate::types::{Artwork, RasterBuffer};

use super::composite_frame;

/// Write a buffer to a PNG file.
///
/// # Arguments
///
/// * `buffer` - The pixels to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(buffer: &RasterBuffer, path: &Path, scale: u32) -> Result<()> {
    let scaled = scale_buffer(buffer, scale)?;

    scaled.to_image().save(path).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Composite one frame of an artwork and write it as a PNG.
pub fn export_frame_png(artwork: &Artwork, frame: usize, path: &Path, scale: u32) -> Result<()> {
    if artwork.frame(frame).is_none() {
        return Err(EditError::Export {
            message: format!("Frame {} does not exist", frame),
            help: Some(format!("Frames are numbered 1 to {}", artwork.frame_count())),
        });
    }
    write_png(&composite_frame(artwork, frame), path, scale)
}

/// Scale a buffer by an integer factor.
///
/// Uses nearest-neighbour scaling for crisp pixel art. A scale of 0 is
/// treated as 1. Fails if the scaled size overflows.
pub fn scale_buffer(buffer: &RasterBuffer, scale: u32) -> Result<RasterBuffer> {
    if scale <= 1 {
        return Ok(buffer.clone());
    }

    let too_large = || EditError::Export {
        message: format!(
            "{}x{} at scale {} is too large",
            buffer.width(),
            buffer.height(),
            scale
        ),
        help: Some("Use a smaller scale".to_string()),
    };
    let width = buffer.width().checked_mul(scale).ok_or_else(too_large)?;
    let height = buffer.height().checked_mul(scale).ok_or_else(too_large)?;
    let mut scaled = RasterBuffer::try_new(width, height).map_err(|_| too_large())?;

    for (x, y, colour) in buffer.pixels() {
        for sy in 0..scale {
            for sx in 0..scale {
                scaled.set_pixel(x * scale + sx, y * scale + sy, colour);
            }
        }
    }

    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use tempfile::tempdir;

    fn checker() -> RasterBuffer {
        let mut buffer = RasterBuffer::new(2, 2);
        buffer.set_pixel(0, 0, Colour::BLACK);
        buffer.set_pixel(1, 0, Colour::WHITE);
        buffer.set_pixel(0, 1, Colour::WHITE);
        buffer.set_pixel(1, 1, Colour::BLACK);
        buffer
    }

    #[test]
    fn test_write_png_simple() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        write_png(&checker(), &path, 1).unwrap();

        assert!(path.exists());

        // Read back and verify
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]); // Black
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]); // White
    }

    #[test]
    fn test_write_png_scaled() {
        let mut buffer = RasterBuffer::new(2, 1);
        buffer.set_pixel(0, 0, Colour::rgb(255, 0, 0));
        buffer.set_pixel(1, 0, Colour::rgb(0, 255, 0));

        let dir = tempdir().unwrap();
        let path = dir.path().join("scaled.png");

        write_png(&buffer, &path, 2).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]); // Red (scaled)
        assert_eq!(img.get_pixel(2, 1).0, [0, 255, 0, 255]); // Green (scaled)
    }

    #[test]
    fn test_write_png_with_transparency() {
        let mut buffer = RasterBuffer::new(2, 1);
        buffer.set_pixel(1, 0, Colour::new(255, 0, 0, 128));

        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");

        write_png(&buffer, &path, 1).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_scale_buffer() {
        let scaled = scale_buffer(&checker(), 2).unwrap();

        assert_eq!(scaled.size(), (4, 4));
        assert_eq!(scaled.get_pixel(1, 1), Colour::BLACK);
        assert_eq!(scaled.get_pixel(2, 0), Colour::WHITE);
        assert_eq!(scaled.get_pixel(3, 3), Colour::BLACK);
    }

    #[test]
    fn test_scale_zero_treated_as_one() {
        assert_eq!(scale_buffer(&checker(), 0).unwrap(), checker());
    }

    #[test]
    fn test_scale_overflow_is_an_export_error() {
        let err = scale_buffer(&checker(), u32::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, EditError::Export { .. }));

        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        assert!(write_png(&checker(), &path, u32::MAX).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_export_matches_preview() {
        let mut artwork = Artwork::new("a", 2, 2);
        artwork
            .layer_mut(0)
            .unwrap()
            .frame_or_blank(1, 2, 2)
            .unwrap()
            .set_pixel(1, 1, Colour::new(30, 60, 90, 200));
        artwork.set_opacity(0, 80);

        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        export_frame_png(&artwork, 1, &path, 1).unwrap();

        let exported = RasterBuffer::from_image(&image::open(&path).unwrap().to_rgba8());
        assert_eq!(exported, composite_frame(&artwork, 1));
    }

    #[test]
    fn test_export_missing_frame_fails() {
        let artwork = Artwork::new("a", 1, 1);
        let dir = tempdir().unwrap();
        let err = export_frame_png(&artwork, 2, &dir.path().join("x.png"), 1).unwrap_err();
        assert!(matches!(err, EditError::Export { .. }));
    }
}

//! Raster buffer - a fixed-size grid of RGBA samples.

use image::{ImageBuffer, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

use super::Colour;

/// A width x height grid of 8-bit RGBA samples, stored row-major.
///
/// Buffers never grow or shrink after creation. Reads and writes outside
/// the grid panic; tools check bounds with [`RasterBuffer::contains`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Create a fully transparent buffer.
    ///
    /// # Panics
    ///
    /// If the byte length does not fit in `usize`. Use [`RasterBuffer::try_new`]
    /// for sizes that come from outside the program.
    pub fn new(width: u32, height: u32) -> Self {
        match Self::try_new(width, height) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a fully transparent buffer, rejecting sizes whose byte length overflows.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let len = Self::byte_len(width, height).ok_or_else(|| too_large(width, height))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Bytes needed for a `width` x `height` RGBA buffer, or `None` on overflow.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize).checked_mul(height as usize)?.checked_mul(4)
    }

    /// Wrap existing RGBA bytes. The length must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height).ok_or_else(|| too_large(width, height))?;
        if data.len() != expected {
            return Err(EditError::Parse {
                message: format!(
                    "pixel data for a {}x{} buffer must hold {} bytes, got {}",
                    width,
                    height,
                    expected,
                    data.len()
                ),
                help: None,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the width in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether a signed coordinate lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read a sample.
    pub fn get_pixel(&self, x: u32, y: u32) -> Colour {
        let i = self.offset(x, y);
        Colour::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Read a sample, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        (x < self.width && y < self.height).then(|| self.get_pixel(x, y))
    }

    /// Write a sample.
    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&colour.to_rgba());
    }

    /// Make a sample fully transparent.
    pub fn clear_pixel(&mut self, x: u32, y: u32) {
        self.set_pixel(x, y, Colour::TRANSPARENT);
    }

    /// Make every sample fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Check if every sample has zero alpha.
    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Iterate over all samples with their positions.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Colour)> + '_ {
        let width = self.width;
        self.data.chunks_exact(4).enumerate().map(move |(i, px)| {
            let i = i as u32;
            (i % width, i / width, Colour::new(px[0], px[1], px[2], px[3]))
        })
    }

    /// Copy into an `image` RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| ImageBuffer::new(self.width, self.height))
    }

    /// Copy out of an `image` RGBA image.
    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().clone(),
        }
    }
}

fn too_large(width: u32, height: u32) -> EditError {
    EditError::Parse {
        message: format!("a {}x{} buffer is too large to address", width, height),
        help: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buffer = RasterBuffer::new(3, 2);
        assert_eq!(buffer.size(), (3, 2));
        assert_eq!(buffer.as_raw().len(), 24);
        assert!(buffer.is_transparent());
    }

    #[test]
    fn test_set_get_clear() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.set_pixel(2, 1, Colour::rgb(10, 20, 30));
        assert_eq!(buffer.get_pixel(2, 1), Colour::rgb(10, 20, 30));
        assert_eq!(buffer.get_pixel(1, 2), Colour::TRANSPARENT);

        buffer.clear_pixel(2, 1);
        assert_eq!(buffer.get_pixel(2, 1).a, 0);
        assert!(buffer.is_transparent());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buffer = RasterBuffer::new(2, 2);
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.get(1, 1), Some(Colour::TRANSPARENT));
        assert!(!buffer.contains(-1, 0));
        assert!(!buffer.contains(0, 2));
        assert!(buffer.contains(1, 1));
    }

    #[test]
    #[should_panic]
    fn test_get_pixel_out_of_bounds_panics() {
        RasterBuffer::new(2, 2).get_pixel(5, 0);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = RasterBuffer::new(2, 2);
        let copy = original.clone();
        original.set_pixel(0, 0, Colour::WHITE);
        assert!(copy.is_transparent());
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterBuffer::from_rgba(1, 1, vec![1, 2, 3, 4]).is_ok());
        assert!(RasterBuffer::from_rgba(2, 1, vec![1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_oversized_buffers_are_rejected() {
        assert_eq!(RasterBuffer::byte_len(3, 2), Some(24));
        assert_eq!(RasterBuffer::byte_len(u32::MAX, u32::MAX), None);
        assert!(RasterBuffer::try_new(u32::MAX, u32::MAX).is_err());
        assert!(RasterBuffer::from_rgba(u32::MAX, u32::MAX, vec![0; 4]).is_err());
    }

    #[test]
    fn test_pixels_iterates_row_major() {
        let mut buffer = RasterBuffer::new(2, 2);
        buffer.set_pixel(1, 0, Colour::WHITE);
        let cells: Vec<_> = buffer.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(buffer.pixels().nth(1).map(|p| p.2), Some(Colour::WHITE));
    }

    #[test]
    fn test_image_round_trip() {
        let mut buffer = RasterBuffer::new(2, 1);
        buffer.set_pixel(0, 0, Colour::new(1, 2, 3, 4));
        let image = buffer.to_image();
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 4]);
        assert_eq!(RasterBuffer::from_image(&image), buffer);
    }
}

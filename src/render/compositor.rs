//! Compositor - flattens the visible layers of one frame into a single buffer.
//!
//! The preview and every export go through [`composite`], so a frame always
//! flattens to the same bytes no matter who asks.

use crate::types::{Artwork, Layer, RasterBuffer};

use super::blend::blend_pixel;

/// Flatten the layers of a 1-based frame, bottom layer first.
///
/// Hidden layers and empty frame slots are skipped. Each layer is drawn with
/// its blend mode at `opacity / 100` alpha onto an initially transparent
/// canvas of `width` x `height`.
pub fn composite(layers: &[Layer], frame: usize, width: u32, height: u32) -> RasterBuffer {
    let mut output = RasterBuffer::new(width, height);

    for layer in layers {
        if !layer.visible {
            continue;
        }
        let Some(source) = layer.frame(frame) else {
            continue;
        };

        let opacity = layer.opacity() as f32 / 100.0;
        let w = width.min(source.width());
        let h = height.min(source.height());

        for y in 0..h {
            for x in 0..w {
                let src = source.get_pixel(x, y);
                if src.a == 0 {
                    continue;
                }
                let dst = output.get_pixel(x, y);
                output.set_pixel(x, y, blend_pixel(dst, src, layer.blend_mode, opacity));
            }
        }
    }

    output
}

/// Flatten one frame of an artwork at canvas size.
pub fn composite_frame(artwork: &Artwork, frame: usize) -> RasterBuffer {
    composite(artwork.layers(), frame, artwork.width(), artwork.height())
}

//! Layer type and blend modes.
//!
//! A layer is a named raster track holding one buffer slot per frame.
//! Slots are indexed from 1; an empty slot (`None`) is distinct from a
//! buffer that happens to be fully transparent.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

use super::RasterBuffer;

/// How a layer combines with the layers beneath it.
///
/// Names match the canvas compositing operations they stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    #[serde(rename = "normal", alias = "source-over")]
    Normal,
    #[serde(rename = "multiply")]
    Multiply,
    #[serde(rename = "screen")]
    Screen,
    #[serde(rename = "overlay")]
    Overlay,
    #[serde(rename = "darken")]
    Darken,
    #[serde(rename = "lighten")]
    Lighten,
    #[serde(rename = "color-dodge")]
    ColourDodge,
    #[serde(rename = "color-burn")]
    ColourBurn,
    #[serde(rename = "hard-light")]
    HardLight,
    #[serde(rename = "soft-light")]
    SoftLight,
    #[serde(rename = "difference")]
    Difference,
    #[serde(rename = "exclusion")]
    Exclusion,
    #[serde(rename = "hue")]
    Hue,
    #[serde(rename = "saturation")]
    Saturation,
    #[serde(rename = "color")]
    Colour,
    #[serde(rename = "luminosity")]
    Luminosity,
}

impl BlendMode {
    /// Every blend mode, in menu order.
    pub const ALL: [BlendMode; 16] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColourDodge,
        BlendMode::ColourBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Colour,
        BlendMode::Luminosity,
    ];

    /// The canvas-style name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColourDodge => "color-dodge",
            BlendMode::ColourBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Colour => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace("colour", "color");
        if wanted == "source-over" {
            return Ok(BlendMode::Normal);
        }
        BlendMode::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| EditError::Parse {
                message: format!("Unknown blend mode: {}", s),
                help: Some(format!(
                    "Available modes: {}",
                    BlendMode::ALL.map(BlendMode::name).join(", ")
                )),
            })
    }
}

/// A named raster track.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Display name.
    pub name: String,

    /// Opacity percentage, 0-100.
    opacity: u8,

    /// Blend mode used when compositing onto lower layers.
    pub blend_mode: BlendMode,

    /// Hidden layers are skipped by the compositor.
    pub visible: bool,

    /// Locked layers reject drawing tools.
    pub locked: bool,

    /// Buffer slot per frame; `frames[0]` is frame 1.
    frames: Vec<Option<Arc<RasterBuffer>>>,
}

impl Layer {
    /// Create a visible, unlocked, fully opaque layer with `frame_count` empty slots.
    pub fn new(name: impl Into<String>, frame_count: usize) -> Self {
        Self {
            name: name.into(),
            opacity: 100,
            blend_mode: BlendMode::Normal,
            visible: true,
            locked: false,
            frames: vec![None; frame_count],
        }
    }

    /// Get the opacity percentage.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Set the opacity percentage, clamped to 100.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity.min(100);
    }

    /// Number of frame slots.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Buffer at a 1-based frame index, if the slot exists and is filled.
    pub fn frame(&self, index: usize) -> Option<&RasterBuffer> {
        self.slot(index)?.as_deref()
    }

    /// Mutable buffer at a 1-based frame index.
    ///
    /// A buffer shared with a history snapshot is copied before it is handed out.
    pub fn frame_mut(&mut self, index: usize) -> Option<&mut RasterBuffer> {
        let slot = index.checked_sub(1).and_then(|i| self.frames.get_mut(i))?;
        slot.as_mut().map(Arc::make_mut)
    }

    /// Mutable buffer at a frame index, creating a transparent one if the slot is empty.
    pub fn frame_or_blank(&mut self, index: usize, width: u32, height: u32) -> Option<&mut RasterBuffer> {
        let slot = index.checked_sub(1).and_then(|i| self.frames.get_mut(i))?;
        let buffer = slot.get_or_insert_with(|| Arc::new(RasterBuffer::new(width, height)));
        Some(Arc::make_mut(buffer))
    }

    /// Replace the buffer in a slot. Returns false if the slot does not exist.
    pub fn set_frame(&mut self, index: usize, buffer: Option<RasterBuffer>) -> bool {
        match index.checked_sub(1).and_then(|i| self.frames.get_mut(i)) {
            Some(slot) => {
                *slot = buffer.map(Arc::new);
                true
            }
            None => false,
        }
    }

    /// Check if a slot holds a buffer.
    pub fn has_frame(&self, index: usize) -> bool {
        self.frame(index).is_some()
    }

    fn slot(&self, index: usize) -> Option<&Option<Arc<RasterBuffer>>> {
        index.checked_sub(1).and_then(|i| self.frames.get(i))
    }

    /// Copy of this layer whose buffers share nothing with the original.
    pub fn deep_clone(&self) -> Self {
        Self {
            frames: self
                .frames
                .iter()
                .map(|slot| slot.as_deref().map(|b| Arc::new(b.clone())))
                .collect(),
            ..self.clone()
        }
    }

    /// Insert a copy of the slot at `index` right after it.
    pub(crate) fn duplicate_slot(&mut self, index: usize) {
        let copy = self.frames[index - 1]
            .as_deref()
            .map(|b| Arc::new(b.clone()));
        self.frames.insert(index, copy);
    }

    pub(crate) fn push_slot(&mut self) {
        self.frames.push(None);
    }

    pub(crate) fn remove_slot(&mut self, index: usize) {
        self.frames.remove(index - 1);
    }

    /// Pad with empty slots or drop trailing slots so exactly `count` remain.
    pub(crate) fn reconcile(&mut self, count: usize) {
        self.frames.resize(count, None);
    }

    /// Check whether two layers point at the very same buffer allocation for a frame.
    #[cfg(test)]
    pub(crate) fn shares_buffer_with(&self, other: &Layer, index: usize) -> bool {
        match (self.slot(index), other.slot(index)) {
            (Some(Some(a)), Some(Some(b))) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

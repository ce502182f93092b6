//! Artwork - the editable document.
//!
//! An artwork is an ordered stack of layers (index 0 is the bottom) plus a
//! list of frame timings. Every layer holds exactly one slot per frame.
//!
//! Structural operations never fail. When an operation is not allowed
//! (deleting the last layer, deleting the only frame, an index out of
//! range) it leaves the artwork untouched and returns `false`.

use serde::{Deserialize, Serialize};

use super::{BlendMode, Layer};

/// Frame duration used for new artworks, in milliseconds.
pub const DEFAULT_FRAME_DURATION: u32 = 100;

/// Timing for one frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// How long the frame is shown during playback, in milliseconds.
    pub duration: u32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FRAME_DURATION,
        }
    }
}

/// A layered, framed pixel document.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    id: String,
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    frames: Vec<Frame>,
}

impl Artwork {
    /// Create an artwork with one empty layer and one frame.
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            layers: vec![Layer::new("Layer 1", 1)],
            frames: vec![Frame::default()],
        }
    }

    /// Assemble an artwork from parts, reconciling every layer's frame slots.
    ///
    /// At least one layer and one frame are always present afterwards.
    pub fn from_parts(
        id: impl Into<String>,
        width: u32,
        height: u32,
        layers: Vec<Layer>,
        frames: Vec<Frame>,
    ) -> Self {
        let mut artwork = Self {
            id: id.into(),
            width,
            height,
            layers,
            frames,
        };
        if artwork.frames.is_empty() {
            artwork.frames.push(Frame::default());
        }
        if artwork.layers.is_empty() {
            artwork.layers.push(Layer::new("Layer 1", 0));
        }
        artwork.validate();
        artwork
    }

    /// Unique identifier, used as the store key.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Frame timings; `frames()[0]` is frame 1.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Timing of a 1-based frame index.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        index.checked_sub(1).and_then(|i| self.frames.get(i))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn has_frame(&self, index: usize) -> bool {
        index >= 1 && index <= self.frames.len()
    }

    /// Append `Layer N` on top. Returns the new layer's index.
    pub fn add_layer(&mut self) -> usize {
        let name = format!("Layer {}", self.layers.len() + 1);
        self.layers.push(Layer::new(name, self.frames.len()));
        tracing::debug!(id = %self.id, layers = self.layers.len(), "added layer");
        self.layers.len() - 1
    }

    /// Insert a deep copy of a layer directly above it.
    pub fn duplicate_layer(&mut self, index: usize) -> bool {
        let Some(layer) = self.layers.get(index) else {
            return false;
        };
        let mut copy = layer.deep_clone();
        copy.name = format!("{} copy", layer.name);
        self.layers.insert(index + 1, copy);
        true
    }

    /// Swap a layer with the one above it.
    pub fn move_layer_up(&mut self, index: usize) -> bool {
        if index + 1 >= self.layers.len() {
            return false;
        }
        self.layers.swap(index, index + 1);
        true
    }

    /// Swap a layer with the one below it.
    pub fn move_layer_down(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.layers.len() {
            return false;
        }
        self.layers.swap(index, index - 1);
        true
    }

    /// Remove a layer. The last remaining layer cannot be deleted.
    pub fn delete_layer(&mut self, index: usize) -> bool {
        if self.layers.len() <= 1 || index >= self.layers.len() {
            return false;
        }
        self.layers.remove(index);
        tracing::debug!(id = %self.id, index, "deleted layer");
        true
    }

    /// Append a frame reusing the last frame's duration. Returns the new frame index.
    pub fn add_frame(&mut self) -> usize {
        let timing = self.frames.last().copied().unwrap_or_default();
        self.frames.push(timing);
        for layer in &mut self.layers {
            layer.push_slot();
        }
        self.validate();
        self.frames.len()
    }

    /// Insert a copy of a frame right after it, shifting later frames up.
    pub fn duplicate_frame(&mut self, index: usize) -> bool {
        if !self.has_frame(index) {
            return false;
        }
        let timing = self.frames[index - 1];
        self.frames.insert(index, timing);
        for layer in &mut self.layers {
            layer.duplicate_slot(index);
        }
        self.validate();
        true
    }

    /// Remove a frame, shifting later frames down. The only frame cannot be deleted.
    pub fn delete_frame(&mut self, index: usize) -> bool {
        if self.frames.len() <= 1 || !self.has_frame(index) {
            return false;
        }
        self.frames.remove(index - 1);
        for layer in &mut self.layers {
            layer.remove_slot(index);
        }
        self.validate();
        tracing::debug!(id = %self.id, index, "deleted frame");
        true
    }

    /// Set a frame's duration in milliseconds (at least 1).
    pub fn set_frame_duration(&mut self, index: usize, duration: u32) -> bool {
        match index.checked_sub(1).and_then(|i| self.frames.get_mut(i)) {
            Some(frame) => {
                frame.duration = duration.max(1);
                true
            }
            None => false,
        }
    }

    pub fn toggle_lock(&mut self, index: usize) -> bool {
        self.update_layer(index, |layer| layer.locked = !layer.locked)
    }

    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        self.update_layer(index, |layer| layer.visible = !layer.visible)
    }

    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update_layer(index, |layer| layer.name = name)
    }

    pub fn set_opacity(&mut self, index: usize, opacity: u8) -> bool {
        self.update_layer(index, |layer| layer.set_opacity(opacity))
    }

    pub fn set_blend_mode(&mut self, index: usize, mode: BlendMode) -> bool {
        self.update_layer(index, |layer| layer.blend_mode = mode)
    }

    fn update_layer(&mut self, index: usize, f: impl FnOnce(&mut Layer)) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                f(layer);
                true
            }
            None => false,
        }
    }

    /// Reconcile every layer to exactly one slot per frame index.
    ///
    /// Missing slots become empty, slots past the frame count are dropped.
    pub fn validate(&mut self) {
        let count = self.frames.len();
        for layer in &mut self.layers {
            if layer.frame_count() != count {
                tracing::debug!(layer = %layer.name, from = layer.frame_count(), to = count, "reconciled frame slots");
                layer.reconcile(count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;

    fn painted(artwork: &mut Artwork, layer: usize, frame: usize, colour: Colour) {
        let (w, h) = artwork.size();
        artwork
            .layer_mut(layer)
            .unwrap()
            .frame_or_blank(frame, w, h)
            .unwrap()
            .set_pixel(0, 0, colour);
    }

    fn pixel(artwork: &Artwork, layer: usize, frame: usize) -> Option<Colour> {
        artwork.layer(layer)?.frame(frame).map(|b| b.get_pixel(0, 0))
    }

    fn names(artwork: &Artwork) -> Vec<&str> {
        artwork.layers().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_new_artwork() {
        let artwork = Artwork::new("abc", 16, 8);
        assert_eq!(artwork.id(), "abc");
        assert_eq!(artwork.size(), (16, 8));
        assert_eq!(artwork.layer_count(), 1);
        assert_eq!(artwork.frame_count(), 1);
        assert_eq!(artwork.frame(1).unwrap().duration, DEFAULT_FRAME_DURATION);
    }

    #[test]
    fn test_add_layer_names_and_slots() {
        let mut artwork = Artwork::new("a", 4, 4);
        artwork.add_frame();
        let index = artwork.add_layer();
        assert_eq!(index, 1);
        assert_eq!(names(&artwork), vec!["Layer 1", "Layer 2"]);
        assert_eq!(artwork.layer(1).unwrap().frame_count(), 2);
    }

    #[test]
    fn test_duplicate_layer_is_deep_and_above() {
        let mut artwork = Artwork::new("a", 2, 2);
        artwork.add_layer();
        painted(&mut artwork, 0, 1, Colour::WHITE);

        assert!(artwork.duplicate_layer(0));
        assert_eq!(names(&artwork), vec!["Layer 1", "Layer 1 copy", "Layer 2"]);
        assert_eq!(pixel(&artwork, 1, 1), Some(Colour::WHITE));

        painted(&mut artwork, 0, 1, Colour::BLACK);
        assert_eq!(pixel(&artwork, 1, 1), Some(Colour::WHITE));
        assert!(!artwork.duplicate_layer(9));
    }

    #[test]
    fn test_move_layer_boundaries() {
        let mut artwork = Artwork::new("a", 1, 1);
        artwork.add_layer();
        assert!(!artwork.move_layer_up(1));
        assert!(!artwork.move_layer_down(0));
        assert!(artwork.move_layer_up(0));
        assert_eq!(names(&artwork), vec!["Layer 2", "Layer 1"]);
        assert!(artwork.move_layer_down(1));
        assert_eq!(names(&artwork), vec!["Layer 1", "Layer 2"]);
    }

    #[test]
    fn test_delete_last_layer_is_rejected() {
        let mut artwork = Artwork::new("a", 1, 1);
        assert!(!artwork.delete_layer(0));
        assert_eq!(artwork.layer_count(), 1);

        artwork.add_layer();
        assert!(artwork.delete_layer(0));
        assert_eq!(names(&artwork), vec!["Layer 2"]);
    }

    #[test]
    fn test_add_frame_copies_last_duration() {
        let mut artwork = Artwork::new("a", 1, 1);
        artwork.set_frame_duration(1, 250);
        assert_eq!(artwork.add_frame(), 2);
        assert_eq!(artwork.frame(2).unwrap().duration, 250);
        assert!(!artwork.layer(0).unwrap().has_frame(2));
    }

    #[test]
    fn test_duplicate_frame_shifts_later_frames() {
        let mut artwork = Artwork::new("a", 1, 1);
        artwork.add_frame();
        painted(&mut artwork, 0, 1, Colour::WHITE);
        painted(&mut artwork, 0, 2, Colour::BLACK);

        assert!(artwork.duplicate_frame(1));
        assert_eq!(artwork.frame_count(), 3);
        assert_eq!(pixel(&artwork, 0, 1), Some(Colour::WHITE));
        assert_eq!(pixel(&artwork, 0, 2), Some(Colour::WHITE));
        assert_eq!(pixel(&artwork, 0, 3), Some(Colour::BLACK));

        painted(&mut artwork, 0, 2, Colour::rgb(1, 2, 3));
        assert_eq!(pixel(&artwork, 0, 1), Some(Colour::WHITE));
        assert!(!artwork.duplicate_frame(4));
    }

    #[test]
    fn test_delete_only_frame_is_rejected() {
        let mut artwork = Artwork::new("a", 1, 1);
        assert!(!artwork.delete_frame(1));
        assert_eq!(artwork.frame_count(), 1);
    }

    #[test]
    fn test_delete_frame_out_of_range_is_rejected() {
        let mut artwork = Artwork::new("a", 1, 1);
        artwork.add_frame();
        assert!(!artwork.delete_frame(0));
        assert!(!artwork.delete_frame(3));
        assert_eq!(artwork.frame_count(), 2);
    }

    #[test]
    fn test_delete_frame_closes_gap() {
        let mut artwork = Artwork::new("a", 1, 1);
        artwork.add_frame();
        artwork.add_frame();
        painted(&mut artwork, 0, 3, Colour::WHITE);

        assert!(artwork.delete_frame(2));
        assert_eq!(artwork.frame_count(), 2);
        assert_eq!(pixel(&artwork, 0, 2), Some(Colour::WHITE));
        assert_eq!(artwork.layer(0).unwrap().frame_count(), 2);
    }

    #[test]
    fn test_add_then_delete_frame_restores_state() {
        let mut artwork = Artwork::new("a", 2, 2);
        artwork.add_layer();
        painted(&mut artwork, 0, 1, Colour::WHITE);
        painted(&mut artwork, 1, 1, Colour::rgb(9, 9, 9));
        let before = artwork.clone();

        let index = artwork.add_frame();
        assert!(artwork.delete_frame(index));

        assert_eq!(artwork, before);
    }

    #[test]
    fn test_layer_field_updates() {
        let mut artwork = Artwork::new("a", 1, 1);
        assert!(artwork.toggle_lock(0));
        assert!(artwork.toggle_visibility(0));
        assert!(artwork.rename_layer(0, "Ink"));
        assert!(artwork.set_opacity(0, 55));
        assert!(artwork.set_blend_mode(0, BlendMode::Multiply));

        let layer = artwork.layer(0).unwrap();
        assert!(layer.locked);
        assert!(!layer.visible);
        assert_eq!(layer.name, "Ink");
        assert_eq!(layer.opacity(), 55);
        assert_eq!(layer.blend_mode, BlendMode::Multiply);

        assert!(!artwork.toggle_lock(3));
    }

    #[test]
    fn test_from_parts_reconciles_slots() {
        let short = Layer::new("short", 1);
        let long = Layer::new("long", 5);
        let artwork = Artwork::from_parts("a", 1, 1, vec![short, long], vec![Frame::default(); 3]);
        for layer in artwork.layers() {
            assert_eq!(layer.frame_count(), 3);
        }
    }

    #[test]
    fn test_from_parts_never_empty() {
        let artwork = Artwork::from_parts("a", 1, 1, vec![], vec![]);
        assert_eq!(artwork.layer_count(), 1);
        assert_eq!(artwork.frame_count(), 1);
        assert_eq!(artwork.layer(0).unwrap().frame_count(), 1);
    }
}

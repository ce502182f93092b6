//! The editing session.
//!
//! A session exclusively owns one artwork and threads every edit through the
//! same path: pointer position → [`Viewport`] → grid cell → tool → artwork →
//! [`History`] → store. Saves are best-effort. A failed save is logged and
//! the in-memory artwork stays authoritative.

use std::time::{Duration, Instant};

use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::playback::{Playback, TickHandle};
use crate::render::composite_frame;
use crate::store::ArtworkStore;
use crate::tools::{self, Cell, EditorState, Tool, ToolOutcome};
use crate::types::{Artwork, BlendMode, Colour, RasterBuffer};
use crate::viewport::{Point, Viewport};

/// Default autosave period.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(10);

/// Periodic save schedule, independent of per-stroke commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autosave {
    interval: Duration,
    last: Instant,
}

impl Autosave {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a save is due at `now`. A zero interval disables autosave.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.interval.is_zero() && now.saturating_duration_since(self.last) >= self.interval
    }

    /// Restart the period from `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Session tuning, usually taken from the project manifest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub history_limit: usize,
    pub autosave: Duration,
    pub pixel_size: u32,
    /// Display container size used for pointer mapping.
    pub container: (f64, f64),
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            autosave: DEFAULT_AUTOSAVE_INTERVAL,
            pixel_size: 1,
            container: (512.0, 512.0),
        }
    }
}

/// One artwork being edited.
#[derive(Debug)]
pub struct EditorSession<S: ArtworkStore> {
    artwork: Artwork,
    state: EditorState,
    history: History,
    store: S,
    viewport: Viewport,
    autosave: Autosave,
    playback: Playback,
    drawing: bool,
    stroke_changed: bool,
}

impl<S: ArtworkStore> EditorSession<S> {
    /// Open a session on an artwork. The artwork becomes the first history entry.
    pub fn new(artwork: Artwork, store: S, options: SessionOptions) -> Self {
        let state = EditorState {
            pixel_size: options.pixel_size.max(1),
            ..EditorState::default()
        };
        let (grid_w, grid_h) = grid_for(&artwork, state.pixel_size);
        let viewport = Viewport::new(grid_w, grid_h, options.container.0, options.container.1);

        let mut history = History::new(options.history_limit);
        history.commit(&artwork);

        Self {
            artwork,
            state,
            history,
            store,
            viewport,
            autosave: Autosave::new(options.autosave, Instant::now()),
            playback: Playback::new(),
            drawing: false,
            stroke_changed: false,
        }
    }

    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Give up the session, returning its artwork and store.
    pub fn into_parts(self) -> (Artwork, S) {
        (self.artwork, self.store)
    }

    // Selection

    pub fn set_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.state.colour = colour;
    }

    /// Select a layer. Returns false if it does not exist.
    pub fn select_layer(&mut self, index: usize) -> bool {
        if index >= self.artwork.layer_count() {
            return false;
        }
        self.state.layer = index;
        true
    }

    /// Select a 1-based frame. Returns false if it does not exist.
    pub fn select_frame(&mut self, index: usize) -> bool {
        if index == 0 || index > self.artwork.frame_count() {
            return false;
        }
        self.state.frame = index;
        self.playback.seek(index - 1);
        true
    }

    /// Change the cell size in buffer samples; the grid shrinks accordingly.
    pub fn set_pixel_size(&mut self, pixel_size: u32) {
        self.state.pixel_size = pixel_size.max(1);
        let (grid_w, grid_h) = grid_for(&self.artwork, self.state.pixel_size);
        self.viewport.set_grid(grid_w, grid_h);
    }

    pub fn resize(&mut self, container_width: f64, container_height: f64) {
        self.viewport.resize(container_width, container_height);
    }

    // Pointer events

    /// Start a stroke. Drag tools paint immediately.
    pub fn pointer_down(&mut self, point: Point) -> ToolOutcome {
        let cell = self.viewport.to_cell(point);
        self.drawing = true;
        self.stroke_changed = false;
        if self.state.tool.is_drag() {
            self.stroke(cell)
        } else {
            ToolOutcome::Unchanged
        }
    }

    /// Continue a stroke. Ignored unless a drag tool is drawing.
    pub fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        if !self.drawing || !self.state.tool.is_drag() {
            return ToolOutcome::Unchanged;
        }
        let cell = self.viewport.to_cell(point);
        self.stroke(cell)
    }

    /// Finish a stroke. Fill and picker apply here; the stroke is committed
    /// if anything changed.
    pub fn pointer_up(&mut self, point: Point) -> ToolOutcome {
        if !self.drawing {
            return ToolOutcome::Unchanged;
        }
        let outcome = if self.state.tool.is_drag() {
            ToolOutcome::Unchanged
        } else {
            let cell = self.viewport.to_cell(point);
            self.stroke(cell)
        };
        self.end_stroke();
        outcome
    }

    /// The pointer left the canvas. Any stroke in progress ends as it stands.
    pub fn pointer_leave(&mut self) {
        if self.drawing {
            self.end_stroke();
        }
    }

    /// Apply the active tool once at a grid cell and commit, as a click would.
    pub fn click_cell(&mut self, cell: Cell) -> ToolOutcome {
        self.stroke_cells(&[cell])
            .pop()
            .unwrap_or(ToolOutcome::Unchanged)
    }

    /// Apply the active tool at each cell in turn as one stroke with a single commit.
    pub fn stroke_cells(&mut self, cells: &[Cell]) -> Vec<ToolOutcome> {
        self.drawing = true;
        self.stroke_changed = false;
        let outcomes = cells.iter().map(|&cell| self.stroke(cell)).collect();
        self.end_stroke();
        outcomes
    }

    fn stroke(&mut self, cell: Cell) -> ToolOutcome {
        let outcome = self.apply_tool(cell);
        match outcome {
            ToolOutcome::Painted => self.stroke_changed = true,
            ToolOutcome::Picked(colour) => self.state.colour = colour,
            ToolOutcome::Unchanged | ToolOutcome::NoColour => {}
        }
        outcome
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
        if std::mem::take(&mut self.stroke_changed) {
            self.commit();
        }
    }

    fn apply_tool(&mut self, cell: Cell) -> ToolOutcome {
        let EditorState {
            tool,
            colour,
            layer,
            frame,
            pixel_size,
        } = self.state;
        let (width, height) = self.artwork.size();
        let in_grid = self.in_grid(cell);

        let Some(target) = self.artwork.layer_mut(layer) else {
            return ToolOutcome::Unchanged;
        };

        if !tool.mutates() {
            let picked = match target.frame(frame) {
                Some(buffer) => tools::pick(buffer, cell, pixel_size),
                None => in_grid.then_some(Colour::TRANSPARENT),
            };
            return picked.map_or(ToolOutcome::NoColour, ToolOutcome::Picked);
        }

        if target.locked {
            tracing::debug!(layer, tool = %tool, "layer is locked, ignoring tool");
            return ToolOutcome::Unchanged;
        }
        if !in_grid || (tool == Tool::Eraser && !target.has_frame(frame)) {
            return ToolOutcome::Unchanged;
        }

        match target.frame_or_blank(frame, width, height) {
            Some(buffer) => tools::apply(tool, buffer, cell, colour, pixel_size),
            None => ToolOutcome::Unchanged,
        }
    }

    fn in_grid(&self, cell: Cell) -> bool {
        let (grid_w, grid_h) = grid_for(&self.artwork, self.state.pixel_size);
        cell.x >= 0 && cell.y >= 0 && cell.x < i64::from(grid_w) && cell.y < i64::from(grid_h)
    }

    // Commits

    /// Snapshot into history and save.
    pub fn commit(&mut self) {
        self.history.commit(&self.artwork);
        tracing::debug!(
            id = self.artwork.id(),
            entries = self.history.len(),
            "committed"
        );
        self.save();
    }

    /// Save the artwork, logging any failure. Returns whether it was stored.
    pub fn save(&mut self) -> bool {
        match self.store.save(&self.artwork) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    id = self.artwork.id(),
                    error = %err,
                    "save failed, keeping in-memory state"
                );
                false
            }
        }
    }

    /// Save if the autosave period has elapsed. Returns whether a save was attempted.
    pub fn poll_autosave(&mut self, now: Instant) -> bool {
        if !self.autosave.is_due(now) {
            return false;
        }
        self.autosave.mark(now);
        tracing::debug!(id = self.artwork.id(), "autosave");
        self.save();
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Artwork) {
        self.artwork = snapshot;
        self.drawing = false;
        self.stroke_changed = false;
        self.clamp_selection();
        self.save();
    }

    fn clamp_selection(&mut self) {
        let layers = self.artwork.layer_count();
        let frames = self.artwork.frame_count();
        self.state.layer = self.state.layer.min(layers.saturating_sub(1));
        self.state.frame = self.state.frame.clamp(1, frames.max(1));
        self.playback.seek(self.state.frame - 1);
    }

    // Structural edits

    fn edit(&mut self, f: impl FnOnce(&mut Artwork) -> bool) -> bool {
        if !f(&mut self.artwork) {
            return false;
        }
        self.clamp_selection();
        self.commit();
        true
    }

    /// Add a layer on top and select it.
    pub fn add_layer(&mut self) -> usize {
        let index = self.artwork.add_layer();
        self.state.layer = index;
        self.commit();
        index
    }

    /// Duplicate the active layer and select the copy.
    pub fn duplicate_layer(&mut self) -> bool {
        let index = self.state.layer;
        let done = self.edit(|artwork| artwork.duplicate_layer(index));
        if done {
            self.state.layer = index + 1;
        }
        done
    }

    pub fn delete_layer(&mut self) -> bool {
        let index = self.state.layer;
        self.edit(|artwork| artwork.delete_layer(index))
    }

    /// Move the active layer up; the selection follows it.
    pub fn move_layer_up(&mut self) -> bool {
        let index = self.state.layer;
        let done = self.edit(|artwork| artwork.move_layer_up(index));
        if done {
            self.state.layer = index + 1;
        }
        done
    }

    /// Move the active layer down; the selection follows it.
    pub fn move_layer_down(&mut self) -> bool {
        let index = self.state.layer;
        let done = self.edit(|artwork| artwork.move_layer_down(index));
        if done {
            self.state.layer = index - 1;
        }
        done
    }

    pub fn toggle_lock(&mut self) -> bool {
        let index = self.state.layer;
        self.edit(|artwork| artwork.toggle_lock(index))
    }

    pub fn toggle_visibility(&mut self) -> bool {
        let index = self.state.layer;
        self.edit(|artwork| artwork.toggle_visibility(index))
    }

    pub fn rename_layer(&mut self, name: impl Into<String>) -> bool {
        let index = self.state.layer;
        let name = name.into();
        self.edit(|artwork| artwork.rename_layer(index, name))
    }

    pub fn set_opacity(&mut self, opacity: u8) -> bool {
        let index = self.state.layer;
        self.edit(|artwork| artwork.set_opacity(index, opacity))
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> bool {
        let index = self.state.layer;
        self.edit(|artwork| artwork.set_blend_mode(index, mode))
    }

    /// Append a frame and select it.
    pub fn add_frame(&mut self) -> usize {
        let index = self.artwork.add_frame();
        self.state.frame = index;
        self.clamp_selection();
        self.commit();
        index
    }

    /// Duplicate the active frame and select the copy.
    pub fn duplicate_frame(&mut self) -> bool {
        let index = self.state.frame;
        let done = self.edit(|artwork| artwork.duplicate_frame(index));
        if done {
            self.select_frame(index + 1);
        }
        done
    }

    pub fn delete_frame(&mut self) -> bool {
        let index = self.state.frame;
        self.edit(|artwork| artwork.delete_frame(index))
    }

    pub fn set_frame_duration(&mut self, duration: u32) -> bool {
        let index = self.state.frame;
        self.edit(|artwork| artwork.set_frame_duration(index, duration))
    }

    // Preview

    /// Composite of the active frame.
    pub fn preview(&self) -> RasterBuffer {
        composite_frame(&self.artwork, self.state.frame)
    }

    /// Start animation playback from the active frame.
    pub fn play(&mut self) -> TickHandle {
        self.playback.seek(self.state.frame - 1);
        self.playback.start()
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Advance playback; the active frame follows the clock.
    pub fn tick(&mut self, handle: TickHandle, delta_ms: u64) -> Option<usize> {
        let next = self.playback.tick(handle, delta_ms, self.artwork.frames())?;
        self.state.frame = next + 1;
        Some(self.state.frame)
    }
}

fn grid_for(artwork: &Artwork, pixel_size: u32) -> (u32, u32) {
    let pixel_size = pixel_size.max(1);
    (artwork.width() / pixel_size, artwork.height() / pixel_size)
}

//! Animation playback clock.
//!
//! Playback is driven by the host's frame callback: each tick reports the
//! elapsed time, and the clock advances to the next frame once the current
//! frame's duration has passed, looping after the last frame.
//!
//! Every `start` hands out a fresh [`TickHandle`]. Ticks carrying an older
//! handle are ignored, so a callback scheduled by a previous run can never
//! drive the clock alongside the current one.

use crate::types::Frame;

/// Identifies one playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle(u64);

/// Frame clock for previewing an animation.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    /// 0-based position in the frame list.
    current: usize,
    elapsed_ms: u64,
    generation: u64,
    playing: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) playback from the current frame.
    pub fn start(&mut self) -> TickHandle {
        self.generation += 1;
        self.playing = true;
        self.elapsed_ms = 0;
        TickHandle(self.generation)
    }

    /// Stop playback. Outstanding handles become stale.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.playing = false;
        self.elapsed_ms = 0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// 0-based index of the frame being shown.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Jump to a 0-based frame without changing the play state.
    pub fn seek(&mut self, index: usize) {
        self.current = index;
        self.elapsed_ms = 0;
    }

    /// Advance by `delta_ms`.
    ///
    /// Returns the new 0-based frame if the frame changed. Stale handles,
    /// a stopped clock, and an empty frame list do nothing.
    pub fn tick(&mut self, handle: TickHandle, delta_ms: u64, frames: &[Frame]) -> Option<usize> {
        if !self.playing || handle.0 != self.generation || frames.is_empty() {
            return None;
        }
        if self.current >= frames.len() {
            self.current = 0;
        }

        self.elapsed_ms += delta_ms;
        let duration = frames[self.current].duration.max(1) as u64;
        if self.elapsed_ms < duration {
            return None;
        }

        self.elapsed_ms = 0;
        self.current = (self.current + 1) % frames.len();
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(durations: &[u32]) -> Vec<Frame> {
        durations.iter().map(|&duration| Frame { duration }).collect()
    }

    #[test]
    fn test_advances_after_duration() {
        let frames = frames(&[100, 50]);
        let mut playback = Playback::new();
        let handle = playback.start();

        assert_eq!(playback.tick(handle, 60, &frames), None);
        assert_eq!(playback.tick(handle, 40, &frames), Some(1));
        assert_eq!(playback.tick(handle, 50, &frames), Some(0));
    }

    #[test]
    fn test_loops_to_first_frame() {
        let frames = frames(&[10, 10, 10]);
        let mut playback = Playback::new();
        let handle = playback.start();
        let seen: Vec<_> = (0..4).filter_map(|_| playback.tick(handle, 10, &frames)).collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let frames = frames(&[10, 10]);
        let mut playback = Playback::new();
        let old = playback.start();
        let new = playback.start();

        assert_eq!(playback.tick(old, 100, &frames), None);
        assert_eq!(playback.tick(new, 10, &frames), Some(1));
    }

    #[test]
    fn test_stop_cancels_ticks() {
        let frames = frames(&[10]);
        let mut playback = Playback::new();
        let handle = playback.start();
        playback.stop();
        assert!(!playback.is_playing());
        assert_eq!(playback.tick(handle, 100, &frames), None);
    }

    #[test]
    fn test_seek_past_end_wraps_on_tick() {
        let frames = frames(&[10, 10]);
        let mut playback = Playback::new();
        playback.seek(5);
        let handle = playback.start();
        assert_eq!(playback.tick(handle, 10, &frames), Some(1));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Video playback engine.
//!
//! This module provides video playback using FFmpeg for decoding on a worker
//! thread and a stream that carries ready frames back to the UI loop.

mod decoder;
pub mod playback;

pub use decoder::{init_ffmpeg, AsyncDecoder, DecodedFrame, DecoderEvent};
pub use playback::{video_playback, PlaybackMessage};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "video is playing" flag.
///
/// The UI thread clears it to stop playback; the decoder worker polls it
/// between frames and clears it itself when the stream ends. Relaxed ordering
/// is enough: a frame decoded after a stop is simply discarded.
#[derive(Debug, Clone)]
pub struct PlaybackFlag(Arc<AtomicBool>);

impl PlaybackFlag {
    /// Creates a flag in the playing state.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_playing(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Requests the worker to stop.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for PlaybackFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_starts_playing() {
        assert!(PlaybackFlag::new().is_playing());
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let flag = PlaybackFlag::new();
        let worker_view = flag.clone();
        flag.stop();
        assert!(!worker_view.is_playing());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::Config;
use crate::display::RequestId;
use crate::error::Error;
use crate::input::KeyPress;
use crate::media::ImageData;
use crate::video_player::PlaybackMessage;
use iced::{window, Size};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The window appeared; fullscreen is requested from here.
    WindowOpened { id: window::Id, size: Size },
    WindowResized { id: window::Id, size: Size },
    /// A key the tag reader cares about was pressed.
    Key(KeyPress),
    /// Result of loading and fitting a still image.
    ImageLoaded {
        request: RequestId,
        result: Result<ImageData, Error>,
    },
    /// Event from a running video session.
    Playback {
        request: RequestId,
        event: PlaybackMessage,
    },
    /// An inactivity timer with this generation ran out.
    InactivityElapsed(u64),
}

/// Startup parameters resolved by `main.rs`.
#[derive(Debug)]
pub struct Flags {
    /// Loaded tag mapping.
    pub config: Config,
    /// Flat directory holding the mapped media files.
    pub media_dir: PathBuf,
    /// Keep a normal window instead of going fullscreen (for setup and debugging).
    pub windowed: bool,
}

// SPDX-License-Identifier: MPL-2.0
//! Stream of playback events for the Iced runtime.
//!
//! Wraps an [`AsyncDecoder`] so the application can run a video as a
//! `Task`. Dropping the stream (aborting the task) drops the decoder, which
//! closes the frame channel and ends the worker.

use super::{AsyncDecoder, DecoderEvent, PlaybackFlag};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::path::PathBuf;
use std::sync::Arc;

/// Messages emitted by a playback stream.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// A new frame is ready for display.
    FrameReady {
        /// RGBA pixel data.
        rgba_data: Arc<Vec<u8>>,
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
        /// Presentation timestamp in seconds.
        pts_secs: f64,
    },

    /// Playback reached the end.
    EndOfStream,

    /// The video could not be played.
    Error(String),
}

impl PlaybackMessage {
    /// Whether this message ends the playback session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackMessage::EndOfStream | PlaybackMessage::Error(_))
    }
}

impl From<DecoderEvent> for PlaybackMessage {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
                rgba_data: frame.rgba_data,
                width: frame.width,
                height: frame.height,
                pts_secs: frame.pts_secs,
            },
            DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
            DecoderEvent::Error(msg) => PlaybackMessage::Error(msg),
        }
    }
}

/// Creates a playback stream for `video_path`, with frames fitted to `screen`.
///
/// The stream ends after [`PlaybackMessage::EndOfStream`] or
/// [`PlaybackMessage::Error`], or silently when `flag` is cleared.
pub fn video_playback(
    video_path: PathBuf,
    screen: (u32, u32),
    flag: PlaybackFlag,
) -> impl Stream<Item = PlaybackMessage> {
    stream::channel(4, move |mut output| async move {
        let mut decoder = match AsyncDecoder::new(&video_path, screen, flag) {
            Ok(decoder) => decoder,
            Err(e) => {
                let _ = output.send(PlaybackMessage::Error(e.to_string())).await;
                return;
            }
        };

        while let Some(event) = decoder.recv_event().await {
            let message = PlaybackMessage::from(event);
            let terminal = message.is_terminal();

            if output.send(message).await.is_err() || terminal {
                break;
            }
        }
    })
}

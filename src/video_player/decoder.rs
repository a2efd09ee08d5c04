// SPDX-License-Identifier: MPL-2.0
//! Video frame decoder using FFmpeg on a dedicated worker thread.
//!
//! Decoding, resizing and RGBA conversion all happen on the worker so the UI
//! loop only ever receives frames that are ready to show.

use super::PlaybackFlag;
use crate::config::DEFAULT_VIDEO_FPS;
use crate::error::{Error, Result, VideoError};
use crate::media::fit_size;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// Safe to call multiple times. Sets the FFmpeg log level to ERROR so
/// container warnings do not flood the kiosk log.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Longest uninterrupted sleep while pacing frames.
const PACING_SLICE: Duration = Duration::from_millis(20);

/// Sleeps until `deadline` in short slices, returning `false` as soon as
/// `flag` is cleared.
fn wait_until(deadline: Instant, flag: &PlaybackFlag) -> bool {
    loop {
        if !flag.is_playing() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(PACING_SLICE));
    }
}

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels, already fitted to the screen.
    pub width: u32,

    /// Frame height in pixels, already fitted to the screen.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

impl DecodedFrame {
    /// Returns the total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// A new frame is ready for display.
    FrameReady(DecodedFrame),

    /// Playback reached the end of the video.
    EndOfStream,

    /// The video could not be opened or decoded.
    Error(String),
}

/// Video decoder running on a blocking worker thread.
pub struct AsyncDecoder {
    /// Channel for receiving events from the decoder task.
    /// Bounded so the worker never runs far ahead of the UI.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Creates a new decoder for the given video file.
    ///
    /// Frames are scaled to fit `screen` on the worker. The worker stops when
    /// `flag` is cleared, when this handle is dropped, or at end of stream.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new<P: AsRef<Path>>(
        video_path: P,
        screen: (u32, u32),
        flag: PlaybackFlag,
    ) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(VideoError::NotFound(path).into());
        }

        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg contexts are not Send, so everything lives on the worker
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(&path, screen, &flag, &event_tx) {
                tracing::warn!(path = %path.display(), error = %e, "video decoder failed");
                let _ = event_tx.blocking_send(DecoderEvent::Error(e.to_string()));
            }
            flag.stop();
        });

        Ok(Self { event_rx })
    }

    /// Receives the next event from the decoder.
    ///
    /// Returns `None` once the worker has terminated.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    /// Main decoder loop running in a blocking thread.
    fn decoder_loop_blocking(
        video_path: &PathBuf,
        screen: (u32, u32),
        flag: &PlaybackFlag,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(video_path).map_err(|e| {
            VideoError::DecodingFailed(format!("Failed to open video: {}", e))
        })?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let video_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());
        let frame_rate = input.avg_frame_rate();
        let fps = if frame_rate.numerator() > 0 && frame_rate.denominator() > 0 {
            f64::from(frame_rate.numerator()) / f64::from(frame_rate.denominator())
        } else {
            DEFAULT_VIDEO_FPS
        };

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| VideoError::UnsupportedCodec(format!("codec context: {}", e)))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| VideoError::UnsupportedCodec(format!("video decoder: {}", e)))?;

        let source_width = decoder.width();
        let source_height = decoder.height();
        if source_width == 0 || source_height == 0 {
            return Err(VideoError::UnsupportedCodec(format!(
                "invalid video dimensions {source_width}x{source_height}"
            ))
            .into());
        }

        let (width, height) = fit_size(screen, (source_width, source_height));

        // Resize and convert to RGBA in a single pass
        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            source_width,
            source_height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::LANCZOS,
        )
        .map_err(|e| VideoError::UnsupportedCodec(format!("scaler: {}", e)))?;

        tracing::debug!(
            path = %video_path.display(),
            source = %format!("{source_width}x{source_height}"),
            target = %format!("{width}x{height}"),
            fps,
            "video decoding started"
        );

        let playback_start = Instant::now();
        let mut first_pts: Option<f64> = None;
        let mut frame_index: u64 = 0;
        let mut eof_sent = false;

        while flag.is_playing() {
            let Some(decoded_frame) =
                Self::next_frame(&mut ictx, &mut decoder, video_stream_index, &mut eof_sent)?
            else {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                break;
            };

            let mut rgba_frame = ffmpeg_next::frame::Video::empty();
            if let Err(e) = scaler.run(&decoded_frame, &mut rgba_frame) {
                tracing::warn!(error = %e, "skipping frame that failed to scale");
                continue;
            }

            let pts_secs = match decoded_frame.timestamp() {
                Some(pts) => pts as f64 * time_base_f64,
                None => frame_index as f64 / fps,
            };
            frame_index += 1;

            // Frame pacing relative to the first presented frame
            let first = *first_pts.get_or_insert(pts_secs);
            let target_time =
                playback_start + Duration::from_secs_f64((pts_secs - first).max(0.0));
            if !wait_until(target_time, flag) {
                break;
            }

            let decoded = DecodedFrame {
                rgba_data: Arc::new(Self::extract_rgba_data(&rgba_frame)),
                width,
                height,
                pts_secs,
            };

            if event_tx
                .blocking_send(DecoderEvent::FrameReady(decoded))
                .is_err()
            {
                // Receiver dropped: playback was stopped from the UI side
                break;
            }
        }

        tracing::debug!(path = %video_path.display(), frames = frame_index, "video decoding ended");
        Ok(())
    }

    /// Pulls the next decoded frame, feeding packets as needed.
    ///
    /// Once the container is exhausted the decoder is flushed so buffered
    /// frames are still delivered. Returns `None` at end of stream.
    fn next_frame(
        ictx: &mut ffmpeg_next::format::context::Input,
        decoder: &mut ffmpeg_next::decoder::Video,
        video_stream_index: usize,
        eof_sent: &mut bool,
    ) -> Result<Option<ffmpeg_next::frame::Video>> {
        let mut frame = ffmpeg_next::frame::Video::empty();
        loop {
            if decoder.receive_frame(&mut frame).is_ok() {
                return Ok(Some(frame));
            }
            if *eof_sent {
                return Ok(None);
            }

            let packet = ictx
                .packets()
                .find(|(stream, _)| stream.index() == video_stream_index)
                .map(|(_, packet)| packet);

            match packet {
                Some(packet) => {
                    if let Err(e) = decoder.send_packet(&packet) {
                        tracing::warn!(error = %e, "dropping packet the decoder rejected");
                    }
                }
                None => {
                    decoder
                        .send_eof()
                        .map_err(|e| VideoError::DecodingFailed(format!("flush: {}", e)))?;
                    *eof_sent = true;
                }
            }
        }
    }

    /// Extracts RGBA data from a scaled frame, handling stride correctly.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

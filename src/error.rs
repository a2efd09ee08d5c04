// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// The mapping file does not exist yet; the kiosk cannot start without it.
    ConfigMissing(PathBuf),
    Image(String),
    Video(VideoError),
}

/// Specific error types for video playback issues.
#[derive(Debug, Clone)]
pub enum VideoError {
    /// Video file does not exist in the media directory.
    NotFound(PathBuf),

    /// File exists but contains no video stream.
    NoVideoStream,

    /// Decoder or scaler could not be set up for this file.
    UnsupportedCodec(String),

    /// Decoding failed during playback.
    DecodingFailed(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::NotFound(path) => write!(f, "Video not found: {}", path.display()),
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::UnsupportedCodec(msg) => write!(f, "Unsupported video codec: {}", msg),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::ConfigMissing(path) => write!(
                f,
                "Configuration file {} not found.\nPlease run the calibration tool first to set up the system.",
                path.display()
            ),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

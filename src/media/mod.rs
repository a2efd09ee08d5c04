// SPDX-License-Identifier: MPL-2.0
//! Media classification and lookup for the flat media directory.

pub mod image;

use std::path::{Path, PathBuf};

pub use image::{fit_scale, fit_size, load_fitted, ImageData};

/// Represents different types of media formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classifies a file by extension. Anything that is not a known video
    /// container is handed to the image decoder.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let is_video = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                extensions::VIDEO_EXTENSIONS
                    .iter()
                    .any(|video| video.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);

        if is_video {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }
}

/// Supported media extensions
pub mod extensions {
    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] =
        &["mp4", "m4v", "avi", "mov", "mkv", "wmv", "flv", "webm"];
}

/// Full path of a media file referenced by filename in the mapping.
pub fn media_path(media_dir: &Path, filename: &str) -> PathBuf {
    media_dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions_are_case_insensitive() {
        assert_eq!(MediaType::from_path("clip.mp4"), MediaType::Video);
        assert_eq!(MediaType::from_path("CLIP.MOV"), MediaType::Video);
        assert_eq!(MediaType::from_path("trailer.WebM"), MediaType::Video);
        assert_eq!(MediaType::from_path("old.wmv"), MediaType::Video);
    }

    #[test]
    fn everything_else_is_an_image() {
        assert_eq!(MediaType::from_path("photo.jpg"), MediaType::Image);
        assert_eq!(MediaType::from_path("scan.PNG"), MediaType::Image);
        assert_eq!(MediaType::from_path("no_extension"), MediaType::Image);
        assert_eq!(MediaType::from_path("notes.txt"), MediaType::Image);
    }

    #[test]
    fn media_path_joins_flat_directory() {
        let path = media_path(Path::new("data/images"), "boat.png");
        assert_eq!(path, PathBuf::from("data/images/boat.png"));
    }
}

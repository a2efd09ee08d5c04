// SPDX-License-Identifier: MPL-2.0
//! Image decoding and the scale-to-fit policy shared with video frames.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::imageops::FilterType;
use image_rs::GenericImageView;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }
}

/// Uniform scale factor that fits `media` inside `screen` while keeping its
/// aspect ratio: `min(screen_w / media_w, screen_h / media_h)`.
///
/// Degenerate media sizes yield `1.0`.
pub fn fit_scale(screen: (u32, u32), media: (u32, u32)) -> f64 {
    let (screen_w, screen_h) = screen;
    let (media_w, media_h) = media;
    if media_w == 0 || media_h == 0 {
        return 1.0;
    }
    let scale_w = f64::from(screen_w) / f64::from(media_w);
    let scale_h = f64::from(screen_h) / f64::from(media_h);
    scale_w.min(scale_h)
}

/// Target size for `media` scaled with [`fit_scale`], truncated to whole
/// pixels and never smaller than 1x1.
pub fn fit_size(screen: (u32, u32), media: (u32, u32)) -> (u32, u32) {
    let scale = fit_scale(screen, media);
    let width = (f64::from(media.0) * scale) as u32;
    let height = (f64::from(media.1) * scale) as u32;
    (width.max(1), height.max(1))
}

/// Loads an image and scales it to fit `screen`.
///
/// # Errors
///
/// - [`Error::Io`] if the file cannot be read
/// - [`Error::Image`] if the bytes are not a decodable image
pub fn load_fitted<P: AsRef<Path>>(path: P, screen: (u32, u32)) -> Result<ImageData> {
    let path = path.as_ref();
    let img_bytes =
        fs::read(path).map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;

    let img = image_rs::load_from_memory(&img_bytes)?;

    let (width, height) = fit_size(screen, img.dimensions());
    let img = if (width, height) == img.dimensions() {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

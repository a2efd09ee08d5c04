// SPDX-License-Identifier: MPL-2.0
//! `rfid_display` is a fullscreen kiosk that shows an image or plays a video
//! whenever an RFID tag is scanned, built with the Iced GUI framework.
//!
//! The RFID reader behaves as a keyboard: it types the tag code and presses
//! Enter. Codes are looked up in a JSON mapping, the matching media file is
//! fitted to the screen, and the display falls back to a welcome image after
//! a period of inactivity or when a video finishes.

#![doc(html_root_url = "https://docs.rs/rfid_display/0.1.0")]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
pub mod media;
pub mod video_player;

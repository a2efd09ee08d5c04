// SPDX-License-Identifier: MPL-2.0
//! Display scheduling: which media is on screen and when it goes away.
//!
//! The [`DisplayController`] owns the session state (what is showing, the
//! active video's playback flag, the inactivity timer) and never performs I/O
//! itself. Every operation returns a list of [`Effect`]s that the application
//! shell turns into runtime tasks. Asynchronous results come back tagged with
//! the [`RequestId`] they were issued for; anything stale is ignored.

pub mod timer;

pub use timer::{InactivityTimer, TimerTicket};

use crate::config::Config;
use crate::media::{self, MediaType};
use crate::video_player::PlaybackFlag;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies one display request (image load or video session).
pub type RequestId = u64;

/// Result of looking a tag code up in the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The tag is mapped to this media filename.
    Media(String),
    /// Unknown tag: show the welcome image.
    Welcome,
}

/// What the controller believes is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Showing {
    /// Nothing requested yet.
    Nothing,
    Welcome,
    Image(String),
    Video(String),
    /// The welcome image itself is unavailable; a text notice is shown.
    Placeholder,
}

/// Instructions for the application shell.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Load `path`, fit it to the screen and show it.
    ShowImage { request: RequestId, path: PathBuf },
    /// Start decoding `path` on a worker; frames are shown as they arrive.
    PlayVideo {
        request: RequestId,
        path: PathBuf,
        flag: PlaybackFlag,
    },
    /// Tear down the running video task.
    StopVideo,
    /// Show a text notice instead of an image.
    ShowPlaceholder { message: String },
    /// Schedule an inactivity expiry.
    ArmTimer(TimerTicket),
    /// Close the kiosk.
    Quit,
}

#[derive(Debug)]
pub struct DisplayController {
    config: Config,
    media_dir: PathBuf,
    showing: Showing,
    request: RequestId,
    timer: InactivityTimer,
    playback: Option<PlaybackFlag>,
}

impl DisplayController {
    pub fn new(config: Config, media_dir: impl Into<PathBuf>) -> Self {
        let timer = InactivityTimer::new(config.inactivity_timeout());
        Self {
            config,
            media_dir: media_dir.into(),
            showing: Showing::Nothing,
            request: 0,
            timer,
            playback: None,
        }
    }

    /// Looks up a tag code.
    pub fn resolve(&self, code: &str) -> Resolution {
        match self.config.media_for(code) {
            Some(file) => Resolution::Media(file.to_string()),
            None => Resolution::Welcome,
        }
    }

    pub fn showing(&self) -> &Showing {
        &self.showing
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Whether `request` is the latest display request.
    pub fn is_current(&self, request: RequestId) -> bool {
        request == self.request
    }

    pub fn is_video_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(PlaybackFlag::is_playing)
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Shows the welcome image and starts the inactivity countdown.
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.show_welcome(&mut effects);
        self.restart_timer(&mut effects);
        effects
    }

    /// Handles a scanned tag code.
    pub fn on_tag(&mut self, code: &str) -> Vec<Effect> {
        let code = code.trim();
        if code.is_empty() {
            return Vec::new();
        }
        tracing::info!(code, "tag scanned");

        let mut effects = Vec::new();
        match self.resolve(code) {
            Resolution::Media(file) => {
                tracing::info!(code, file = %file, "displaying mapped media");
                self.show_media(file, &mut effects);
            }
            Resolution::Welcome => {
                tracing::info!(code, "tag not found in mappings");
                self.show_welcome(&mut effects);
            }
        }
        self.restart_timer(&mut effects);
        effects
    }

    /// Handles an inactivity expiry.
    ///
    /// Stale tickets and expiries during video playback do nothing. The timer
    /// is not re-armed: the welcome image stays until the next tag.
    pub fn on_inactivity(&mut self, generation: u64) -> Vec<Effect> {
        if !self.timer.expire(generation) || self.is_video_playing() {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if !matches!(self.showing, Showing::Welcome | Showing::Placeholder) {
            tracing::debug!("inactivity timeout, returning to welcome image");
            self.show_welcome(&mut effects);
        }
        effects
    }

    /// Handles the end of the current video.
    pub fn on_video_finished(&mut self, request: RequestId) -> Vec<Effect> {
        if !self.is_current(request) || !matches!(self.showing, Showing::Video(_)) {
            return Vec::new();
        }
        tracing::debug!(request, "video finished");

        let mut effects = Vec::new();
        self.show_welcome(&mut effects);
        self.restart_timer(&mut effects);
        effects
    }

    /// Handles a media file that could not be shown.
    ///
    /// Mapped media falls back to the welcome image. If the welcome image
    /// itself fails, a text placeholder naming it is shown instead.
    pub fn on_media_failed(&mut self, request: RequestId, error: impl fmt::Display) -> Vec<Effect> {
        if !self.is_current(request) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        match &self.showing {
            Showing::Welcome => {
                tracing::warn!(
                    file = %self.config.welcome_image,
                    error = %error,
                    "welcome image unavailable"
                );
                self.showing = Showing::Placeholder;
                effects.push(Effect::ShowPlaceholder {
                    message: format!("Welcome\n\n(Image: {} not found)", self.config.welcome_image),
                });
            }
            Showing::Image(file) | Showing::Video(file) => {
                tracing::warn!(file = %file, error = %error, "failed to show media, falling back to welcome image");
                self.show_welcome(&mut effects);
                self.restart_timer(&mut effects);
            }
            Showing::Nothing | Showing::Placeholder => {}
        }
        effects
    }

    /// Re-issues the current still image, e.g. after the screen size changed.
    /// The inactivity timer is left alone.
    pub fn refresh(&mut self) -> Vec<Effect> {
        let file = match &self.showing {
            Showing::Welcome => self.config.welcome_image.clone(),
            Showing::Image(file) => file.clone(),
            Showing::Nothing | Showing::Video(_) | Showing::Placeholder => return Vec::new(),
        };
        self.request += 1;
        vec![Effect::ShowImage {
            request: self.request,
            path: media::media_path(&self.media_dir, &file),
        }]
    }

    /// Stops playback and asks the shell to exit.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.stop_video(&mut effects);
        self.timer.cancel();
        effects.push(Effect::Quit);
        effects
    }

    fn show_media(&mut self, file: String, effects: &mut Vec<Effect>) {
        self.stop_video(effects);
        self.request += 1;
        let path = media::media_path(&self.media_dir, &file);

        match MediaType::from_path(&file) {
            MediaType::Image => {
                self.showing = Showing::Image(file);
                effects.push(Effect::ShowImage {
                    request: self.request,
                    path,
                });
            }
            MediaType::Video => {
                let flag = PlaybackFlag::new();
                self.playback = Some(flag.clone());
                self.showing = Showing::Video(file);
                effects.push(Effect::PlayVideo {
                    request: self.request,
                    path,
                    flag,
                });
            }
        }
    }

    fn show_welcome(&mut self, effects: &mut Vec<Effect>) {
        self.stop_video(effects);
        self.request += 1;
        self.showing = Showing::Welcome;
        effects.push(Effect::ShowImage {
            request: self.request,
            path: media::media_path(&self.media_dir, &self.config.welcome_image),
        });
    }

    fn stop_video(&mut self, effects: &mut Vec<Effect>) {
        if let Some(flag) = self.playback.take() {
            flag.stop();
            effects.push(Effect::StopVideo);
        }
    }

    /// Restarts the countdown, or suppresses it while a video plays.
    fn restart_timer(&mut self, effects: &mut Vec<Effect>) {
        if self.playback.is_some() {
            self.timer.cancel();
        } else if let Some(ticket) = self.timer.arm() {
            effects.push(Effect::ArmTimer(ticket));
        }
    }
}

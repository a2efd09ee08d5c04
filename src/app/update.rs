// SPDX-License-Identifier: MPL-2.0
//! Update logic and effect execution for the application.
//!
//! Messages are routed to the tag reader or the display controller; the
//! controller's effects are then turned into Iced tasks here.

use super::{App, Canvas, Message};
use crate::display::{timer, Effect, Showing};
use crate::input::InputEvent;
use crate::media;
use crate::video_player::{self, PlaybackMessage};
use iced::widget::image;
use iced::{window, Size, Task};
use std::sync::Arc;

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::WindowOpened { id, size } | Message::WindowResized { id, size } => {
            let mode_task = app.track_window(id);
            let refresh_task = app.handle_resize(size);
            Task::batch([mode_task, refresh_task])
        }
        Message::Key(key) => match app.reader.feed(key) {
            Some(InputEvent::Tag(code)) => {
                let effects = app.controller.on_tag(&code);
                app.apply(effects)
            }
            Some(InputEvent::Quit) => {
                tracing::info!("escape pressed, shutting down");
                let effects = app.controller.shutdown();
                app.apply(effects)
            }
            None => Task::none(),
        },
        Message::ImageLoaded { request, result } => {
            if !app.controller.is_current(request) {
                return Task::none();
            }
            match result {
                Ok(image_data) => {
                    app.canvas = Canvas::Frame(image_data.handle);
                    Task::none()
                }
                Err(error) => {
                    let effects = app.controller.on_media_failed(request, error);
                    app.apply(effects)
                }
            }
        }
        Message::Playback { request, event } => handle_playback(app, request, event),
        Message::InactivityElapsed(generation) => {
            let effects = app.controller.on_inactivity(generation);
            app.apply(effects)
        }
    }
}

fn handle_playback(app: &mut App, request: u64, event: PlaybackMessage) -> Task<Message> {
    match event {
        PlaybackMessage::FrameReady {
            rgba_data,
            width,
            height,
            ..
        } => {
            // The worker clears the playback flag right after queueing its
            // last frames, so only the request id decides staleness here.
            if app.controller.is_current(request)
                && matches!(app.controller.showing(), Showing::Video(_))
            {
                let pixels = Arc::unwrap_or_clone(rgba_data);
                app.canvas = Canvas::Frame(image::Handle::from_rgba(width, height, pixels));
            }
            Task::none()
        }
        PlaybackMessage::EndOfStream => {
            let effects = app.controller.on_video_finished(request);
            app.apply(effects)
        }
        PlaybackMessage::Error(message) => {
            let effects = app.controller.on_media_failed(request, message);
            app.apply(effects)
        }
    }
}

impl App {
    /// Turns controller effects into runtime tasks.
    pub(super) fn apply(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = effects
            .into_iter()
            .map(|effect| self.run_effect(effect))
            .collect();
        Task::batch(tasks)
    }

    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ShowImage { request, path } => {
                let screen = self.screen_size;
                Task::perform(
                    async move { media::load_fitted(&path, screen) },
                    move |result| Message::ImageLoaded { request, result },
                )
            }
            Effect::PlayVideo {
                request,
                path,
                flag,
            } => {
                let playback = video_player::video_playback(path, self.screen_size, flag);
                let (task, handle) =
                    Task::run(playback, move |event| Message::Playback { request, event })
                        .abortable();
                self.video_task = Some(handle.abort_on_drop());
                task
            }
            Effect::StopVideo => {
                self.video_task = None;
                Task::none()
            }
            Effect::ShowPlaceholder { message } => {
                self.canvas = Canvas::Placeholder(message);
                Task::none()
            }
            Effect::ArmTimer(ticket) => {
                tracing::debug!(
                    generation = ticket.generation,
                    secs = ticket.after.as_secs(),
                    "inactivity timer armed"
                );
                Task::perform(timer::wait(ticket), Message::InactivityElapsed)
            }
            Effect::Quit => iced::exit(),
        }
    }

    /// Remembers the window and requests fullscreen the first time it is seen.
    fn track_window(&mut self, id: window::Id) -> Task<Message> {
        if self.window_id.is_some() {
            return Task::none();
        }
        self.window_id = Some(id);

        if self.windowed {
            Task::none()
        } else {
            window::set_mode(id, window::Mode::Fullscreen)
        }
    }

    /// Refits the current still image when the usable area changes.
    ///
    /// `size` is in logical pixels; media is fitted at that resolution and
    /// the renderer scales it for HiDPI outputs.
    fn handle_resize(&mut self, size: Size) -> Task<Message> {
        let new_size = (size.width as u32, size.height as u32);
        if new_size.0 == 0 || new_size.1 == 0 || new_size == self.screen_size {
            return Task::none();
        }
        self.screen_size = new_size;

        let effects = self.controller.refresh();
        self.apply(effects)
    }
}

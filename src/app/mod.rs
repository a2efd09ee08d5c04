// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the tag reader and the display controller to the
//! Iced runtime: key presses become tag codes, controller effects become
//! tasks (image loads, video sessions, inactivity timers), and their results
//! flow back in as messages on the UI thread.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::FALLBACK_SCREEN_SIZE;
use crate::display::DisplayController;
use crate::input::TagReader;
use iced::task;
use iced::widget::image;
use iced::{window, Element, Subscription, Task};
use std::fmt;

pub const WINDOW_TITLE: &str = "RFID Media Display";
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;

/// What is currently painted on screen.
#[derive(Debug, Clone)]
pub enum Canvas {
    Blank,
    /// A fitted still image or the latest video frame.
    Frame(image::Handle),
    /// Text shown when the welcome image is unavailable.
    Placeholder(String),
}

/// Root Iced application state.
pub struct App {
    controller: DisplayController,
    reader: TagReader,
    canvas: Canvas,
    /// Size media is fitted to, in logical pixels as reported by the window.
    screen_size: (u32, u32),
    window_id: Option<window::Id>,
    windowed: bool,
    /// Running video session; dropping it aborts the playback stream.
    video_task: Option<task::Handle>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("showing", self.controller.showing())
            .field("screen_size", &self.screen_size)
            .field("video_running", &self.video_task.is_some())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the initial state and shows the welcome image right away,
    /// fitted to a fallback size until the window reports its own.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut app = App {
            controller: DisplayController::new(flags.config, flags.media_dir),
            reader: TagReader::new(),
            canvas: Canvas::Blank,
            screen_size: FALLBACK_SCREEN_SIZE,
            window_id: None,
            windowed: flags.windowed,
            video_task: None,
        };

        tracing::info!(
            media_dir = %app.controller.media_dir().display(),
            "RFID capture active, waiting for tags"
        );

        let effects = app.controller.start();
        let task = app.apply(effects);
        (app, task)
    }

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(&self.canvas)
    }
}

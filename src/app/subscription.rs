// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window and keyboard events to top-level messages. The kiosk
//! has no interactive widgets, so every key press reaches the tag reader.

use super::Message;
use crate::input::KeyPress;
use iced::event::{self, Event};
use iced::{keyboard, window, Subscription};

/// Creates the window and keyboard event subscription.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        Event::Window(window::Event::Opened { size, .. }) => Some(Message::WindowOpened {
            id: window_id,
            size,
        }),
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            id: window_id,
            size,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, text, .. }) => {
            KeyPress::from_iced(&key, text.as_deref()).map(Message::Key)
        }
        _ => None,
    })
}

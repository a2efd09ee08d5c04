// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Canvas, Message};
use iced::widget::{container, Column, Container, Image, Text};
use iced::{alignment, Color, Element, Length, Theme};

const PLACEHOLDER_TEXT_SIZE: f32 = 24.0;

/// Renders the canvas centered on a black background.
pub fn view(canvas: &Canvas) -> Element<'_, Message> {
    let content: Element<'_, Message> = match canvas {
        Canvas::Blank => Column::new().into(),
        Canvas::Frame(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Canvas::Placeholder(message) => {
            let lines: Vec<Element<'_, Message>> = message
                .lines()
                .map(|line| {
                    Text::new(line.to_string())
                        .size(PLACEHOLDER_TEXT_SIZE)
                        .color(Color::WHITE)
                        .into()
                })
                .collect();
            Column::with_children(lines)
                .align_x(alignment::Horizontal::Center)
                .into()
        }
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::BLACK.into()),
            ..container::Style::default()
        })
        .into()
}

// SPDX-License-Identifier: MPL-2.0
//! Tag code assembly from keyboard input.
//!
//! RFID readers in keyboard-emulation mode "type" the tag code and finish with
//! Enter. The reader here collects printable characters until Enter, then hands
//! the whole code over. There is no debouncing and no length validation: any
//! non-empty buffer counts as a tag code.

use iced::keyboard::{self, key::Named};

/// Keys the listener cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPress {
    /// Printable character (already resolved for layout and shift state).
    Char(char),
    /// Main or keypad Enter.
    Enter,
    Escape,
}

impl KeyPress {
    /// Converts an iced key press into a [`KeyPress`].
    ///
    /// `text` is the text the key produced, which accounts for the keyboard
    /// layout; the logical key is only used when no text was produced.
    pub fn from_iced(key: &keyboard::Key, text: Option<&str>) -> Option<Self> {
        match key {
            keyboard::Key::Named(Named::Enter) => return Some(KeyPress::Enter),
            keyboard::Key::Named(Named::Escape) => return Some(KeyPress::Escape),
            _ => {}
        }

        let produced = text.or(match key {
            keyboard::Key::Character(c) => Some(c.as_str()),
            _ => None,
        })?;

        let mut chars = produced.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(KeyPress::Char(c)),
            _ => None,
        }
    }
}

/// Outcome of feeding a key to the [`TagReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A complete tag code was scanned.
    Tag(String),
    /// The operator asked to close the kiosk.
    Quit,
}

/// Accumulates characters into tag codes.
#[derive(Debug, Default)]
pub struct TagReader {
    buffer: String,
}

impl TagReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one key press, returning an event when a code completes or the
    /// operator quits.
    pub fn feed(&mut self, key: KeyPress) -> Option<InputEvent> {
        match key {
            KeyPress::Char(c) => {
                if !c.is_control() {
                    self.buffer.push(c);
                }
                None
            }
            KeyPress::Enter => {
                let code = std::mem::take(&mut self.buffer);
                let code = code.trim();
                (!code.is_empty()).then(|| InputEvent::Tag(code.to_string()))
            }
            KeyPress::Escape => Some(InputEvent::Quit),
        }
    }

    /// Characters typed since the last Enter.
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_code(reader: &mut TagReader, code: &str) {
        for c in code.chars() {
            assert_eq!(reader.feed(KeyPress::Char(c)), None);
        }
    }

    #[test]
    fn enter_emits_buffered_code_and_clears() {
        let mut reader = TagReader::new();
        type_code(&mut reader, "0012345678");
        assert_eq!(reader.pending(), "0012345678");

        let event = reader.feed(KeyPress::Enter);
        assert_eq!(event, Some(InputEvent::Tag("0012345678".to_string())));
        assert_eq!(reader.pending(), "");
    }

    #[test]
    fn consecutive_scans_do_not_bleed_together() {
        let mut reader = TagReader::new();
        type_code(&mut reader, "AAA");
        reader.feed(KeyPress::Enter);
        type_code(&mut reader, "BBB");

        assert_eq!(
            reader.feed(KeyPress::Enter),
            Some(InputEvent::Tag("BBB".to_string()))
        );
    }

    #[test]
    fn enter_on_empty_buffer_is_ignored() {
        let mut reader = TagReader::new();
        assert_eq!(reader.feed(KeyPress::Enter), None);
    }

    #[test]
    fn whitespace_only_buffer_is_ignored_and_cleared() {
        let mut reader = TagReader::new();
        type_code(&mut reader, "   ");
        assert_eq!(reader.feed(KeyPress::Enter), None);
        assert_eq!(reader.pending(), "");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let mut reader = TagReader::new();
        type_code(&mut reader, " 42 ");
        assert_eq!(
            reader.feed(KeyPress::Enter),
            Some(InputEvent::Tag("42".to_string()))
        );
    }

    #[test]
    fn escape_requests_quit_without_touching_buffer() {
        let mut reader = TagReader::new();
        type_code(&mut reader, "12");
        assert_eq!(reader.feed(KeyPress::Escape), Some(InputEvent::Quit));
        assert_eq!(reader.pending(), "12");
    }

    #[test]
    fn control_characters_are_dropped() {
        let mut reader = TagReader::new();
        reader.feed(KeyPress::Char('\t'));
        reader.feed(KeyPress::Char('7'));
        assert_eq!(reader.pending(), "7");
    }

    #[test]
    fn from_iced_maps_named_keys() {
        let enter = keyboard::Key::Named(Named::Enter);
        let escape = keyboard::Key::Named(Named::Escape);
        let arrow = keyboard::Key::Named(Named::ArrowUp);

        assert_eq!(KeyPress::from_iced(&enter, Some("\r")), Some(KeyPress::Enter));
        assert_eq!(KeyPress::from_iced(&escape, None), Some(KeyPress::Escape));
        assert_eq!(KeyPress::from_iced(&arrow, None), None);
    }

    #[test]
    fn from_iced_prefers_produced_text() {
        let key = keyboard::Key::Character("a".into());
        assert_eq!(KeyPress::from_iced(&key, Some("A")), Some(KeyPress::Char('A')));
        assert_eq!(KeyPress::from_iced(&key, None), Some(KeyPress::Char('a')));
    }

    #[test]
    fn from_iced_rejects_control_text() {
        let key = keyboard::Key::Named(Named::Backspace);
        assert_eq!(KeyPress::from_iced(&key, Some("\u{8}")), None);
    }
}

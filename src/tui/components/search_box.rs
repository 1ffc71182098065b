//! # SearchBox Component
//!
//! Single-line search input.
//!
//! ## Responsibilities
//!
//! - Capture text input and report the full text after every edit
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Report submission (Enter)
//!
//! The buffer is internal state, seeded once from the stored search term.
//! Unlike a chat input it is not cleared on submit: the term stays visible
//! and editable after the search runs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Text changed. Carries the whole new buffer.
    Input(String),
    /// User pressed Enter.
    Submit,
}

pub struct SearchBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether keystrokes currently go to this box (Prop)
    pub focused: bool,
    /// Byte offset of the cursor in `buffer`
    cursor: usize,
}

impl SearchBox {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: true,
            cursor: initial.len(),
        }
    }

    fn insert_str(&mut self, text: &str) -> Option<SearchEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(SearchEvent::Input(self.buffer.clone()))
    }

    /// Display column of the cursor, relative to the start of the buffer.
    fn cursor_column(&self) -> u16 {
        u16::try_from(self.buffer[..self.cursor].width()).unwrap_or(u16::MAX)
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.cursor_column();
        // Keep the cursor inside the visible window
        let scroll = cursor_col.saturating_add(1).saturating_sub(inner_width);

        let (border_style, text_style) = if self.focused {
            (Style::default(), Style::default().fg(Color::Green))
        } else {
            let dim = Style::default().add_modifier(Modifier::DIM);
            (dim, dim)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Search");

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(text_style)
            .scroll((0, scroll));
        frame.render_widget(input, area);

        if self.focused {
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(cursor_col.saturating_sub(scroll));
            frame.set_cursor_position((x, area.y.saturating_add(1)));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert_str(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flattened = text.replace(['\r', '\n'], " ");
                self.insert_str(&flattened)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(SearchEvent::Input(self.buffer.clone()))
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(SearchEvent::Input(self.buffer.clone()))
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(SearchEvent::Submit),
            _ => None,
        }
    }
}

/// Byte offset of the character before `pos`, or 0.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character after `pos`, or the end of `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

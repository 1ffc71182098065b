//! # StoryList Component
//!
//! Scrollable list of fetched stories with a selection cursor.
//!
//! ```text
//! ┌Stories───────────────────────────────────────┐
//! │> Rust 2024 is out  https://blog.rust-lang.org│
//! │    steveklabnik · 812 points · 301 comments  │
//! │  Tokio 2.0 ...                               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Selection lives in `StoryListState` so it survives redraws. The list of
//! stories itself is a prop: removal is reported upward by index and the
//! parent maps it back to a `Story` before dispatching.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::Story;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the story list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// Remove the story at this index.
    Remove(usize),
}

#[derive(Default)]
pub struct StoryListState {
    /// Number of stories currently shown (Prop)
    pub item_count: usize,
    list_state: ListState,
}

impl StoryListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Updates the item count and keeps the selection in range.
    pub fn sync(&mut self, item_count: usize) {
        self.item_count = item_count;
        let selected = match (self.list_state.selected(), item_count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some(i.min(n - 1)),
        };
        self.list_state.select(selected);
    }
}

impl EventHandler for StoryListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.item_count == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                let idx = self.selected().map_or(0, |i| i.saturating_sub(1));
                self.list_state.select(Some(idx));
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                let idx = self
                    .selected()
                    .map_or(0, |i| (i + 1).min(self.item_count - 1));
                self.list_state.select(Some(idx));
                None
            }
            TuiEvent::Delete | TuiEvent::InputChar('d') => self.selected().map(ListEvent::Remove),
            _ => None,
        }
    }
}

/// Props for one render pass.
pub struct StoryList<'a> {
    pub stories: &'a [Story],
    pub state: &'a mut StoryListState,
    pub focused: bool,
}

impl Component for StoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!("Stories ({})", self.stories.len()));

        if self.stories.is_empty() {
            let empty = Paragraph::new("No stories")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Room for the two-column highlight symbol
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .stories
            .iter()
            .map(|story| ListItem::new(story_text(story, width)))
            .collect();

        let mut list = List::new(items).block(block).highlight_symbol("> ");
        if self.focused {
            list = list.highlight_style(Style::default().bg(Color::DarkGray));
        }

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn story_text(story: &Story, width: usize) -> Text<'static> {
    let title = if story.title.is_empty() {
        "(untitled)"
    } else {
        story.title.as_str()
    };
    let title = truncate_to_width(title, width);
    let url_room = width.saturating_sub(title.width() + 2);

    let mut headline = vec![Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !story.url.is_empty() && url_room > 0 {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(
            truncate_to_width(&story.url, url_room),
            Style::default().fg(Color::Blue),
        ));
    }

    let details = format!(
        "  {} · {} points · {} comments",
        story.author, story.points, story.num_comments
    );

    Text::from(vec![
        Line::from(headline),
        Line::styled(
            truncate_to_width(&details, width),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Cuts `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

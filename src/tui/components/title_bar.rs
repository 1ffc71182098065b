//! # TitleBar Component
//!
//! Top status bar: the configured title, the fetch status and a key hint.
//!
//! ## Conditional Formatting
//!
//! The status text follows the stories phase:
//!
//! 1. **Loading**: `"Hacker Stories | Loading ..."`
//! 2. **Failure**: `"Hacker Stories | Something went wrong ..."` (red)
//! 3. **Success**: `"Hacker Stories | 20 stories"` (also `"0 stories"`)
//! 4. **Idle**: `"Hacker Stories | Type a search and press Enter"`
//!
//! TitleBar is purely presentational: all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::stories::{Phase, StoriesState};
use crate::tui::component::Component;

pub struct TitleBar {
    /// Application title (from config)
    pub title: String,
    /// Status derived from the stories state
    pub status: String,
    /// Render the status as an error
    pub is_error: bool,
    /// Key hint for the current input mode
    pub hint: String,
}

impl TitleBar {
    pub fn new(title: &str, stories: &StoriesState, hint: &str) -> Self {
        Self {
            title: title.to_string(),
            status: status_text(stories),
            is_error: stories.is_error,
            hint: hint.to_string(),
        }
    }
}

/// Human-readable status for the stories state.
pub fn status_text(stories: &StoriesState) -> String {
    match stories.phase() {
        Phase::Loading => "Loading ...".to_string(),
        Phase::Failure => "Something went wrong ...".to_string(),
        Phase::Success if stories.data.len() == 1 => "1 story".to_string(),
        Phase::Success => format!("{} stories", stories.data.len()),
        Phase::Idle => "Type a search and press Enter".to_string(),
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status_style = if self.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(self.status.clone(), status_style),
        ];
        if !self.hint.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.hint.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::store::Snapshot;
use crate::tui::component::Component;
use crate::tui::components::{StoryList, TitleBar};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, title: &str, snapshot: &Snapshot, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0)]);
    let [title_area, search_area, list_area] = layout.areas(frame.area());

    TitleBar::new(title, &snapshot.stories, tui.mode.hint()).render(frame, title_area);

    tui.search_box.render(frame, search_area);

    StoryList {
        stories: &snapshot.stories.data,
        state: &mut tui.story_list,
        focused: tui.mode == InputMode::Browse,
    }
    .render(frame, list_area);
}

//! Main render/view function (View in TEA pattern)

use mentor_app::{AppState, UiMode};
use ratatui::Frame;

use crate::{layout, widgets};


/// Render the complete UI
pub fn view(frame: &mut Frame, state: &AppState) {
    let areas = layout::create(frame.area(), state.mode);

    frame.render_widget(
        widgets::MainHeader::new(state.mode, &state.settings.backend.base_url),
        areas.header,
    );

    let input = widgets::InputPanel::new(state.mode, state.active_input())
        .focused(state.ui_mode == UiMode::Input)
        .locked(state.request.is_loading());
    frame.render_widget(input, areas.input);

    frame.render_widget(widgets::ResultsView::new(state), areas.results);
    frame.render_widget(widgets::StatusBar::new(state), areas.status);
}

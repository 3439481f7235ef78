//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);

    match app.state.current_view() {
        View::Form => forms::draw_submit_form(frame, main_area, app),
        View::Success => forms::draw_success(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSubmissionApi;
    use crate::config::TuiConfig;
    use crate::state::{ReferralParams, SnapshotStore, SubmissionState};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(dir: &TempDir) -> App {
        App::new(
            TuiConfig::default(),
            Arc::new(MockSubmissionApi::new()),
            SnapshotStore::new(dir.path()),
            None,
            ReferralParams::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_form_renders_banner_only_after_failure() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        let screen = render(&app);
        assert!(screen.contains("Submit App"));
        assert!(!screen.contains(forms::ERROR_BANNER));

        app.state.submission = SubmissionState::Failed;
        assert!(render(&app).contains(forms::ERROR_BANNER));
    }

    #[test]
    fn test_success_view_renders_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.state.submission = SubmissionState::Success {
            access_token: "abc123".to_string(),
        };

        let screen = render(&app);
        assert!(screen.contains("Success!"));
        // Not eligible, so no maker-portal link
        assert!(!screen.contains("/maker/abc123"));
    }
}

//! App submission form rendering

use super::field_renderer::{field_lines, note_lines, wrap_words};
use crate::app::App;
use crate::state::AppState;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const ERROR_BANNER: &str = "Whoops! Please check the form for errors and try again.";

const BLOCKSTACK_ID_NOTE: &str = "You will use your ID to make changes to your app, and remove or \
                                  modify its listing in the future.";

fn section_title(id: &str) -> &str {
    match id {
        "personal" => "About you",
        "appDetails" => "App details",
        "appCategories" => "Categories",
        "agreements" => "Agreements",
        other => other,
    }
}

/// Draw the submission form with the banner and submit button below it
pub fn draw_submit_form(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                // Fields
            Constraint::Length(1),             // Error banner
            Constraint::Length(BUTTON_HEIGHT), // Submit button
        ])
        .split(area);

    draw_fields(frame, chunks[0], app);

    if app.state.show_error_banner() {
        let banner = Paragraph::new(ERROR_BANNER).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(banner, chunks[1]);
    }

    let button_area = Rect {
        width: chunks[2].width.min(28),
        ..chunks[2]
    };
    render_button(
        frame,
        button_area,
        app.state.button_label(),
        app.state.is_button_row_active(),
        !app.state.submission.is_loading(),
    );
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let form_focused = !state.is_button_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Submit an App ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    let (lines, active_line) = form_lines(state, inner.width);

    // Keep the active field a few rows below the top once the form overflows
    let height = inner.height as usize;
    let scroll = if lines.len() <= height {
        0
    } else {
        active_line
            .saturating_sub(height / 3)
            .min(lines.len().saturating_sub(height))
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Every row of the form body, plus the row the active field starts on.
///
/// Long text is wrapped here so one `Line` is one rendered row.
fn form_lines(state: &AppState, width: u16) -> (Vec<Line<'static>>, usize) {
    let mut lines: Vec<Line> = Vec::new();
    let mut active_line = 0;
    let mut index = 0;

    if let Some(session) = state.session.as_ref().filter(|s| s.has_token()) {
        lines.push(Line::from(vec![
            Span::styled(
                "  Blockstack ID",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" *", Style::default().fg(Color::Red)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", session.username),
            Style::default().fg(Color::Cyan),
        )));
        lines.extend(note_lines(
            BLOCKSTACK_ID_NOTE,
            width,
            Style::default().fg(Color::DarkGray),
        ));
    }

    for section in state.catalog.sections() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            section_title(section.id).to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
        if let Some(message) = &section.message {
            let style = Style::default().fg(Color::DarkGray);
            lines.extend(
                wrap_words(message, usize::from(width))
                    .into_iter()
                    .map(|row| Line::from(Span::styled(row, style))),
            );
        }

        for field in &section.fields {
            let is_active = index == state.active_field;
            if is_active {
                active_line = lines.len();
            }
            let value = state.display_value(&field.name);
            lines.extend(field_lines(
                field,
                &value,
                state.error_for(&field.name),
                is_active,
                width,
            ));
            index += 1;
        }
    }

    if state.is_button_row_active() {
        active_line = lines.len();
    }
    (lines, active_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        submission_catalog, AppConstants, CommitQueue, FormValues, ReferralParams, Session,
    };

    fn state(session: Option<Session>) -> AppState {
        let catalog = submission_catalog(&AppConstants::builtin(), session.as_ref()).unwrap();
        AppState::new(
            catalog,
            FormValues::new(),
            session,
            ReferralParams::default(),
            CommitQueue::default(),
        )
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_signed_in_form_shows_blockstack_id() {
        let (lines, _) = form_lines(&state(Some(Session::new("satoshi.id", "jwt"))), 80);
        let rows: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rows[0], "  Blockstack ID *");
        assert_eq!(rows[1], "    satoshi.id");
        assert!(rows[2].starts_with("    You will use your ID"));

        let (lines, _) = form_lines(&state(None), 80);
        assert!(lines.iter().all(|l| !text(l).contains("Blockstack ID")));
    }

    #[test]
    fn test_active_row_accounts_for_wrapped_notes() {
        let mut state = state(None);
        let last = state.field_count() - 1;
        state.active_field = last;

        let (wide, wide_row) = form_lines(&state, 200);
        let (narrow, narrow_row) = form_lines(&state, 30);
        assert!(narrow.len() > wide.len());
        assert!(narrow_row > wide_row);
        assert!(text(&narrow[narrow_row]).starts_with("› [ ] I agree"));
    }
}

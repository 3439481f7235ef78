//! Confirmation screen shown after the directory accepts a submission

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_success(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Success!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Thanks for your submission! We'll get back to you soon."),
    ];

    if let Some(link) = app.management_link() {
        lines.push(Line::default());
        lines.push(Line::from(
            "Use this magic link to manage your app's listing and App Mining payouts:",
        ));
        lines.push(Line::from(Span::styled(
            link,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )));
        lines.push(Line::from(Span::styled(
            "Keep it somewhere safe. Anyone with this link can edit your app.",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press Enter to go back home",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Submitted ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

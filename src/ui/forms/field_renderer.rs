//! Field rendering utilities for the submission form

use crate::state::{FieldDefinition, FieldKind, FieldValue};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CURSOR: &str = "▌";

fn accent(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

const INDENT: &str = "    ";

/// Greedy word wrap to `width` columns; words longer than a row are split
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        let row_len = row.chars().count();
        if row_len > 0 && row_len + 1 + word.len() > width {
            rows.push(std::mem::take(&mut row));
        }
        while word.len() > width {
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.extend(word);
    }
    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Indented note lines, one per rendered row
pub fn note_lines(text: &str, width: u16, style: Style) -> Vec<Line<'static>> {
    let usable = usize::from(width).saturating_sub(INDENT.len());
    wrap_words(text, usable)
        .into_iter()
        .map(|row| Line::from(Span::styled(format!("{INDENT}{row}"), style)))
        .collect()
}

/// Lines for one field: label, input, then any message and error.
///
/// Notes are pre-wrapped to `width`, so every line is exactly one row.
pub fn field_lines(
    field: &FieldDefinition,
    value: &FieldValue,
    error: Option<&str>,
    is_active: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let marker = if is_active { "› " } else { "  " };
    let mut lines = Vec::new();

    match &field.kind {
        FieldKind::Checkbox => {
            lines.push(Line::from(vec![
                Span::styled(marker, accent(is_active)),
                Span::styled(value.display_value(), accent(is_active)),
                Span::raw(" "),
                Span::styled(field.label.clone(), label_style(is_active)),
                required_span(field.required),
            ]));
        }
        kind => {
            lines.push(Line::from(vec![
                Span::styled(marker, accent(is_active)),
                Span::styled(field.label.clone(), label_style(is_active)),
                required_span(field.required),
            ]));
            let mut input = vec![Span::raw(INDENT)];
            input.extend(input_spans(field, kind, value, is_active));
            lines.push(Line::from(input));
        }
    }

    if let Some(hint) = &field.hint {
        lines.extend(note_lines(hint, width, Style::default().fg(Color::DarkGray)));
    }
    if let Some(message) = &field.message {
        lines.extend(note_lines(message, width, Style::default().fg(Color::Yellow)));
    }
    if let Some(error) = error {
        lines.extend(note_lines(error, width, Style::default().fg(Color::Red)));
    }
    lines
}

fn label_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn required_span(required: bool) -> Span<'static> {
    if required {
        Span::styled(" *", Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    }
}

fn input_spans(
    field: &FieldDefinition,
    kind: &FieldKind,
    value: &FieldValue,
    is_active: bool,
) -> Vec<Span<'static>> {
    match kind {
        FieldKind::Radio(options) => options
            .iter()
            .flat_map(|option| {
                let selected = value.as_text() == Some(option.value.as_str());
                let bullet = if selected { "(•) " } else { "( ) " };
                [
                    Span::styled(format!("{bullet}{}", option.label), accent(is_active)),
                    Span::raw("   "),
                ]
            })
            .collect(),
        FieldKind::Select(options) => {
            let chosen = value
                .as_text()
                .and_then(|v| options.iter().find(|o| o.value == v))
                .map(|o| Span::styled(o.label.clone(), accent(is_active)));
            let shown = chosen.unwrap_or_else(|| placeholder(field));
            if is_active {
                vec![
                    Span::styled("◀ ", Style::default().fg(Color::Cyan)),
                    shown,
                    Span::styled(" ▶", Style::default().fg(Color::Cyan)),
                ]
            } else {
                vec![shown]
            }
        }
        _ => {
            let text = value.display_value();
            let mut spans = if text.is_empty() && !is_active {
                vec![placeholder(field)]
            } else {
                vec![Span::styled(text, accent(is_active))]
            };
            if is_active {
                spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
            }
            spans
        }
    }
}

fn placeholder(field: &FieldDefinition) -> Span<'static> {
    let text = field.placeholder.as_deref().unwrap_or("(empty)");
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )
}

//! Home screen: question editor plus deck and spread selectors

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::{centered_rect, fg, render_hints};
use crate::app::{HomeField, HomeState, Load};

pub const QUESTION_PLACEHOLDER: &str = "What guidance do you seek?";

pub fn render(frame: &mut Frame, area: Rect, home: &HomeState, question: &TextArea, colors: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Form
            Constraint::Length(2), // Hints
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "✦ TAROT ✦",
            fg(colors, Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Focus on your question",
            fg(colors, Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let form_area = centered_rect(70, 100, chunks[1]);
    match &home.catalog {
        Load::Loading => render_message(frame, form_area, "Gathering the decks...", Color::Magenta, colors),
        Load::Failed(message) => render_message(frame, form_area, message, Color::Red, colors),
        Load::Loaded(_) => render_form(frame, form_area, home, question, colors),
    }

    render_hints(frame, chunks[2], hints(home), colors);
}

/// Footer keys; the begin-reading key is listed only while submission is allowed
pub fn hints(home: &HomeState) -> &'static str {
    let question = home.focus == HomeField::Question;
    match (&home.catalog, question, home.can_submit()) {
        (Load::Loading, _, _) => "F1: Help | q: Quit",
        (Load::Failed(_), _, _) => "r: Retry | F1: Help | q: Quit",
        (Load::Loaded(_), true, true) => {
            "Tab: Next field | Ctrl+S: Begin reading | F1: Help | Esc: Quit"
        }
        (Load::Loaded(_), true, false) => "Tab: Next field | F1: Help | Esc: Quit",
        (Load::Loaded(_), false, true) => {
            "Tab: Next field | ←/→: Change | Enter: Begin reading | q: Quit"
        }
        (Load::Loaded(_), false, false) => "Tab: Next field | ←/→: Change | q: Quit",
    }
}

/// Restyle the question editor for the current focus
pub fn style_question(textarea: &mut TextArea, home: &HomeState, colors: bool) {
    let focused = home.focus == HomeField::Question;
    textarea.set_block(
        Block::default()
            .title(" Your Question ")
            .borders(Borders::ALL)
            .border_style(focus_style(focused, colors)),
    );
    textarea.set_placeholder_text(QUESTION_PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });
}

fn focus_style(focused: bool, colors: bool) -> Style {
    if focused {
        fg(colors, Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        fg(colors, Color::DarkGray)
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color, colors: bool) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), fg(colors, color))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

fn render_form(frame: &mut Frame, area: Rect, home: &HomeState, question: &TextArea, colors: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Question
            Constraint::Length(3), // Deck
            Constraint::Length(3), // Spread
            Constraint::Length(2), // Spread description
            Constraint::Length(3), // Begin
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(question, rows[0]);

    let deck = home.selected_deck().map(|d| d.name.as_str());
    render_selector(frame, rows[1], "Deck", deck, home.focus == HomeField::Deck, colors);

    let spread = home.selected_spread();
    render_selector(
        frame,
        rows[2],
        "Spread",
        spread.map(|s| s.name.as_str()),
        home.focus == HomeField::Spread,
        colors,
    );

    if let Some(spread) = spread {
        let about = Paragraph::new(Line::from(Span::styled(
            format!("{} · {} cards", spread.description, spread.num_cards),
            fg(colors, Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(about, rows[3]);
    }

    let button_style = if home.can_submit() {
        fg(colors, Color::LightMagenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let button = Paragraph::new(Line::from(Span::styled("[ BEGIN READING ]", button_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(button, rows[4]);
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    focused: bool,
    colors: bool,
) {
    let value = value.unwrap_or("(none available)");
    let line = if focused {
        Line::from(vec![
            Span::styled("◀ ", fg(colors, Color::Magenta)),
            Span::raw(value.to_string()),
            Span::styled(" ▶", fg(colors, Color::Magenta)),
        ])
    } else {
        Line::from(value.to_string())
    };

    let selector = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" {} ", label))
            .borders(Borders::ALL)
            .border_style(focus_style(focused, colors)),
    );
    frame.render_widget(selector, area);
}

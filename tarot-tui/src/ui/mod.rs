//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames.
//! Render functions have no side effects; the question editor is the only
//! stateful widget and is owned by the runner.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::{AppState, Screen};

pub mod card_slot;
pub mod home;
pub mod reading;
pub mod shuffle;

pub use card_slot::CardSlot;

/// Render the application UI
///
/// This is the main rendering entry point.
pub fn render(frame: &mut Frame, state: &AppState, question: &TextArea) {
    let area = frame.area();

    let colors = state.config.colors_enabled;
    match &state.screen {
        Screen::Home(screen) => home::render(frame, area, screen, question, colors),
        Screen::Shuffle(screen) => shuffle::render(frame, area, screen, colors),
        Screen::Reading(screen) => reading::render(frame, area, screen, colors),
    }

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }
}

/// Foreground style that honours the colors setting
pub(crate) fn fg(colors: bool, color: Color) -> Style {
    if colors {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

/// One-line footer listing the keys that work right now
pub(crate) fn render_hints(frame: &mut Frame, area: Rect, hints: &str, colors: bool) {
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        fg(colors, Color::DarkGray),
    )))
    .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  F1           - Toggle help"),
        Line::from("  Esc          - Back (quit from home)"),
        Line::from("  q            - Quit (not while typing)"),
        Line::from("  Ctrl+C       - Quit"),
        Line::from(""),
        Line::from("Home:"),
        Line::from("  Tab/S-Tab    - Next/previous field"),
        Line::from("  Left/Right   - Change deck or spread"),
        Line::from("  Ctrl+S       - Begin reading"),
        Line::from("  r            - Retry after an error"),
        Line::from(""),
        Line::from("Shuffle:"),
        Line::from("  Enter/c      - Cut the deck"),
        Line::from("  b            - Back"),
        Line::from(""),
        Line::from("Reading:"),
        Line::from("  Left/Right   - Select card"),
        Line::from("  Enter/Space  - Reveal selected card"),
        Line::from("  1-9          - Reveal card by number"),
        Line::from("  a            - Reveal all"),
        Line::from("  n            - New reading"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(state.config.colors_enabled, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

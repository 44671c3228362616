//! Shuffle screen: an animated card pile and the cut action

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{fg, render_hints};
use crate::app::{ShufflePhase, ShuffleState};

/// Resting offsets of the five cards in the pile
const PILE_OFFSETS: [i16; 5] = [-3, -1, 0, 1, 3];

/// How far a card drifts while shuffling, indexed by frame
const SWAY: [i16; 8] = [0, 1, 2, 1, 0, -1, -2, -1];

pub fn render(frame: &mut Frame, area: Rect, shuffle: &ShuffleState, colors: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Question
            Constraint::Min(9),    // Pile
            Constraint::Length(4), // Status
            Constraint::Length(2), // Hints
        ])
        .split(area);

    let question = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", shuffle.params.question),
        fg(colors, Color::Gray).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(question, chunks[0]);

    let pile = Paragraph::new(pile_lines(shuffle.phase, shuffle.frame))
        .style(fg(colors, Color::Magenta))
        .alignment(Alignment::Center);
    frame.render_widget(pile, chunks[1]);

    let mut status = match shuffle.phase {
        ShufflePhase::Shuffling => vec![Line::from(Span::styled(
            "SHUFFLING THE DECK...",
            fg(colors, Color::Magenta).add_modifier(Modifier::BOLD),
        ))],
        ShufflePhase::Ready => vec![
            Line::from(Span::styled(
                "The deck is ready for you.",
                fg(colors, Color::Gray),
            )),
            Line::from(Span::styled(
                "[ CUT THE DECK ]",
                fg(colors, Color::LightMagenta).add_modifier(Modifier::BOLD),
            )),
        ],
        ShufflePhase::Loading => vec![Line::from(Span::styled(
            "READING THE CARDS...",
            fg(colors, Color::Magenta).add_modifier(Modifier::BOLD),
        ))],
    };
    if let Some(error) = &shuffle.error {
        status.push(Line::from(""));
        status.push(Line::from(Span::styled(error.clone(), fg(colors, Color::Red))));
    }
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[2]);

    let hints = match shuffle.phase {
        ShufflePhase::Ready => "Enter: Cut the deck | b: Back | F1: Help | q: Quit",
        _ => "b: Back | F1: Help | q: Quit",
    };
    render_hints(frame, chunks[3], hints, colors);
}

/// Text rows of the card pile; cards sway only while shuffling
pub fn pile_lines(phase: ShufflePhase, frame: u64) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(PILE_OFFSETS.len() + 4);
    lines.push(Line::from(""));

    for (i, base) in PILE_OFFSETS.iter().enumerate() {
        let sway = if phase == ShufflePhase::Shuffling {
            // Stagger each card so the pile ripples rather than moving as one
            SWAY[(frame as usize + i * 2) % SWAY.len()]
        } else {
            0
        };
        let shift = base + sway;
        lines.push(Line::from(shifted("╭───────────╮", shift)));
    }
    lines.push(Line::from("│     ✦     │"));
    lines.push(Line::from("│   TAROT   │"));
    lines.push(Line::from("╰───────────╯"));
    lines
}

/// Shift a row left or right by padding the opposite side
fn shifted(row: &str, shift: i16) -> String {
    let pad = " ".repeat(shift.unsigned_abs() as usize * 2);
    if shift >= 0 {
        format!("{}{}", pad, row)
    } else {
        format!("{}{}", row, pad)
    }
}

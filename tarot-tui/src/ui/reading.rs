//! Reading screen: the question, one card slot per position, and actions

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{fg, render_hints, CardSlot};
use crate::app::{Load, ReadingState};

pub fn render(frame: &mut Frame, area: Rect, state: &ReadingState, colors: bool) {
    match &state.reading {
        Load::Loading => {
            let text = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Reading the cards...",
                    fg(colors, Color::Magenta).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(text, area);
        }
        Load::Failed(message) => {
            let text = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message.clone(), fg(colors, Color::Red))),
                Line::from(""),
                Line::from(Span::styled(
                    "[ Start over ]",
                    fg(colors, Color::Gray).add_modifier(Modifier::UNDERLINED),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(text, area);
            render_hints(
                frame,
                footer(area),
                "Enter: Start over | F1: Help | q: Quit",
                colors,
            );
        }
        Load::Loaded(_) => render_loaded(frame, area, state, colors),
    }
}

fn footer(area: Rect) -> Rect {
    let height = area.height.min(2);
    Rect::new(area.x, area.bottom() - height, area.width, height)
}

fn render_loaded(frame: &mut Frame, area: Rect, state: &ReadingState, colors: bool) {
    let Some(reading) = state.reading.loaded() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Question header
            Constraint::Min(12),   // Cards
            Constraint::Length(1), // Actions
            Constraint::Length(2), // Hints
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled("YOU ASKED", fg(colors, Color::DarkGray))),
        Line::from(Span::styled(
            format!("\"{}\"", reading.question),
            fg(colors, Color::White).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("{} · {}", reading.spread.name, reading.deck.name),
            fg(colors, Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let cards = state.cards();
    if !cards.is_empty() {
        let count = cards.len() as u32;
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
            .split(chunks[1]);

        for (index, (card, slot)) in cards.iter().zip(slots.iter()).enumerate() {
            let widget = CardSlot::new(
                card,
                state.is_revealed(card.position_number()),
                index == state.cursor,
            )
            .colors(colors);
            frame.render_widget(widget, *slot);
        }
    }

    let mut actions = Vec::new();
    if state.can_reveal_all() {
        actions.push(Span::styled("[ Reveal all ]", fg(colors, Color::Gray)));
        actions.push(Span::raw("   "));
    }
    actions.push(Span::styled(
        "[ New reading ]",
        fg(colors, Color::LightMagenta).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(actions)).alignment(Alignment::Center),
        chunks[2],
    );

    let hints = if state.can_reveal_all() {
        "←/→: Select | Enter: Reveal | 1-9: Reveal card | a: Reveal all | n: New reading | q: Quit"
    } else {
        "←/→: Select | n: New reading | F1: Help | q: Quit"
    };
    render_hints(frame, chunks[3], hints, colors);
}

//! Card slot widget
//!
//! Stateless presentation of one drawn card. The position label and
//! description are always shown; below them either the card back with a
//! reveal hint, or the front: name, arcana label, a reversed badge, up to
//! three keywords for the active orientation and the interpretation.
//! Flipping is owned by the reading screen.

use libtarot::{Orientation, ReadingCard};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::fg;

pub const REVEAL_HINT: &str = "Press Enter to reveal";
pub const REVERSED_BADGE: &str = "↓ Reversed";

const CARD_BACK: [&str; 5] = ["╭───────╮", "│ ✦   ✦ │", "│   ✦   │", "│ TAROT │", "╰───────╯"];

pub struct CardSlot<'a> {
    card: &'a ReadingCard,
    revealed: bool,
    selected: bool,
    colors: bool,
}

impl<'a> CardSlot<'a> {
    pub fn new(card: &'a ReadingCard, revealed: bool, selected: bool) -> Self {
        Self {
            card,
            revealed,
            selected,
            colors: true,
        }
    }

    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Text content of the slot, without its border
    pub fn lines(&self) -> Vec<Line<'a>> {
        let card = self.card;
        let mut lines = vec![
            Line::from(Span::styled(
                card.position.description.as_str(),
                fg(self.colors, Color::Gray).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];

        if !self.revealed {
            let back = fg(self.colors, Color::Magenta);
            lines.extend(CARD_BACK.iter().map(|row| Line::from(Span::styled(*row, back))));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                REVEAL_HINT,
                fg(self.colors, Color::DarkGray),
            )));
            return lines;
        }

        if card.orientation() == Orientation::Reversed {
            lines.push(Line::from(Span::styled(
                REVERSED_BADGE,
                fg(self.colors, Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            card.card.name.as_str(),
            fg(self.colors, Color::LightMagenta).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            card.card.arcana_label(),
            fg(self.colors, Color::DarkGray),
        )));

        let keywords = card.headline_keywords();
        if !keywords.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                keywords.join(" · "),
                fg(self.colors, Color::Cyan),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(card.interpretation.as_str()));
        lines
    }
}

impl Widget for CardSlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            fg(self.colors, Color::Yellow).add_modifier(Modifier::BOLD)
        } else if self.revealed && self.card.orientation() == Orientation::Reversed {
            fg(self.colors, Color::Red)
        } else {
            fg(self.colors, Color::Magenta)
        };

        let block = Block::default()
            .title(format!(
                " {}. {} ",
                self.card.position_number(),
                self.card.position.name
            ))
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let alignment = if self.revealed {
            Alignment::Left
        } else {
            Alignment::Center
        };

        Paragraph::new(self.lines())
            .block(block)
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

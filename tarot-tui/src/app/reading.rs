//! Reading screen state: a loaded reading and which positions are revealed
//!
//! The revealed set lives only as long as this screen; navigating away
//! discards it.

use std::collections::BTreeSet;

use libtarot::{Reading, ReadingCard, ReadingId};

use super::load::Load;

pub const READING_LOAD_ERROR: &str = "Could not load this reading.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingState {
    pub id: ReadingId,
    /// Cards are kept sorted by position number once loaded
    pub reading: Load<Reading>,
    revealed: BTreeSet<i32>,
    /// Index into the sorted cards of the highlighted slot
    pub cursor: usize,
}

impl ReadingState {
    pub fn new(id: ReadingId) -> Self {
        Self {
            id,
            reading: Load::Loading,
            revealed: BTreeSet::new(),
            cursor: 0,
        }
    }

    pub fn loaded(&mut self, mut reading: Reading) {
        reading.sort_cards_by_position();
        self.reading = Load::Loaded(reading);
        self.revealed.clear();
        self.cursor = 0;
    }

    pub fn failed(&mut self) {
        self.reading = Load::Failed(READING_LOAD_ERROR.to_string());
    }

    /// Cards in display order (ascending position number)
    pub fn cards(&self) -> &[ReadingCard] {
        self.reading
            .loaded()
            .map(|r| r.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn revealed(&self) -> &BTreeSet<i32> {
        &self.revealed
    }

    pub fn is_revealed(&self, position_number: i32) -> bool {
        self.revealed.contains(&position_number)
    }

    /// Reveal one position. Idempotent; positions not in the reading are ignored.
    ///
    /// Returns true if the position was newly revealed.
    pub fn flip(&mut self, position_number: i32) -> bool {
        let known = self
            .cards()
            .iter()
            .any(|c| c.position_number() == position_number);
        known && self.revealed.insert(position_number)
    }

    /// Reveal the slot at a display index
    pub fn flip_nth(&mut self, index: usize) -> bool {
        let position_number = self.cards().get(index).map(|c| c.position_number());
        match position_number {
            Some(position_number) => {
                self.cursor = index;
                self.flip(position_number)
            }
            None => false,
        }
    }

    pub fn flip_selected(&mut self) -> bool {
        self.flip_nth(self.cursor)
    }

    pub fn all_revealed(&self) -> bool {
        self.cards()
            .iter()
            .all(|c| self.revealed.contains(&c.position_number()))
    }

    /// "Reveal all" is offered only while something is still face down
    pub fn can_reveal_all(&self) -> bool {
        !self.cards().is_empty() && !self.all_revealed()
    }

    pub fn reveal_all(&mut self) {
        if self.can_reveal_all() {
            self.revealed = self.cards().iter().map(|c| c.position_number()).collect();
        }
    }

    pub fn selected_card(&self) -> Option<&ReadingCard> {
        self.cards().get(self.cursor)
    }

    pub fn cursor_next(&mut self) {
        let len = self.cards().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_previous(&mut self) {
        let len = self.cards().len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }
}

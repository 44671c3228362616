//! Home screen state: deck, spread and question selection
//!
//! States are `loading -> ready | error`. The screen never talks to the
//! service on submit; it only produces the hand-off for the shuffle screen.

use libtarot::{Deck, DeckId, Spread, SpreadId};

use super::load::Load;
use super::shuffle::ShuffleParams;

pub const HOME_LOAD_ERROR: &str = "Could not reach the server. Is the backend running?";

/// Decks and spreads offered by the service
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub decks: Vec<Deck>,
    pub spreads: Vec<Spread>,
}

/// Which form field has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeField {
    Question,
    Deck,
    Spread,
}

impl HomeField {
    pub fn next(self) -> Self {
        match self {
            HomeField::Question => HomeField::Deck,
            HomeField::Deck => HomeField::Spread,
            HomeField::Spread => HomeField::Question,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            HomeField::Question => HomeField::Spread,
            HomeField::Deck => HomeField::Question,
            HomeField::Spread => HomeField::Deck,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub catalog: Load<Catalog>,
    pub question: String,
    pub deck_id: Option<DeckId>,
    pub spread_id: Option<SpreadId>,
    pub focus: HomeField,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            catalog: Load::Loading,
            question: String::new(),
            deck_id: None,
            spread_id: None,
            focus: HomeField::Question,
        }
    }
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both lists arrived; default each selection to its first entry
    pub fn catalog_loaded(&mut self, decks: Vec<Deck>, spreads: Vec<Spread>) {
        self.deck_id = decks.first().map(|d| d.id);
        self.spread_id = spreads.first().map(|s| s.id);
        self.catalog = Load::Loaded(Catalog { decks, spreads });
    }

    pub fn catalog_failed(&mut self) {
        self.catalog = Load::Failed(HOME_LOAD_ERROR.to_string());
    }

    pub fn is_ready(&self) -> bool {
        self.catalog.loaded().is_some()
    }

    pub fn set_question(&mut self, question: String) {
        self.question = question;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn decks(&self) -> &[Deck] {
        self.catalog.loaded().map(|c| c.decks.as_slice()).unwrap_or(&[])
    }

    pub fn spreads(&self) -> &[Spread] {
        self.catalog.loaded().map(|c| c.spreads.as_slice()).unwrap_or(&[])
    }

    pub fn selected_deck(&self) -> Option<&Deck> {
        let id = self.deck_id?;
        self.decks().iter().find(|d| d.id == id)
    }

    pub fn selected_spread(&self) -> Option<&Spread> {
        let id = self.spread_id?;
        self.spreads().iter().find(|s| s.id == id)
    }

    /// Select a deck by id; ignored if the catalog has no such deck
    pub fn select_deck(&mut self, id: DeckId) {
        if self.decks().iter().any(|d| d.id == id) {
            self.deck_id = Some(id);
        }
    }

    /// Select a spread by id; ignored if the catalog has no such spread
    pub fn select_spread(&mut self, id: SpreadId) {
        if self.spreads().iter().any(|s| s.id == id) {
            self.spread_id = Some(id);
        }
    }

    /// Move the focused list's selection forward, wrapping around
    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    /// Move the focused list's selection back, wrapping around
    pub fn select_previous(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, step: isize) {
        match self.focus {
            HomeField::Deck => {
                self.deck_id = cycle(self.decks(), self.deck_id, |d| d.id, step);
            }
            HomeField::Spread => {
                self.spread_id = cycle(self.spreads(), self.spread_id, |s| s.id, step);
            }
            HomeField::Question => {}
        }
    }

    /// Submission needs a non-blank question and both selections
    pub fn can_submit(&self) -> bool {
        !self.question.trim().is_empty() && self.deck_id.is_some() && self.spread_id.is_some()
    }

    /// The hand-off for the shuffle screen, or `None` when submission is disabled
    pub fn submission(&self) -> Option<ShuffleParams> {
        if !self.can_submit() {
            return None;
        }
        Some(ShuffleParams {
            deck_id: self.deck_id?,
            spread_id: self.spread_id?,
            question: self.question.trim().to_string(),
        })
    }
}

fn cycle<T, Id: Copy + PartialEq>(
    items: &[T],
    current: Option<Id>,
    id_of: impl Fn(&T) -> Id,
    step: isize,
) -> Option<Id> {
    if items.is_empty() {
        return current;
    }
    let len = items.len() as isize;
    let index = current
        .and_then(|id| items.iter().position(|item| id_of(item) == id))
        .map(|i| i as isize)
        .unwrap_or(0);
    let next = (index + step).rem_euclid(len) as usize;
    Some(id_of(&items[next]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libtarot::api::mock::fixtures;

    fn loaded() -> HomeState {
        let mut state = HomeState::new();
        state.catalog_loaded(
            vec![fixtures::deck(1, "Rider-Waite"), fixtures::deck(2, "Thoth")],
            vec![fixtures::three_card_spread(5), fixtures::three_card_spread(6)],
        );
        state
    }

    #[test]
    fn test_starts_loading() {
        let state = HomeState::new();
        assert!(state.catalog.is_loading());
        assert!(!state.is_ready());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_defaults_to_first_of_each_list() {
        let state = loaded();
        assert_eq!(state.deck_id, Some(DeckId(1)));
        assert_eq!(state.spread_id, Some(SpreadId(5)));
        assert_eq!(state.selected_deck().map(|d| d.name.as_str()), Some("Rider-Waite"));
    }

    #[test]
    fn test_empty_lists_leave_selection_unset() {
        let mut state = HomeState::new();
        state.catalog_loaded(Vec::new(), Vec::new());
        state.set_question("Anything?".to_string());

        assert!(state.is_ready());
        assert_eq!(state.deck_id, None);
        assert!(!state.can_submit());
        assert!(state.submission().is_none());
    }

    #[test]
    fn test_failure_uses_fixed_message() {
        let mut state = HomeState::new();
        state.catalog_failed();
        assert_eq!(state.catalog.error(), Some(HOME_LOAD_ERROR));
    }

    #[test]
    fn test_blank_question_disables_submit() {
        let mut state = loaded();
        for question in ["", "   ", "\n\t "] {
            state.set_question(question.to_string());
            assert!(!state.can_submit(), "{:?} should not submit", question);
        }
    }

    #[test]
    fn test_submission_trims_question() {
        let mut state = loaded();
        state.set_question("  Will it rain?\n".to_string());

        assert_eq!(
            state.submission(),
            Some(ShuffleParams {
                deck_id: DeckId(1),
                spread_id: SpreadId(5),
                question: "Will it rain?".to_string(),
            })
        );
    }

    #[test]
    fn test_selection_cycles_focused_list() {
        let mut state = loaded();

        // Question focus: arrows do nothing
        state.select_next();
        assert_eq!(state.deck_id, Some(DeckId(1)));

        state.focus_next();
        assert_eq!(state.focus, HomeField::Deck);
        state.select_next();
        assert_eq!(state.deck_id, Some(DeckId(2)));
        state.select_next();
        assert_eq!(state.deck_id, Some(DeckId(1)));
        state.select_previous();
        assert_eq!(state.deck_id, Some(DeckId(2)));

        state.focus_next();
        state.select_previous();
        assert_eq!(state.spread_id, Some(SpreadId(6)));
    }

    #[test]
    fn test_select_by_id_ignores_unknown() {
        let mut state = loaded();
        state.select_deck(DeckId(2));
        state.select_deck(DeckId(99));
        state.select_spread(SpreadId(404));

        assert_eq!(state.deck_id, Some(DeckId(2)));
        assert_eq!(state.spread_id, Some(SpreadId(5)));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut state = HomeState::new();
        state.focus_previous();
        assert_eq!(state.focus, HomeField::Spread);
        state.focus_next();
        assert_eq!(state.focus, HomeField::Question);
    }
}

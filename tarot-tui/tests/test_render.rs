//! Rendering tests against ratatui's test backend

use libtarot::api::mock::fixtures;
use libtarot::ReadingId;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use tarot_tui::app::{reduce, Action, AppState, Route};
use tarot_tui::ui::{self, card_slot::REVEAL_HINT, CardSlot};
use tui_textarea::TextArea;

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn draw(state: &AppState) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let question = TextArea::default();
    terminal
        .draw(|frame| ui::render(frame, state, &question))
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

#[test]
fn test_card_slot_hides_face_until_revealed() {
    let reading = fixtures::reading(1);
    let card = reading.card_at(3).unwrap();

    let backend = TestBackend::new(40, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| frame.render_widget(CardSlot::new(card, false, true), frame.area()))
        .unwrap();
    let hidden = buffer_text(terminal.backend().buffer());
    assert!(hidden.contains("Future"));
    assert!(hidden.contains(REVEAL_HINT));
    assert!(!hidden.contains("The Fool"));

    terminal
        .draw(|frame| frame.render_widget(CardSlot::new(card, true, true), frame.area()))
        .unwrap();
    let shown = buffer_text(terminal.backend().buffer());
    assert!(shown.contains("The Fool"));
    assert!(shown.contains("Major Arcana"));
    assert!(!shown.contains(REVEAL_HINT));
}

#[test]
fn test_home_shows_loading_then_form() {
    let state = AppState::new();
    assert!(draw(&state).contains("Gathering the decks"));

    let epoch = state.epoch;
    let state = reduce(
        state,
        Action::CatalogLoaded {
            epoch,
            decks: vec![fixtures::deck(1, "Rider-Waite")],
            spreads: vec![fixtures::three_card_spread(5)],
        },
    );
    let screen = draw(&state);
    assert!(screen.contains("Rider-Waite"));
    assert!(screen.contains("Three Card"));
}

#[test]
fn test_reading_screen_shows_question_and_actions() {
    let state = AppState::open(Route::Reading(ReadingId(42)), Default::default());
    let epoch = state.epoch;
    let state = reduce(
        state,
        Action::ReadingLoaded {
            epoch,
            reading: Box::new(fixtures::reading(42)),
        },
    );

    let screen = draw(&state);
    assert!(screen.contains("Will it rain?"));
    assert!(screen.contains("Reveal all"));
    assert!(screen.contains("New reading"));

    let state = reduce(state, Action::RevealAll);
    let screen = draw(&state);
    assert!(!screen.contains("[ Reveal all ]"));
    assert!(screen.contains("The Star"));
}

#[test]
fn test_help_overlay_renders() {
    let state = reduce(AppState::new(), Action::ShowHelp);
    assert!(draw(&state).contains("Keyboard Shortcuts"));
}

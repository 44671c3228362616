//! End-to-end reading flow through the reducer and the service bridge
//!
//! Drives the app the way the runner does: reduce actions, execute queued
//! commands against a `MockApi`, feed results back in.

use std::sync::Arc;
use std::time::Duration;

use libtarot::api::mock::{MockApi, MockConfig};
use libtarot::{ApiError, DeckId, ReadingId, SpreadId};
use tarot_tui::app::shuffle::CREATE_READING_ERROR;
use tarot_tui::app::{reduce, Action, AppState, Route, ShuffleParams, ShufflePhase};
use tarot_tui::services::ServiceHandle;

fn services(api: &MockApi) -> ServiceHandle {
    ServiceHandle::new(Arc::new(api.clone()))
        .expect("Failed to create service handle")
        .with_shuffle_duration(Duration::from_millis(20))
}

/// Execute queued commands, then fold in one result
fn settle(state: AppState, services: &mut ServiceHandle) -> AppState {
    let mut state = state;
    for command in state.take_commands() {
        services.execute(command);
    }
    let action = services
        .events()
        .recv_timeout(Duration::from_secs(2))
        .expect("service produced no result");
    reduce(state, action)
}

fn on_shuffle_ready(api: &MockApi, services: &mut ServiceHandle) -> AppState {
    let state = settle(AppState::new(), services);
    let state = reduce(state, Action::QuestionChanged("Will it rain?".to_string()));
    let state = reduce(state, Action::Submit);
    let state = settle(state, services);
    assert_eq!(state.shuffle().map(|s| s.phase), Some(ShufflePhase::Ready));
    assert_eq!(api.create_reading_calls(), 0);
    state
}

#[test]
fn test_home_to_shuffle_handoff() {
    let api = MockApi::success();
    let mut services = services(&api);

    let state = settle(AppState::new(), &mut services);
    let home = state.home().expect("on home");
    assert_eq!(home.deck_id, Some(DeckId(1)));
    assert_eq!(home.spread_id, Some(SpreadId(5)));

    let state = reduce(state, Action::QuestionChanged("Will it rain?".to_string()));
    let state = reduce(state, Action::Submit);

    assert_eq!(state.route, Route::Shuffle);
    assert_eq!(
        state.shuffle().map(|s| s.params.clone()),
        Some(ShuffleParams {
            deck_id: DeckId(1),
            spread_id: SpreadId(5),
            question: "Will it rain?".to_string(),
        })
    );
    // Submitting never talks to the service
    assert_eq!(api.create_reading_calls(), 0);
}

#[test]
fn test_cut_creates_and_opens_reading() {
    let api = MockApi::success();
    let mut services = services(&api);
    let state = on_shuffle_ready(&api, &mut services);

    let state = reduce(state, Action::CutDeck);
    let state = reduce(state, Action::CutDeck);
    let state = settle(state, &mut services);

    assert_eq!(state.route, Route::Reading(ReadingId(42)));
    assert_eq!(api.create_reading_calls(), 1);
    let requests = api.create_requests();
    assert_eq!(requests[0].deck_id, DeckId(1));
    assert_eq!(requests[0].spread_id, SpreadId(5));
    assert_eq!(requests[0].question, "Will it rain?");

    let state = settle(state, &mut services);
    let reading = state.reading().expect("on reading");
    let order: Vec<i32> = reading.cards().iter().map(|c| c.position_number()).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert!(reading.revealed().is_empty());
}

#[test]
fn test_rejected_create_returns_to_ready() {
    let api = MockApi::new(MockConfig {
        created: Err(ApiError::Request {
            status: 400,
            body: "{\"question\":[\"This field may not be blank.\"]}".to_string(),
        }),
        ..Default::default()
    });
    let mut services = services(&api);
    let state = on_shuffle_ready(&api, &mut services);

    let state = reduce(state, Action::CutDeck);
    let state = settle(state, &mut services);

    let shuffle = state.shuffle().expect("still on shuffle");
    assert_eq!(shuffle.phase, ShufflePhase::Ready);
    assert_eq!(shuffle.error.as_deref(), Some(CREATE_READING_ERROR));
    assert_eq!(state.route, Route::Shuffle);
    assert_eq!(api.create_reading_calls(), 1);
}

#[test]
fn test_unreachable_service_shows_home_error() {
    let api = MockApi::unreachable();
    let mut services = services(&api);

    let state = settle(AppState::new(), &mut services);
    let home = state.home().expect("on home");
    assert_eq!(
        home.catalog.error(),
        Some("Could not reach the server. Is the backend running?")
    );
}

#[test]
fn test_missing_reading_offers_start_over() {
    let api = MockApi::failure(404, "{\"detail\":\"Not found.\"}");
    let mut services = services(&api);

    let state = AppState::open(Route::Reading(ReadingId(7)), Default::default());
    let state = settle(state, &mut services);
    let reading = state.reading().expect("on reading");
    assert_eq!(reading.reading.error(), Some("Could not load this reading."));
    assert_eq!(api.get_reading_calls(), 1);

    let state = reduce(
        state,
        Action::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        )),
    );
    assert_eq!(state.route, Route::Home);
}

#[test]
fn test_reveal_flow() {
    let api = MockApi::success();
    let mut services = services(&api);

    let state = AppState::open(Route::Reading(ReadingId(42)), Default::default());
    let state = settle(state, &mut services);

    let state = reduce(state, Action::FlipCard(2));
    let state = reduce(state, Action::FlipCard(2));
    assert_eq!(state.reading().map(|r| r.revealed().len()), Some(1));

    let state = reduce(state, Action::RevealAll);
    let reading = state.reading().expect("on reading");
    assert_eq!(reading.revealed().len(), 3);
    assert!(!reading.can_reveal_all());

    // Leaving discards the reveal state
    let state = reduce(
        state,
        Action::NavigateTo {
            route: Route::Home,
            handoff: None,
        },
    );
    let mut state = reduce(
        state,
        Action::NavigateTo {
            route: Route::Reading(ReadingId(42)),
            handoff: None,
        },
    );
    state.take_commands();
    assert!(state.reading().map(|r| r.revealed().is_empty()).unwrap_or(false));
}

#[test]
fn test_result_for_left_screen_is_dropped() {
    let api = MockApi::with_delay(Duration::from_millis(50));
    let mut services = services(&api);

    let mut state = AppState::new();
    for command in state.take_commands() {
        services.execute(command);
    }

    // Leave home before the catalog arrives
    let state = reduce(
        state,
        Action::NavigateTo {
            route: Route::Reading(ReadingId(42)),
            handoff: None,
        },
    );
    let late = services
        .events()
        .recv_timeout(Duration::from_secs(2))
        .expect("catalog result");
    assert!(matches!(late, Action::CatalogLoaded { .. }));

    let state = reduce(state, late);
    assert!(state.reading().map(|r| r.reading.is_loading()).unwrap_or(false));
}
